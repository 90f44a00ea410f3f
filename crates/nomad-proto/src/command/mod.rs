//! IRC command representation.
//!
//! A [`Command`] is one of three things: a named verb from the closed
//! [`Verb`] set, a numeric server reply, or a raw verb this crate does not
//! know. Parameters are kept as owned strings; handlers interpret them.

mod cap;
mod verb;

pub use cap::CapSubCommand;
pub use verb::Verb;

use std::fmt;

use crate::response::Response;

/// An IRC command with its parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// A known textual verb.
    Verb(Verb, Vec<String>),
    /// A numeric reply. The first parameter is the target.
    Response(Response, Vec<String>),
    /// Anything else: an unknown verb, or a numeric outside the table.
    Raw(String, Vec<String>),
}

impl Command {
    /// Build a verb command from borrowed parameters.
    pub fn verb(verb: Verb, params: &[&str]) -> Self {
        Command::Verb(verb, params.iter().map(|p| (*p).to_owned()).collect())
    }

    /// Wire name of the command (`"NICK"`, `"001"`, ...).
    pub fn name(&self) -> String {
        match self {
            Command::Verb(verb, _) => verb.as_str().to_owned(),
            Command::Response(resp, _) => format!("{:03}", resp.code()),
            Command::Raw(name, _) => name.clone(),
        }
    }

    /// Positional parameters.
    pub fn params(&self) -> &[String] {
        match self {
            Command::Verb(_, params) | Command::Response(_, params) | Command::Raw(_, params) => {
                params
            }
        }
    }

    /// Parameter at `idx`, if present.
    pub fn arg(&self, idx: usize) -> Option<&str> {
        self.params().get(idx).map(String::as_str)
    }

    pub(crate) fn params_mut(&mut self) -> &mut Vec<String> {
        match self {
            Command::Verb(_, params) | Command::Response(_, params) | Command::Raw(_, params) => {
                params
            }
        }
    }

    /// Index of the first parameter before the last that
    /// [`is_middle_safe`] rejects.
    pub fn unsafe_middle_param(&self) -> Option<usize> {
        let params = self.params();
        let middle = params.len().saturating_sub(1);
        params[..middle].iter().position(|p| !is_middle_safe(p))
    }
}

/// Whether `param` can be written as a middle parameter: non-empty, no
/// leading colon, and no space, line break or NUL.
///
/// Only the last parameter may take the trailing `:text` form, so anything
/// else must satisfy this or the line reparses with shifted fields.
///
/// ```
/// use nomad_proto::is_middle_safe;
///
/// assert!(is_middle_safe("evil!*@*"));
/// assert!(!is_middle_safe("a b"));
/// assert!(!is_middle_safe(":x"));
/// assert!(!is_middle_safe(""));
/// ```
pub fn is_middle_safe(param: &str) -> bool {
    !param.is_empty() && !param.starts_with(':') && !param.contains([' ', '\r', '\n', '\0'])
}

impl fmt::Display for Command {
    /// Renders the verb and parameters without a terminator.
    ///
    /// The last parameter is written in trailing form (`:text`) whenever it
    /// is empty, contains a space or starts with a colon.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Verb(verb, _) => f.write_str(verb.as_str())?,
            Command::Response(resp, _) => write!(f, "{:03}", resp.code())?,
            Command::Raw(name, _) => f.write_str(name)?,
        }

        let params = self.params();
        if let Some((last, init)) = params.split_last() {
            for param in init {
                write!(f, " {}", param)?;
            }
            if last.is_empty() || last.contains(' ') || last.starts_with(':') {
                write!(f, " :{}", last)?;
            } else {
                write!(f, " {}", last)?;
            }
        }
        Ok(())
    }
}
