//! IRC message prefix.
//!
//! The prefix identifies the origin of a message: either a server name or a
//! user's `nick!user@host` mask.

use std::fmt;

use crate::error::MessageParseError;

/// IRC message prefix - identifies the origin of a message.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Prefix {
    /// Server name (e.g., "irc.nomad.example")
    ServerName(String),
    /// User prefix: (nickname, username, hostname)
    Nickname(String, String, String),
}

impl Prefix {
    /// Create a user prefix from its three parts.
    pub fn new(nick: impl Into<String>, user: impl Into<String>, host: impl Into<String>) -> Self {
        Prefix::Nickname(nick.into(), user.into(), host.into())
    }

    /// Parse the text after the leading `:`.
    ///
    /// A bare name containing a dot is taken as a server; anything with `!`
    /// or `@` is a user mask.
    pub fn parse(s: &str) -> Result<Self, MessageParseError> {
        if s.is_empty() || s.chars().any(|c| c.is_control() || c == ' ') {
            return Err(MessageParseError::InvalidPrefix(s.to_owned()));
        }

        let (name, host) = match s.split_once('@') {
            Some((name, host)) => (name, Some(host)),
            None => (s, None),
        };
        let (nick, user) = match name.split_once('!') {
            Some((nick, user)) => (nick, Some(user)),
            None => (name, None),
        };

        if nick.is_empty() {
            return Err(MessageParseError::InvalidPrefix(s.to_owned()));
        }

        Ok(match (user, host) {
            (None, None) if nick.contains('.') => Prefix::ServerName(nick.to_owned()),
            (user, host) => Prefix::new(nick, user.unwrap_or(""), host.unwrap_or("")),
        })
    }

    /// The nickname, for user prefixes.
    pub fn nick(&self) -> Option<&str> {
        match self {
            Prefix::Nickname(nick, _, _) => Some(nick),
            Prefix::ServerName(_) => None,
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::ServerName(name) => f.write_str(name),
            Prefix::Nickname(nick, user, host) => {
                f.write_str(nick)?;
                if !user.is_empty() {
                    write!(f, "!{}", user)?;
                }
                if !host.is_empty() {
                    write!(f, "@{}", host)?;
                }
                Ok(())
            }
        }
    }
}
