//! IRC message type and line codec.
//!
//! Parsing lives in [`parse`](self::parse) and serialization in
//! [`serialize`](self::serialize); this module holds the type and its
//! constructors.

mod parse;
mod serialize;

use crate::command::{Command, Verb};
use crate::prefix::Prefix;
use crate::response::Response;

/// Line terminator.
pub const CRLF: &str = "\r\n";

/// Maximum line length on the wire, terminator included.
pub const MAX_LINE_LEN: usize = 512;

/// Maximum payload length of a line, terminator excluded.
pub const MAX_REPLY_LEN: usize = MAX_LINE_LEN - CRLF.len();

/// A single IRC protocol line.
///
/// # Example
///
/// ```
/// use nomad_proto::{Message, Prefix, Response};
///
/// let msg: Message = ":dan!d@host MODE #nomad +k secret".parse().unwrap();
/// assert_eq!(msg.command.arg(1), Some("+k"));
///
/// let reply = Message::numeric("irc.nomad.example", Response::RPL_WELCOME, &["dan", "Welcome"]);
/// assert_eq!(reply.to_line(), ":irc.nomad.example 001 dan Welcome\r\n");
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// Message prefix/source (e.g., `nick!user@host`).
    pub prefix: Option<Prefix>,
    /// The IRC command and its parameters.
    pub command: Command,
}

impl Message {
    /// A numeric reply from `server`. The first param is the target.
    pub fn numeric(server: &str, response: Response, params: &[&str]) -> Self {
        Message {
            prefix: Some(Prefix::ServerName(server.to_owned())),
            command: Command::Response(response, params.iter().map(|p| (*p).to_owned()).collect()),
        }
    }

    /// A named command with an optional source.
    pub fn verb(prefix: Option<Prefix>, verb: Verb, params: &[&str]) -> Self {
        Message {
            prefix,
            command: Command::verb(verb, params),
        }
    }

    /// Replace the prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Nickname from the prefix, if the source is a user.
    pub fn source_nickname(&self) -> Option<&str> {
        self.prefix.as_ref().and_then(Prefix::nick)
    }
}

impl From<Command> for Message {
    fn from(command: Command) -> Self {
        Message {
            prefix: None,
            command,
        }
    }
}
