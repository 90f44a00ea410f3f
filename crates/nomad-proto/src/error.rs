//! Error types for the IRC protocol library.
//!
//! This module defines error types for protocol-level errors,
//! message parsing failures, and mode table lookups.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProtocolError {
    /// Invalid UTF-8 bytes in an inbound line.
    #[error("invalid UTF-8 in message at byte {byte_pos}")]
    InvalidUtf8 {
        /// Byte position where UTF-8 validation failed.
        byte_pos: usize,
        /// Command name recovered from the ASCII prefix of the line, if any.
        command_hint: Option<String>,
    },

    /// Line exceeded the maximum allowed length.
    #[error("message too long: {actual} bytes (limit: {limit})")]
    MessageTooLong {
        /// Actual line length in bytes, excluding the terminator.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },

    /// A parameter other than the last cannot be written as a middle
    /// parameter (empty, leading colon, or whitespace).
    #[error("parameter {index} cannot be sent before the last: {param:?}")]
    UnsafeParam {
        /// Position of the parameter.
        index: usize,
        /// The offending value.
        param: String,
    },

    /// Failed to parse an IRC message.
    #[error("invalid message: {string}")]
    InvalidMessage {
        /// The invalid message string.
        string: String,
        /// The underlying cause of the parse failure.
        #[source]
        cause: MessageParseError,
    },
}

impl ProtocolError {
    /// The parse cause, if this error came from the line grammar.
    pub fn parse_cause(&self) -> Option<&MessageParseError> {
        match self {
            Self::InvalidMessage { cause, .. } => Some(cause),
            _ => None,
        }
    }

    /// Best-effort name of the command the offending line carried.
    pub fn command_hint(&self) -> Option<&str> {
        match self {
            Self::InvalidUtf8 { command_hint, .. } => command_hint.as_deref(),
            Self::InvalidMessage { string, .. } => extract_command_hint(string),
            Self::MessageTooLong { .. } | Self::UnsafeParam { .. } => None,
        }
    }
}

/// Errors that occur while splitting a line into prefix, verb and parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MessageParseError {
    /// Zero-length line (after stripping the terminator).
    #[error("empty line")]
    EmptyLine,

    /// A prefix was present but no verb followed it.
    #[error("missing command")]
    MissingCommand,

    /// A numeric verb that is not three digits in the 1-999 range.
    #[error("malformed numeric: {0}")]
    MalformedNumeric(String),

    /// A verb made of characters that are neither letters nor digits.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// The `:prefix` token was empty or contained illegal characters.
    #[error("invalid prefix: {0}")]
    InvalidPrefix(String),

    /// Unknown subcommand for a command that takes one.
    #[error("invalid {cmd} subcommand: {sub}")]
    InvalidSubcommand {
        /// The parent command.
        cmd: &'static str,
        /// The rejected subcommand token.
        sub: String,
    },
}

/// Mode table lookup failures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeError {
    /// The letter is not in the user or channel mode table.
    #[error("unknown mode: {0}")]
    UnknownMode(char),
}

/// Extract the verb from a raw line for error reporting.
///
/// The verb is the first space-delimited token after an optional `:prefix`.
pub(crate) fn extract_command_hint(raw: &str) -> Option<&str> {
    let mut rest = raw.trim_start();
    if rest.starts_with(':') {
        rest = rest.split_once(' ').map(|(_, r)| r.trim_start()).unwrap_or("");
    }
    let verb = rest.split(' ').next().unwrap_or("");
    if !verb.is_empty() && verb.bytes().all(|b| b.is_ascii_alphanumeric()) {
        Some(verb)
    } else {
        None
    }
}
