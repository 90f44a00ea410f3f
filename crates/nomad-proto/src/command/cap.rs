//! CAP subcommand types.
//!
//! # Reference
//! - IRCv3 capability negotiation: <https://ircv3.net/specs/extensions/capability-negotiation>

use std::str::FromStr;

use crate::error::MessageParseError;

/// Subcommand for CAP (capability negotiation) messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CapSubCommand {
    /// LS - List available capabilities
    LS,
    /// LIST - List currently enabled capabilities
    LIST,
    /// REQ - Request capabilities
    REQ,
    /// ACK - Acknowledge capabilities (both directions)
    ACK,
    /// NAK - Server rejected capabilities
    NAK,
    /// CLEAR - Drop every non-sticky capability
    CLEAR,
    /// END - End capability negotiation
    END,
}

impl CapSubCommand {
    /// Get the string representation of this subcommand.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LS => "LS",
            Self::LIST => "LIST",
            Self::REQ => "REQ",
            Self::ACK => "ACK",
            Self::NAK => "NAK",
            Self::CLEAR => "CLEAR",
            Self::END => "END",
        }
    }
}

impl FromStr for CapSubCommand {
    type Err = MessageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LS" => Ok(Self::LS),
            "LIST" => Ok(Self::LIST),
            "REQ" => Ok(Self::REQ),
            "ACK" => Ok(Self::ACK),
            "NAK" => Ok(Self::NAK),
            "CLEAR" => Ok(Self::CLEAR),
            "END" => Ok(Self::END),
            _ => Err(MessageParseError::InvalidSubcommand {
                cmd: "CAP",
                sub: s.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for CapSubCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("LS".parse::<CapSubCommand>().unwrap(), CapSubCommand::LS);
        assert_eq!("clear".parse::<CapSubCommand>().unwrap(), CapSubCommand::CLEAR);
        assert_eq!(
            "NEW".parse::<CapSubCommand>(),
            Err(MessageParseError::InvalidSubcommand {
                cmd: "CAP",
                sub: "NEW".into()
            })
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(CapSubCommand::END.to_string(), "END");
    }
}
