//! Line parsing.
//!
//! Grammar: `[':' prefix SP] verb *(SP param) [SP ':' trailing]`. A verb is
//! either letters or exactly three digits naming a numeric in 1-999.

use std::str::FromStr;

use crate::command::{Command, Verb};
use crate::error::{extract_command_hint, MessageParseError, ProtocolError};
use crate::prefix::Prefix;
use crate::response::Response;

use super::{Message, MAX_REPLY_LEN};

fn invalid(line: &str, cause: MessageParseError) -> ProtocolError {
    ProtocolError::InvalidMessage {
        string: line.to_owned(),
        cause,
    }
}

fn classify_verb(verb: &str, params: Vec<String>) -> Result<Command, MessageParseError> {
    if verb.bytes().all(|b| b.is_ascii_digit()) {
        let code = match verb.parse::<u16>() {
            Ok(code @ 1..=999) if verb.len() == 3 => code,
            _ => return Err(MessageParseError::MalformedNumeric(verb.to_owned())),
        };
        return Ok(match Response::from_code(code) {
            Some(resp) => Command::Response(resp, params),
            None => Command::Raw(verb.to_owned(), params),
        });
    }

    if verb.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Ok(match Verb::from_str(verb) {
            Ok(known) => Command::Verb(known, params),
            Err(()) => Command::Raw(verb.to_ascii_uppercase(), params),
        });
    }

    Err(MessageParseError::InvalidCommand(verb.to_owned()))
}

impl Message {
    /// Parse one line. A trailing `\r\n` (or bare `\n`) is ignored.
    pub fn parse(line: &str) -> Result<Message, ProtocolError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return Err(invalid(line, MessageParseError::EmptyLine));
        }
        if line.len() > MAX_REPLY_LEN {
            return Err(ProtocolError::MessageTooLong {
                actual: line.len(),
                limit: MAX_REPLY_LEN,
            });
        }

        let mut rest = line;
        let prefix = if let Some(stripped) = rest.strip_prefix(':') {
            let (raw_prefix, tail) = stripped
                .split_once(' ')
                .ok_or_else(|| invalid(line, MessageParseError::MissingCommand))?;
            rest = tail;
            Some(Prefix::parse(raw_prefix).map_err(|cause| invalid(line, cause))?)
        } else {
            None
        };

        rest = rest.trim_start_matches(' ');
        let (verb, mut rest) = rest.split_once(' ').unwrap_or((rest, ""));
        if verb.is_empty() {
            return Err(invalid(line, MessageParseError::MissingCommand));
        }

        let mut params = Vec::new();
        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }
            if let Some(trailing) = rest.strip_prefix(':') {
                params.push(trailing.to_owned());
                break;
            }
            let (param, tail) = rest.split_once(' ').unwrap_or((rest, ""));
            params.push(param.to_owned());
            rest = tail;
        }

        let command = classify_verb(verb, params).map_err(|cause| invalid(line, cause))?;
        Ok(Message { prefix, command })
    }

    /// Parse one line from raw bytes.
    pub fn parse_bytes(line: &[u8]) -> Result<Message, ProtocolError> {
        match std::str::from_utf8(line) {
            Ok(text) => Message::parse(text),
            Err(e) => {
                let valid = String::from_utf8_lossy(&line[..e.valid_up_to()]);
                Err(ProtocolError::InvalidUtf8 {
                    byte_pos: e.valid_up_to(),
                    command_hint: extract_command_hint(&valid).map(str::to_owned),
                })
            }
        }
    }
}

impl FromStr for Message {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Message, Self::Err> {
        Message::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cause(line: &str) -> MessageParseError {
        match Message::parse(line) {
            Err(ProtocolError::InvalidMessage { cause, .. }) => cause,
            other => panic!("expected parse error for {:?}, got {:?}", line, other),
        }
    }

    #[test]
    fn test_simple_verb() {
        let msg = Message::parse("NICK dan\r\n").unwrap();
        assert_eq!(msg.prefix, None);
        assert_eq!(msg.command, Command::Verb(Verb::NICK, vec!["dan".into()]));
    }

    #[test]
    fn test_prefix_and_trailing() {
        let msg = Message::parse(":dan!d@h PRIVMSG #nomad :hello  there : friend").unwrap();
        assert_eq!(msg.source_nickname(), Some("dan"));
        assert_eq!(
            msg.command.params(),
            ["#nomad", "hello  there : friend"]
        );
    }

    #[test]
    fn test_empty_trailing_is_kept() {
        let msg = Message::parse("QUIT :").unwrap();
        assert_eq!(msg.command.params(), [""]);
    }

    #[test]
    fn test_repeated_spaces_between_params() {
        let msg = Message::parse("USER  u   0 *  :Real Name").unwrap();
        assert_eq!(msg.command.params(), ["u", "0", "*", "Real Name"]);
    }

    #[test]
    fn test_numeric_verbs() {
        let msg = Message::parse(":srv.example 433 * dan :Nickname is already in use").unwrap();
        assert!(matches!(msg.command, Command::Response(Response::ERR_NICKNAMEINUSE, _)));

        let msg = Message::parse("999 x").unwrap();
        assert_eq!(msg.command, Command::Raw("999".into(), vec!["x".into()]));
    }

    #[test]
    fn test_malformed_numerics() {
        assert_eq!(cause("000 x"), MessageParseError::MalformedNumeric("000".into()));
        assert_eq!(cause("01 x"), MessageParseError::MalformedNumeric("01".into()));
        assert_eq!(cause("1000 x"), MessageParseError::MalformedNumeric("1000".into()));
    }

    #[test]
    fn test_empty_and_missing() {
        assert_eq!(cause(""), MessageParseError::EmptyLine);
        assert_eq!(cause("\r\n"), MessageParseError::EmptyLine);
        assert_eq!(cause(":only.prefix"), MessageParseError::MissingCommand);
        assert_eq!(cause("   "), MessageParseError::MissingCommand);
        assert_eq!(cause("N1CK dan"), MessageParseError::InvalidCommand("N1CK".into()));
    }

    #[test]
    fn test_unknown_verb_is_raw() {
        let msg = Message::parse("squit srv").unwrap();
        assert_eq!(msg.command, Command::Raw("SQUIT".into(), vec!["srv".into()]));
    }

    #[test]
    fn test_too_long() {
        let line = format!("PRIVMSG #a :{}", "x".repeat(600));
        assert!(matches!(
            Message::parse(&line),
            Err(ProtocolError::MessageTooLong { limit: MAX_REPLY_LEN, .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_keeps_command_hint() {
        let err = Message::parse_bytes(b"PRIVMSG #a :\xff\xfe").unwrap_err();
        assert_eq!(err.command_hint(), Some("PRIVMSG"));
        assert!(matches!(err, ProtocolError::InvalidUtf8 { byte_pos: 12, .. }));
    }
}
