use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

use crate::command::is_middle_safe;
use crate::error::ProtocolError;

use super::{Message, CRLF, MAX_REPLY_LEN};

impl Display for Message {
    /// The line payload, without terminator or length bound.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(ref prefix) = self.prefix {
            write!(f, ":{} ", prefix)?;
        }
        write!(f, "{}", self.command)
    }
}

/// Bytes that would split one message into several lines.
const LINE_BREAKS: [char; 3] = ['\r', '\n', '\0'];

/// Written in place of a middle parameter that cannot go on the wire.
const WITHHELD_PARAM: &str = "*";

/// Replace line-breaking bytes with spaces.
fn scrub(payload: String) -> String {
    if payload.contains(LINE_BREAKS) {
        payload.replace(LINE_BREAKS, " ")
    } else {
        payload
    }
}

impl Message {
    /// The message as it may be written: line breaks inside parameters
    /// become spaces, and middle parameters that are still unsafe are
    /// replaced by `*` so the field count survives a reparse.
    fn wire_form(&self) -> Cow<'_, Message> {
        let dirty = self.command.params().iter().any(|p| p.contains(LINE_BREAKS))
            || self.command.unsafe_middle_param().is_some();
        if !dirty {
            return Cow::Borrowed(self);
        }

        let mut msg = self.clone();
        let params = msg.command.params_mut();
        let middle = params.len().saturating_sub(1);
        for (idx, param) in params.iter_mut().enumerate() {
            if param.contains(LINE_BREAKS) {
                *param = param.replace(LINE_BREAKS, " ");
            }
            if idx < middle && !is_middle_safe(param) {
                *param = WITHHELD_PARAM.to_owned();
            }
        }
        Cow::Owned(msg)
    }

    /// Serialize to a CRLF-terminated line, truncating the payload to
    /// [`MAX_REPLY_LEN`] bytes on a character boundary.
    ///
    /// Never emits a line that reparses into different parameters: an
    /// unsafe middle parameter is withheld (see [`Message::try_to_line`]
    /// for the strict variant).
    pub fn to_line(&self) -> String {
        let mut payload = scrub(self.wire_form().to_string());
        if payload.len() > MAX_REPLY_LEN {
            let mut cut = MAX_REPLY_LEN;
            while !payload.is_char_boundary(cut) {
                cut -= 1;
            }
            payload.truncate(cut);
        }
        payload.push_str(CRLF);
        payload
    }

    /// Serialize to a CRLF-terminated line, rejecting over-long payloads
    /// and middle parameters that [`is_middle_safe`] refuses.
    pub fn try_to_line(&self) -> Result<String, ProtocolError> {
        if let Some(index) = self.command.unsafe_middle_param() {
            return Err(ProtocolError::UnsafeParam {
                index,
                param: self.command.params()[index].clone(),
            });
        }
        let mut payload = scrub(self.wire_form().to_string());
        if payload.len() > MAX_REPLY_LEN {
            return Err(ProtocolError::MessageTooLong {
                actual: payload.len(),
                limit: MAX_REPLY_LEN,
            });
        }
        payload.push_str(CRLF);
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Response, Verb, MAX_LINE_LEN};

    #[test]
    fn test_numeric_layout() {
        let msg = Message::numeric(
            "irc.nomad.example",
            Response::ERR_NEEDMOREPARAMS,
            &["dan", "MODE", "Not enough parameters"],
        );
        assert_eq!(
            msg.to_line(),
            ":irc.nomad.example 461 dan MODE :Not enough parameters\r\n"
        );
    }

    #[test]
    fn test_truncates_to_line_limit() {
        let long = "é".repeat(400);
        let msg = Message::verb(None, Verb::NOTICE, &["dan", &long]);
        let line = msg.to_line();
        assert!(line.len() <= MAX_LINE_LEN);
        assert!(line.ends_with("\r\n"));
        assert_eq!(line.matches("\r\n").count(), 1);
        assert!(msg.try_to_line().is_err());
    }

    #[test]
    fn test_embedded_newlines_are_scrubbed() {
        let msg = Message::verb(None, Verb::NOTICE, &["dan", "one\r\nQUIT :two"]);
        assert_eq!(msg.to_line(), "NOTICE dan :one  QUIT :two\r\n");

        // A break in a space-free last param must not leave it untrailed.
        let msg = Message::verb(None, Verb::NOTICE, &["dan", "one\ntwo"]);
        assert_eq!(msg.to_line(), "NOTICE dan :one two\r\n");
    }

    #[test]
    fn test_unsafe_middle_params_are_withheld() {
        let msg = Message::numeric(
            "irc.test",
            Response::ERR_ERRONEUSNICKNAME,
            &["*", "a b", "Erroneous nickname"],
        );
        let line = msg.to_line();
        assert_eq!(line, ":irc.test 432 * * :Erroneous nickname\r\n");
        let reparsed: Message = line.parse().unwrap();
        assert_eq!(reparsed.command.params().len(), 3);

        assert_eq!(
            msg.try_to_line(),
            Err(ProtocolError::UnsafeParam {
                index: 1,
                param: "a b".to_owned(),
            })
        );
    }

    #[test]
    fn test_strict_serializer_rejects_each_unsafe_shape() {
        for bad in ["", ":lead", "two words", "line\nbreak"] {
            let msg = Message::numeric("irc.test", Response::RPL_BANLIST, &["dan", bad, "end"]);
            assert!(
                matches!(msg.try_to_line(), Err(ProtocolError::UnsafeParam { index: 1, .. })),
                "{bad:?} accepted"
            );
            let line = msg.to_line();
            let reparsed: Message = line.parse().unwrap();
            assert_eq!(reparsed.command.params(), ["dan", "*", "end"]);
        }

        let ok = Message::numeric("irc.test", Response::RPL_BANLIST, &["dan", "#c", "x!*@*"]);
        assert_eq!(ok.try_to_line().unwrap(), ok.to_line());
    }
}
