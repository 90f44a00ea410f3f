//! Line codec for client connections.
//!
//! Frames are newline-terminated (a preceding `\r` is optional). A malformed
//! or over-long line is yielded as an `Err` item rather than a decoder error:
//! `FramedRead` stops after the first decoder error, and a bad line must not
//! end the connection. Over-long input is discarded up to the next newline
//! and reported once.

use std::io;

use bytes::BytesMut;
use nomad_proto::{MAX_LINE_LEN, MAX_REPLY_LEN, Message, ProtocolError};
use tokio_util::codec::{Decoder, Encoder};

/// One decoded inbound line.
pub type Frame = Result<Message, ProtocolError>;

#[derive(Debug, Default)]
pub struct IrcCodec {
    /// Index of next byte to check for newline.
    next_index: usize,
    /// Bytes dropped so far from an over-long line still in progress.
    discarded: Option<usize>,
}

impl IrcCodec {
    pub fn new() -> Self {
        Self::default()
    }

    fn too_long(actual: usize) -> Frame {
        Err(ProtocolError::MessageTooLong {
            actual,
            limit: MAX_REPLY_LEN,
        })
    }
}

impl Decoder for IrcCodec {
    type Item = Frame;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Frame>, io::Error> {
        let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
            if src.len() > MAX_LINE_LEN {
                *self.discarded.get_or_insert(0) += src.len();
                src.clear();
                self.next_index = 0;
            } else {
                self.next_index = src.len();
            }
            return Ok(None);
        };

        let line = src.split_to(self.next_index + offset + 1);
        self.next_index = 0;

        let body = line
            .strip_suffix(b"\n")
            .map(|l| l.strip_suffix(b"\r").unwrap_or(l))
            .unwrap_or(&line[..]);

        if let Some(dropped) = self.discarded.take() {
            return Ok(Some(Self::too_long(dropped + body.len())));
        }
        if body.len() > MAX_REPLY_LEN {
            return Ok(Some(Self::too_long(body.len())));
        }

        Ok(Some(Message::parse_bytes(body)))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Frame>, io::Error> {
        match self.decode(src)? {
            Some(frame) => Ok(Some(frame)),
            None => {
                // A partial line at EOF is dropped.
                src.clear();
                self.next_index = 0;
                self.discarded = None;
                Ok(None)
            }
        }
    }
}

impl Encoder<Message> for IrcCodec {
    type Error = io::Error;

    fn encode(&mut self, msg: Message, dst: &mut BytesMut) -> Result<(), io::Error> {
        let line = msg.to_line();
        dst.reserve(line.len());
        dst.extend_from_slice(line.as_bytes());
        Ok(())
    }
}
