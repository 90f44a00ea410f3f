//! # nomad-proto
//!
//! The protocol half of nomad-ircd: everything that can be decided from a
//! single line of IRC without looking at server state.
//!
//! ## Features
//!
//! - Line codec: parse a raw line into a [`Message`], serialize a [`Message`]
//!   back into a CRLF-terminated line bounded by [`MAX_LINE_LEN`]
//! - Closed command set ([`Verb`]) and numeric reply table ([`Response`])
//! - Static user/channel mode table with argument arity ([`mode`])
//! - Capability registry and CAP token modifiers ([`caps`])
//! - Nickname and channel name validation, RFC 1459 casemapping
//!
//! ## Quick Start
//!
//! ```rust
//! use nomad_proto::{Command, Message, Verb};
//!
//! let msg: Message = "NICK dan".parse().unwrap();
//! assert_eq!(msg.command, Command::Verb(Verb::NICK, vec!["dan".to_string()]));
//! assert_eq!(msg.to_line(), "NICK dan\r\n");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod caps;
pub mod casemap;
pub mod chan;
pub mod command;
pub mod error;
pub mod message;
pub mod mode;
pub mod nick;
pub mod prefix;
pub mod response;

pub use self::caps::{CapModifier, CapRegistry, CapToken, Capability, CapabilitySet};
pub use self::casemap::{irc_eq, irc_lower_char, irc_to_lower, mask_match};
pub use self::chan::ChannelExt;
pub use self::command::{is_middle_safe, CapSubCommand, Command, Verb};
pub use self::error::{MessageParseError, ModeError, ProtocolError};
pub use self::message::{Message, CRLF, MAX_LINE_LEN, MAX_REPLY_LEN};
pub use self::mode::{
    Arity, ChannelMode, ModeChange, ModeKind, ModeOp, ModeType, TargetKind, UserMode,
};
pub use self::nick::NickExt;
pub use self::prefix::Prefix;
pub use self::response::{Response, ResponseCategory};
