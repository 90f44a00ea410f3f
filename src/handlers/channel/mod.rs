//! Channel command handlers.
//!
//! Handles JOIN and PART. Both accept a comma-separated channel list; a
//! failure on one channel is reported and the rest are still processed.

mod join;
mod part;

pub use join::JoinHandler;
pub use part::PartHandler;

use nomad_proto::Verb;

use super::Context;
use crate::error::{ChannelError, HandlerError};

/// Queue the numeric for a per-channel failure and carry on with the list.
fn report(ctx: &mut Context<'_>, verb: Verb, channel: &str, error: ChannelError) {
    let err = HandlerError::Channel {
        channel: channel.to_owned(),
        error,
    };
    let nick = ctx.nick();
    if let Some(reply) = err.to_irc_reply(ctx.server_name(), &nick, verb.as_str()) {
        ctx.send(reply);
    }
}

/// Split a comma-separated target list, dropping empty entries.
fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_entries_are_skipped() {
        let names: Vec<_> = split_list("#a,,#b, ").collect();
        assert_eq!(names, vec!["#a", "#b"]);
    }
}
