//! JOIN event handling.
//!
//! Processes channel join requests with ban/invite/key/limit validation.

use nomad_proto::{ChannelMode, Message, Verb};
use tracing::debug;

use super::{ActorState, ChannelActor, ChannelError, JoinParams, JoinReply};
use crate::state::{Member, MemberModes};

impl ChannelActor {
    pub(crate) fn handle_join(&mut self, params: JoinParams) -> Result<JoinReply, ChannelError> {
        let JoinParams {
            id,
            nick,
            prefix,
            sender,
            multi_prefix,
            key,
        } = params;

        if self.status == ActorState::Draining {
            return Err(ChannelError::Draining);
        }

        if !self.state.members.contains_key(&id) {
            let mask = prefix.to_string();
            let invited = self.state.is_invex(&mask);

            // Invite exceptions exempt from bans and +i.
            if !invited && self.state.is_banned(&mask) {
                return Err(ChannelError::BannedFromChan);
            }
            if !invited && self.state.flags.contains(&ChannelMode::InviteOnly) {
                return Err(ChannelError::InviteOnlyChan);
            }
            if let Some(ref expected) = self.state.key
                && key.as_deref() != Some(expected.as_str())
            {
                return Err(ChannelError::BadChannelKey);
            }
            if let Some(limit) = self.state.limit
                && self.state.members.len() >= limit
            {
                return Err(ChannelError::ChannelIsFull);
            }

            let first = self.state.members.is_empty();
            self.state.members.insert(
                id,
                Member {
                    nick,
                    modes: MemberModes {
                        op: first,
                        voice: false,
                    },
                    sender,
                },
            );

            if self.debug.channel {
                debug!(channel = %self.state.name, client = %id, op = first, "member joined");
            }

            let join = Message::verb(Some(prefix), Verb::JOIN, &[self.state.name.as_str()]);
            self.broadcast(&join);
        }

        Ok(JoinReply {
            channel: self.state.name.clone(),
            symbol: self.state.names_symbol(),
            names: self.state.names(multi_prefix),
        })
    }
}
