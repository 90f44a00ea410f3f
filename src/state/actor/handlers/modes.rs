//! MODE event handling.
//!
//! Runs the Mode Engine against the channel state and tells every member
//! about the changes that took effect.

use nomad_proto::{ChannelMode, Command, Message, ModeChange, ModeError, Prefix, Verb};
use tracing::debug;

use super::{ChannelActor, ModeReply};
use crate::mode::{self, ChannelRequester};

impl ChannelActor {
    pub(crate) fn handle_mode(
        &mut self,
        requester: ChannelRequester,
        prefix: Prefix,
        changes: Vec<Result<ModeChange<ChannelMode>, ModeError>>,
    ) -> ModeReply {
        let outcome = mode::apply(&mut self.state, &requester, changes);
        self.state.stamp_setter(&outcome.applied, &requester.mask);

        let confirmation = outcome.confirmation();
        if !confirmation.is_empty() {
            if self.debug.channel {
                debug!(
                    channel = %self.state.name,
                    client = %requester.id,
                    modes = %confirmation.join(" "),
                    "modes applied"
                );
            }
            let mut params = Vec::with_capacity(confirmation.len() + 1);
            params.push(self.state.name.clone());
            params.extend(confirmation);
            let msg = Message::from(Command::Verb(Verb::MODE, params)).with_prefix(prefix);
            self.broadcast(&msg);
        }

        let lists = outcome
            .queries
            .iter()
            .filter_map(|m| self.state.list(*m).map(|entries| (*m, entries.clone())))
            .collect();

        ModeReply {
            outcome,
            lists,
            snapshot: self.snapshot(),
        }
    }
}
