//! PART, QUIT and rename handling.

use nomad_proto::{Message, Prefix, Verb};
use tracing::debug;

use super::{ActorState, ChannelActor, ChannelError, Peer};
use crate::state::ClientId;

impl ChannelActor {
    pub(crate) fn handle_part(
        &mut self,
        id: ClientId,
        prefix: Prefix,
        reason: Option<String>,
    ) -> Result<(), ChannelError> {
        if self.status == ActorState::Draining {
            return Err(ChannelError::Draining);
        }
        if !self.state.members.contains_key(&id) {
            return Err(ChannelError::NotOnChannel);
        }

        let part = match reason {
            Some(ref reason) => {
                Message::verb(Some(prefix), Verb::PART, &[self.state.name.as_str(), reason.as_str()])
            }
            None => Message::verb(Some(prefix), Verb::PART, &[self.state.name.as_str()]),
        };
        // The leaver sees its own PART.
        self.broadcast(&part);
        self.state.members.remove(&id);

        if self.debug.channel {
            debug!(channel = %self.state.name, client = %id, "member parted");
        }
        self.cleanup_if_empty();
        Ok(())
    }

    pub(crate) fn handle_depart(&mut self, id: ClientId) -> Vec<Peer> {
        if self.state.members.remove(&id).is_none() {
            return Vec::new();
        }
        let peers = self.peers_of(id);
        self.cleanup_if_empty();
        peers
    }

    pub(crate) fn handle_rename(&mut self, id: ClientId, nick: String) -> Vec<Peer> {
        match self.state.members.get_mut(&id) {
            Some(member) => member.nick = nick,
            None => return Vec::new(),
        }
        self.peers_of(id)
    }
}
