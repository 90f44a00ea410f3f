//! Channel actor event handlers.
//!
//! Each submodule handles a category of [`ChannelEvent`](super::ChannelEvent)
//! messages processed by [`ChannelActor`](super::ChannelActor).

use super::*;

mod join;
mod modes;
mod part_quit;

impl ChannelActor {
    pub(crate) fn snapshot(&self) -> ModeSnapshot {
        ModeSnapshot {
            channel: self.state.name.clone(),
            params: self.state.mode_params(),
            created: self.state.created.timestamp(),
        }
    }

    /// Every member except `id`.
    fn peers_of(&self, id: ClientId) -> Vec<Peer> {
        self.state
            .members
            .iter()
            .filter(|(member, _)| **member != id)
            .map(|(member, m)| Peer {
                id: *member,
                sender: m.sender.clone(),
            })
            .collect()
    }
}
