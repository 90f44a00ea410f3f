//! Actor model for channel state.
//!
//! Each channel is owned by one [`ChannelActor`] running in its own tokio
//! task. Every read and write of the channel goes through a [`ChannelEvent`]
//! on the actor's queue, so changes to one channel are applied one at a
//! time in receipt order, and concurrent MODE commands from different
//! operators never interleave.
//!
//! An actor whose last member leaves (and which is not `+P`) switches to
//! `Draining`, removes itself from the Matrix and rejects further joins with
//! [`ChannelError::Draining`]; the joiner then retries on a fresh channel.

use std::sync::Weak;

use nomad_proto::{Message, irc_to_lower};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::config::DebugFlags;
use crate::error::ChannelError;
use crate::state::{ChannelState, ClientId, Matrix};

mod handlers;
mod types;

pub use types::*;

/// Capacity of a channel actor's event queue.
const EVENT_QUEUE: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActorState {
    Active,
    Draining,
}

/// Owns the state of a single channel and processes events sequentially.
pub struct ChannelActor {
    /// Distinguishes this actor from a later one for the same name.
    id: u64,
    pub(crate) state: ChannelState,
    matrix: Weak<Matrix>,
    debug: DebugFlags,
    status: ActorState,
}

/// Cloneable handle to a running channel actor.
#[derive(Debug, Clone)]
pub struct ChannelHandle {
    id: u64,
    name: String,
    tx: mpsc::Sender<ChannelEvent>,
}

impl ChannelActor {
    /// Create a channel actor and spawn it.
    pub fn spawn(id: u64, name: String, matrix: Weak<Matrix>, debug: DebugFlags) -> ChannelHandle {
        let (tx, rx) = mpsc::channel(EVENT_QUEUE);
        let actor = Self {
            id,
            state: ChannelState::new(name.clone()),
            matrix,
            debug,
            status: ActorState::Active,
        };

        tokio::spawn(actor.run(rx));

        ChannelHandle { id, name, tx }
    }

    /// The main actor loop. Ends once every handle is dropped.
    pub async fn run(mut self, mut rx: mpsc::Receiver<ChannelEvent>) {
        while let Some(event) = rx.recv().await {
            self.handle_event(event);
        }
        if self.debug.channel {
            debug!(channel = %self.state.name, "channel actor stopped");
        }
    }

    fn handle_event(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::Join { params, reply_tx } => {
                let result = self.handle_join(*params);
                let _ = reply_tx.send(result);
            }
            ChannelEvent::Part {
                id,
                prefix,
                reason,
                reply_tx,
            } => {
                let result = self.handle_part(id, prefix, reason);
                let _ = reply_tx.send(result);
            }
            ChannelEvent::Depart { id, reply_tx } => {
                let peers = self.handle_depart(id);
                let _ = reply_tx.send(peers);
            }
            ChannelEvent::Rename { id, nick, reply_tx } => {
                let peers = self.handle_rename(id, nick);
                let _ = reply_tx.send(peers);
            }
            ChannelEvent::Mode {
                requester,
                prefix,
                changes,
                reply_tx,
            } => {
                let reply = self.handle_mode(requester, prefix, changes);
                let _ = reply_tx.send(reply);
            }
            ChannelEvent::Query { reply_tx } => {
                let _ = reply_tx.send(self.snapshot());
            }
        }
    }

    /// Send to every member, dropping the message for members whose queue
    /// is full.
    fn broadcast(&self, msg: &Message) {
        for (id, member) in &self.state.members {
            if let Err(err) = member.sender.try_send(msg.clone()) {
                debug!(channel = %self.state.name, client = %id, error = %err, "broadcast dropped");
            }
        }
    }

    fn cleanup_if_empty(&mut self) {
        if self.status == ActorState::Draining {
            return;
        }

        let persistent = self
            .state
            .flags
            .contains(&nomad_proto::ChannelMode::Persistent);
        if self.state.members.is_empty() && !persistent {
            self.status = ActorState::Draining;

            if let Some(matrix) = self.matrix.upgrade() {
                let key = irc_to_lower(&self.state.name);
                let id = self.id;
                matrix.channels.remove_if(&key, |_, handle| handle.id == id);
            }
            if self.debug.channel {
                debug!(channel = %self.state.name, "channel drained");
            }
        }
    }
}

impl ChannelHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    async fn request<T>(
        &self,
        event: impl FnOnce(oneshot::Sender<T>) -> ChannelEvent,
    ) -> Result<T, ChannelError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(event(reply_tx))
            .await
            .map_err(|_| ChannelError::Draining)?;
        reply_rx.await.map_err(|_| ChannelError::Draining)
    }

    pub async fn join(&self, params: JoinParams) -> Result<JoinReply, ChannelError> {
        self.request(|reply_tx| ChannelEvent::Join {
            params: Box::new(params),
            reply_tx,
        })
        .await?
    }

    pub async fn part(
        &self,
        id: ClientId,
        prefix: nomad_proto::Prefix,
        reason: Option<String>,
    ) -> Result<(), ChannelError> {
        self.request(|reply_tx| ChannelEvent::Part {
            id,
            prefix,
            reason,
            reply_tx,
        })
        .await?
    }

    /// Leave without a PART; the caller tells the returned peers.
    pub async fn depart(&self, id: ClientId) -> Vec<Peer> {
        self.request(|reply_tx| ChannelEvent::Depart { id, reply_tx })
            .await
            .unwrap_or_default()
    }

    pub async fn rename(&self, id: ClientId, nick: String) -> Vec<Peer> {
        self.request(|reply_tx| ChannelEvent::Rename { id, nick, reply_tx })
            .await
            .unwrap_or_default()
    }

    pub async fn mode(
        &self,
        requester: crate::mode::ChannelRequester,
        prefix: nomad_proto::Prefix,
        changes: Vec<Result<nomad_proto::ModeChange<nomad_proto::ChannelMode>, nomad_proto::ModeError>>,
    ) -> Result<ModeReply, ChannelError> {
        self.request(|reply_tx| ChannelEvent::Mode {
            requester,
            prefix,
            changes,
            reply_tx,
        })
        .await
    }

    pub async fn query(&self) -> Result<ModeSnapshot, ChannelError> {
        self.request(|reply_tx| ChannelEvent::Query { reply_tx }).await
    }
}
