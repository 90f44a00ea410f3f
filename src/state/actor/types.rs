use nomad_proto::{ChannelMode, Message, ModeChange, ModeError, Prefix};
use tokio::sync::{mpsc, oneshot};

use crate::error::ChannelError;
use crate::mode::{ChannelRequester, ModeOutcome};
use crate::state::{ClientId, ListEntry};

/// Parameters for a JOIN.
#[derive(Debug)]
pub struct JoinParams {
    pub id: ClientId,
    pub nick: String,
    /// `nick!user@host`, checked against the ban and invite lists.
    pub prefix: Prefix,
    pub sender: mpsc::Sender<Message>,
    pub multi_prefix: bool,
    pub key: Option<String>,
}

/// What the joiner needs to finish the NAMES reply.
#[derive(Debug, Clone)]
pub struct JoinReply {
    /// Channel name as created.
    pub channel: String,
    pub symbol: &'static str,
    pub names: Vec<String>,
}

/// Another member that should hear about a rename or quit.
#[derive(Debug, Clone)]
pub struct Peer {
    pub id: ClientId,
    pub sender: mpsc::Sender<Message>,
}

/// Snapshot answering a MODE query.
#[derive(Debug, Clone)]
pub struct ModeSnapshot {
    pub channel: String,
    /// RPL_CHANNELMODEIS parameters.
    pub params: Vec<String>,
    pub created: i64,
}

/// Result of a MODE change request.
#[derive(Debug)]
pub struct ModeReply {
    pub outcome: ModeOutcome<ChannelMode>,
    /// Contents of every list mode that was queried.
    pub lists: Vec<(ChannelMode, Vec<ListEntry>)>,
    pub snapshot: ModeSnapshot,
}

/// Events that can be sent to a channel actor.
#[derive(Debug)]
pub enum ChannelEvent {
    Join {
        params: Box<JoinParams>,
        reply_tx: oneshot::Sender<Result<JoinReply, ChannelError>>,
    },
    Part {
        id: ClientId,
        prefix: Prefix,
        reason: Option<String>,
        reply_tx: oneshot::Sender<Result<(), ChannelError>>,
    },
    /// Connection closing: leave silently, return the remaining members.
    Depart {
        id: ClientId,
        reply_tx: oneshot::Sender<Vec<Peer>>,
    },
    Rename {
        id: ClientId,
        nick: String,
        reply_tx: oneshot::Sender<Vec<Peer>>,
    },
    Mode {
        requester: ChannelRequester,
        prefix: Prefix,
        changes: Vec<Result<ModeChange<ChannelMode>, ModeError>>,
        reply_tx: oneshot::Sender<ModeReply>,
    },
    Query {
        reply_tx: oneshot::Sender<ModeSnapshot>,
    },
}
