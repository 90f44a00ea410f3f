//! State management module.
//!
//! Contains the Matrix (shared server state), per-connection sessions,
//! the registration state machines and the channel actors.

mod actor;
mod channel;
mod machine;
mod matrix;
mod session;
mod user;

pub use actor::{
    ChannelActor, ChannelEvent, ChannelHandle, JoinParams, JoinReply, ModeReply, ModeSnapshot,
    Peer,
};
pub use channel::{ChannelState, ListEntry, Member, MemberModes};
pub use machine::{CapState, CapTransitionError, Phase, Registration, RegistrationError};
pub use matrix::{Lusers, Matrix, ServerInfo};
pub use session::Session;
pub use user::{ClientId, UserRecord};
