//! Mode Engine.
//!
//! Applies parsed [`ModeChange`](nomad_proto::ModeChange)s to a user or a
//! channel. The letter table lives in `nomad_proto::mode`; the rules about
//! who may change what live here.

pub mod channel;
pub mod engine;
pub mod user;

pub use channel::ChannelRequester;
pub use engine::{ModeOutcome, ModeRejection, ModeTarget, Mutation, apply};
pub use user::UserRequester;
