//! nomad-ircd - Nomad IRC Daemon
//!
//! The session core of an IRC server: connection registration, IRCv3
//! capability negotiation, and user and channel modes. Wire-level parsing
//! lives in `nomad-proto`; this crate owns per-connection and server-wide
//! state and the handlers that drive them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod mode;
pub mod network;
pub mod security;
pub mod state;
