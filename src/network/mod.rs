//! Network module.
//!
//! Contains the line codec and the per-connection driver.

pub mod codec;
mod connection;

pub use codec::IrcCodec;
pub use connection::Connection;
