//! Server query handlers.

mod motd;

pub use motd::{MotdHandler, send_motd};
