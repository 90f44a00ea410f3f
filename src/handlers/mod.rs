//! IRC command handlers.
//!
//! Each handler receives the parsed [`Message`](nomad_proto::Message) and a
//! [`Context`] holding the connection's [`Session`](crate::state::Session)
//! and the shared [`Matrix`](crate::state::Matrix). Recoverable failures
//! are returned as [`HandlerError`](crate::error::HandlerError)s and
//! rendered by the connection driver.

mod cap;
mod channel;
mod connection;
mod core;
mod mode;
mod oper;
mod server_query;
mod user_status;

pub use self::core::{Context, Handler, Registry};
pub use cap::CapHandler;
pub use channel::{JoinHandler, PartHandler};
pub use connection::{
    NickHandler, PassHandler, PingHandler, PongHandler, QuitHandler, UserHandler,
    try_complete_registration,
};
pub use mode::ModeHandler;
pub use oper::OperHandler;
pub use server_query::{MotdHandler, send_motd};
pub use user_status::AwayHandler;
