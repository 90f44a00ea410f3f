//! Operator command handlers.

mod auth;

pub use auth::OperHandler;
