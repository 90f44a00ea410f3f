//! Core handler infrastructure: the per-command [`Context`], the
//! [`Handler`] trait and the [`Registry`] that dispatches to it.

pub mod context;
pub mod registry;

pub use context::{Context, Handler};
pub use registry::Registry;
