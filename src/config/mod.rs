//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig, TimeoutsConfig)
//! - [`oper`]: Operator block configuration (OperBlock)
//! - [`validation`]: Startup checks (ValidationError)

mod oper;
mod types;
mod validation;

pub use oper::OperBlock;
pub use types::{Config, ConfigError, DebugFlags, MotdConfig, ServerConfig, TimeoutsConfig};
pub use validation::ValidationError;
