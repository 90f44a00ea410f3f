//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use super::oper::OperBlock;
use super::validation::{self, ValidationError};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server information.
    pub server: ServerConfig,
    /// Connection timers.
    #[serde(default)]
    pub timeouts: TimeoutsConfig,
    /// Per-component debug logging.
    #[serde(default)]
    pub debug: DebugFlags,
    /// Capabilities offered in `CAP LS`.
    #[serde(default = "default_capabilities")]
    pub capabilities: Vec<String>,
    /// Operator blocks.
    #[serde(default)]
    pub oper: Vec<OperBlock>,
    /// Message of the Day configuration.
    #[serde(default)]
    pub motd: MotdConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(content.parse()?)
    }

    /// Check the loaded values, returning every problem found.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        validation::validate(self)
    }
}

impl FromStr for Config {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name (e.g., "irc.nomad.example").
    pub name: String,
    /// Network name (e.g., "Nomad").
    pub network: String,
    /// Version string sent in RPL_YOURHOST and RPL_MYINFO.
    #[serde(default = "default_version")]
    pub version: String,
    /// Connection password (plaintext or bcrypt hash).
    pub password: Option<String>,
}

/// Connection timers, in seconds.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TimeoutsConfig {
    /// Time allowed to finish registration (default: 30).
    #[serde(default = "default_login_timeout")]
    pub login: u64,
    /// Silence before the server sends PING (default: 60).
    #[serde(default = "default_idle_timeout")]
    pub idle: u64,
    /// Further silence after PING before disconnect (default: 60).
    #[serde(default = "default_quit_timeout")]
    pub quit: u64,
}

impl TimeoutsConfig {
    /// Longest accepted timer: one week.
    pub const MAX_SECS: u64 = 7 * 24 * 60 * 60;

    /// Durations are capped at [`Self::MAX_SECS`] so deadlines computed
    /// from them cannot overflow.
    pub fn login(&self) -> Duration {
        Self::capped(self.login)
    }

    pub fn idle(&self) -> Duration {
        Self::capped(self.idle)
    }

    pub fn quit(&self) -> Duration {
        Self::capped(self.quit)
    }

    fn capped(secs: u64) -> Duration {
        Duration::from_secs(secs.min(Self::MAX_SECS))
    }
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            login: default_login_timeout(),
            idle: default_idle_timeout(),
            quit: default_quit_timeout(),
        }
    }
}

/// Per-component debug logging switches.
///
/// A set flag makes that component log each line or event at `debug` level.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub struct DebugFlags {
    /// Raw inbound and outbound lines.
    #[serde(default)]
    pub net: bool,
    /// Session state transitions.
    #[serde(default)]
    pub client: bool,
    /// Channel actor events.
    #[serde(default)]
    pub channel: bool,
    /// Server-wide registries.
    #[serde(default)]
    pub server: bool,
}

/// Message of the Day (MOTD) configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MotdConfig {
    /// Path to MOTD file (one line per MOTD line).
    pub file: Option<String>,
    /// Inline MOTD lines (used when `file` is not set).
    #[serde(default)]
    pub lines: Vec<String>,
}

impl MotdConfig {
    /// Load MOTD lines from file, falling back to the inline lines.
    ///
    /// An empty result means no MOTD is configured.
    pub fn load_lines(&self) -> Vec<String> {
        if let Some(ref path) = self.file {
            match std::fs::read_to_string(path) {
                Ok(content) => {
                    return content.lines().map(|s| s.to_string()).collect();
                }
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "Failed to read MOTD file");
                }
            }
        }
        self.lines.clone()
    }
}

fn default_version() -> String {
    format!("nomad-{}", env!("CARGO_PKG_VERSION"))
}

fn default_capabilities() -> Vec<String> {
    vec!["multi-prefix".to_string()]
}

fn default_login_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    60
}

fn default_quit_timeout() -> u64 {
    60
}
