//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use std::collections::HashSet;

use nomad_proto::Capability;
use thiserror::Error;

use super::{Config, TimeoutsConfig};

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("server.name must be a single token, got '{0}'")]
    InvalidServerName(String),
    #[error("server.network is required")]
    MissingNetworkName,
    #[error("unknown or unimplemented capability '{0}'")]
    UnknownCapability(String),
    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),
    #[error("timeouts.{0} must be at most 604800 seconds (one week)")]
    TimeoutTooLong(&'static str),
    #[error("oper block name is required")]
    MissingOperName,
    #[error("duplicate oper block '{0}'")]
    DuplicateOper(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Required fields
    let name = &config.server.name;
    if name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    } else if name.contains([' ', ':', '!', '@']) {
        errors.push(ValidationError::InvalidServerName(name.clone()));
    }
    if config.server.network.is_empty() {
        errors.push(ValidationError::MissingNetworkName);
    }

    for cap in &config.capabilities {
        let known = cap
            .parse::<Capability>()
            .is_ok_and(Capability::is_implemented);
        if !known {
            errors.push(ValidationError::UnknownCapability(cap.clone()));
        }
    }

    let timeouts = &config.timeouts;
    for (field, value) in [
        ("login", timeouts.login),
        ("idle", timeouts.idle),
        ("quit", timeouts.quit),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(field));
        } else if value > TimeoutsConfig::MAX_SECS {
            errors.push(ValidationError::TimeoutTooLong(field));
        }
    }

    let mut seen = HashSet::new();
    for oper in &config.oper {
        if oper.name.is_empty() {
            errors.push(ValidationError::MissingOperName);
        } else if !seen.insert(oper.name.as_str()) {
            errors.push(ValidationError::DuplicateOper(oper.name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Config {
        toml.parse().unwrap()
    }

    #[test]
    fn valid_minimal_config() {
        let config = parse(
            r#"
            [server]
            name = "irc.nomad.example"
            network = "Nomad"
            "#,
        );
        assert_eq!(validate(&config), Ok(()));
    }

    #[test]
    fn collects_every_error() {
        let config = parse(
            r#"
            capabilities = ["multi-prefix", "sasl", "server-time"]

            [server]
            name = ""
            network = ""

            [timeouts]
            login = 0

            [[oper]]
            name = "root"
            password = "a"

            [[oper]]
            name = "root"
            password = "b"
            "#,
        );
        let errors = validate(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingServerName,
                ValidationError::MissingNetworkName,
                ValidationError::UnknownCapability("sasl".into()),
                ValidationError::UnknownCapability("server-time".into()),
                ValidationError::ZeroTimeout("login"),
                ValidationError::DuplicateOper("root".into()),
            ]
        );
    }

    #[test]
    fn server_name_must_be_one_token() {
        let config = parse(
            r#"
            [server]
            name = "irc nomad"
            network = "Nomad"
            "#,
        );
        assert_eq!(
            validate(&config),
            Err(vec![ValidationError::InvalidServerName("irc nomad".into())])
        );
    }

    #[test]
    fn timeouts_have_an_upper_bound() {
        let config = parse(
            r#"
            [server]
            name = "irc.nomad.example"
            network = "Nomad"

            [timeouts]
            idle = 604800
            quit = 9223372036854775807
            "#,
        );
        assert_eq!(
            validate(&config),
            Err(vec![ValidationError::TimeoutTooLong("quit")])
        );
    }
}
