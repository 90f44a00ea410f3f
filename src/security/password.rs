//! Password verification for the connection password and operator blocks.
//!
//! Stored secrets starting with `$2` are bcrypt hashes; anything else is
//! compared as plaintext in constant time.

use subtle::ConstantTimeEq;

use crate::config::{Config, OperBlock};

/// Verify `given` against a stored secret (plaintext or bcrypt).
pub fn verify_secret(stored: &str, given: &str) -> bool {
    if stored.starts_with("$2") {
        bcrypt::verify(given, stored).unwrap_or(false)
    } else {
        stored.as_bytes().ct_eq(given.as_bytes()).into()
    }
}

/// Credential checks consumed by PASS and OPER.
pub trait CredentialStore: Send + Sync {
    /// Whether a connection must send a valid PASS before registering.
    fn requires_password(&self) -> bool;

    /// Check a PASS argument.
    fn verify_password(&self, password: &str) -> bool;

    /// Check an OPER name/password pair. `None` when no block has that name.
    fn verify_oper(&self, name: &str, password: &str) -> Option<bool>;
}

/// Credentials taken from the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigCredentials {
    password: Option<String>,
    opers: Vec<OperBlock>,
}

impl ConfigCredentials {
    pub fn new(password: Option<String>, opers: Vec<OperBlock>) -> Self {
        Self { password, opers }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.server.password.clone(), config.oper.clone())
    }
}

impl CredentialStore for ConfigCredentials {
    fn requires_password(&self) -> bool {
        self.password.is_some()
    }

    fn verify_password(&self, password: &str) -> bool {
        match self.password {
            Some(ref stored) => verify_secret(stored, password),
            None => true,
        }
    }

    fn verify_oper(&self, name: &str, password: &str) -> Option<bool> {
        self.opers
            .iter()
            .find(|block| block.name == name)
            .map(|block| block.verify_password(password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plaintext_secret() {
        assert!(verify_secret("hunter2", "hunter2"));
        assert!(!verify_secret("hunter2", "hunter3"));
        assert!(!verify_secret("hunter2", "hunter"));
    }

    #[test]
    fn bcrypt_secret() {
        let hash = bcrypt::hash("letmein", 4).unwrap();
        assert!(verify_secret(&hash, "letmein"));
        assert!(!verify_secret(&hash, "letmeout"));
    }

    #[test]
    fn malformed_bcrypt_hash_never_matches() {
        assert!(!verify_secret("$2b$not-a-hash", "$2b$not-a-hash"));
    }

    #[test]
    fn config_credentials() {
        let creds = ConfigCredentials::new(
            Some("sesame".into()),
            vec![OperBlock {
                name: "root".into(),
                password: "toor".into(),
            }],
        );
        assert!(creds.requires_password());
        assert!(creds.verify_password("sesame"));
        assert!(!creds.verify_password("open"));
        assert_eq!(creds.verify_oper("root", "toor"), Some(true));
        assert_eq!(creds.verify_oper("root", "nope"), Some(false));
        assert_eq!(creds.verify_oper("admin", "toor"), None);

        let open = ConfigCredentials::default();
        assert!(!open.requires_password());
        assert!(open.verify_password("anything"));
    }
}
