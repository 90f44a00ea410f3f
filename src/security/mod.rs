//! Credential verification.

pub mod password;

pub use password::{ConfigCredentials, CredentialStore};
