//! Per-connection session state.
//!
//! A [`Session`] is owned by exactly one connection task and is never
//! shared. It carries the registration and CAP state machines, the
//! negotiated capability set and, once registered, a handle to the
//! user's record in the Matrix.

use std::collections::HashSet;
use std::sync::Arc;

use nomad_proto::{Capability, CapabilitySet, Message};
use parking_lot::RwLock;
use tokio::sync::mpsc;

use super::{ClientId, Registration, UserRecord};

/// State of one client connection.
#[derive(Debug)]
pub struct Session {
    pub id: ClientId,
    /// Hostname shown in the user's prefix.
    pub host: String,
    pub registration: Registration,
    pub nick: Option<String>,
    pub user: Option<String>,
    pub realname: Option<String>,
    /// Capabilities this client negotiated. Every key is supported by the
    /// server.
    pub caps: CapabilitySet,
    /// Capabilities acknowledged with `=`; CLEAR and `-cap` leave them on.
    pub sticky: HashSet<String>,
    /// Capabilities acknowledged with `~`, waiting for the client's ACK.
    pub pending_ack: HashSet<String>,
    /// Outbound queue of this connection, handed to channel actors.
    pub sender: mpsc::Sender<Message>,
    /// Set once registration completes.
    pub record: Option<Arc<RwLock<UserRecord>>>,
    /// Set by QUIT; the driver closes the connection after the handler.
    pub quit: Option<String>,
}

impl Session {
    pub fn new(
        id: ClientId,
        host: impl Into<String>,
        password_required: bool,
        sender: mpsc::Sender<Message>,
    ) -> Self {
        Self {
            id,
            host: host.into(),
            registration: Registration::new(password_required),
            nick: None,
            user: None,
            realname: None,
            caps: CapabilitySet::new(),
            sticky: HashSet::new(),
            pending_ack: HashSet::new(),
            sender,
            record: None,
            quit: None,
        }
    }

    /// Nickname for numeric replies: `*` until one is set.
    pub fn nick_or_star(&self) -> &str {
        self.nick.as_deref().unwrap_or("*")
    }

    pub fn multi_prefix(&self) -> bool {
        self.caps.is_enabled(Capability::MultiPrefix.as_str())
    }

    pub fn is_registered(&self) -> bool {
        self.registration.is_normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session() {
        let (tx, _rx) = mpsc::channel(1);
        let mut session = Session::new(ClientId(1), "localhost", false, tx);
        assert_eq!(session.nick_or_star(), "*");
        assert!(!session.is_registered());
        assert!(!session.multi_prefix());

        session.nick = Some("dan".into());
        session.caps.set("multi-prefix", true);
        assert_eq!(session.nick_or_star(), "dan");
        assert!(session.multi_prefix());
    }
}
