//! User-related types and state.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use nomad_proto::{Message, ModeType, Prefix, UserMode};
use tokio::sync::mpsc;

/// Server-local connection identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(pub u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// A registered user, visible to other connections through the Matrix.
#[derive(Debug)]
pub struct UserRecord {
    pub id: ClientId,
    pub nick: String,
    pub user: String,
    pub realname: String,
    pub host: String,
    pub modes: BTreeSet<UserMode>,
    /// Away message if user is marked away.
    pub away: Option<String>,
    /// Channels this user is in (casefolded names).
    pub channels: HashSet<String>,
    /// Outbound queue of the owning connection.
    pub sender: mpsc::Sender<Message>,
    /// Whether the connection negotiated `multi-prefix`.
    pub multi_prefix: bool,
}

impl UserRecord {
    /// `nick!user@host` prefix for messages this user originates.
    pub fn prefix(&self) -> Prefix {
        Prefix::new(&self.nick, &self.user, &self.host)
    }

    pub fn is_oper(&self) -> bool {
        self.modes.contains(&UserMode::Operator) || self.modes.contains(&UserMode::LocalOperator)
    }

    /// Mode string like "+iw" for RPL_UMODEIS.
    pub fn mode_string(&self) -> String {
        let mut s = String::from("+");
        s.extend(self.modes.iter().map(|m| m.as_char()));
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> UserRecord {
        let (tx, _rx) = mpsc::channel(1);
        UserRecord {
            id: ClientId(7),
            nick: "dan".into(),
            user: "~d".into(),
            realname: "Dan".into(),
            host: "localhost".into(),
            modes: BTreeSet::new(),
            away: None,
            channels: HashSet::new(),
            sender: tx,
            multi_prefix: false,
        }
    }

    #[test]
    fn prefix_and_modes() {
        let mut user = record();
        assert_eq!(user.prefix().to_string(), "dan!~d@localhost");
        assert_eq!(user.mode_string(), "+");
        assert!(!user.is_oper());

        user.modes.insert(UserMode::WallOps);
        user.modes.insert(UserMode::Invisible);
        assert_eq!(user.mode_string(), "+iw");

        user.modes.insert(UserMode::LocalOperator);
        assert!(user.is_oper());
        assert_eq!(UserMode::LocalOperator.as_char(), 'O');
    }

    #[test]
    fn client_id_display() {
        assert_eq!(ClientId(42).to_string(), "c42");
    }
}
