//! The Matrix - central shared state for the server.
//!
//! Holds registered users, reserved nicknames and channel handles in
//! concurrent maps reachable from every connection task.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use nomad_proto::{CapRegistry, Capability, UserMode, irc_to_lower};
use parking_lot::RwLock;

use super::{ChannelActor, ChannelHandle, ClientId, UserRecord};
use crate::config::{Config, DebugFlags, TimeoutsConfig};
use crate::security::{ConfigCredentials, CredentialStore};

/// This server's identity.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub network: String,
    pub version: String,
    pub created: DateTime<Utc>,
    /// MOTD lines; empty means no MOTD.
    pub motd: Vec<String>,
}

/// Central shared state container.
pub struct Matrix {
    pub info: ServerInfo,
    /// Capabilities offered to clients. Immutable once built.
    pub caps: CapRegistry,
    pub credentials: Arc<dyn CredentialStore>,
    pub timeouts: TimeoutsConfig,
    pub debug: DebugFlags,

    /// Casefolded nickname -> owner. Reserved at NICK, before registration.
    pub nicks: DashMap<String, ClientId>,
    /// Registered users.
    pub users: DashMap<ClientId, Arc<RwLock<UserRecord>>>,
    /// Casefolded channel name -> actor handle.
    pub channels: DashMap<String, ChannelHandle>,

    next_client: AtomicU64,
    next_channel: AtomicU64,
    /// Open connections, registered or not.
    connections: AtomicUsize,
}

impl Matrix {
    pub fn new(
        info: ServerInfo,
        caps: CapRegistry,
        credentials: Arc<dyn CredentialStore>,
        timeouts: TimeoutsConfig,
        debug: DebugFlags,
    ) -> Self {
        Self {
            info,
            caps,
            credentials,
            timeouts,
            debug,
            nicks: DashMap::new(),
            users: DashMap::new(),
            channels: DashMap::new(),
            next_client: AtomicU64::new(1),
            next_channel: AtomicU64::new(1),
            connections: AtomicUsize::new(0),
        }
    }

    /// Build the Matrix from a validated configuration.
    pub fn from_config(config: &Config) -> Self {
        let caps = config
            .capabilities
            .iter()
            .filter_map(|name| name.parse::<Capability>().ok())
            .filter(|cap| cap.is_implemented());

        let info = ServerInfo {
            name: config.server.name.clone(),
            network: config.server.network.clone(),
            version: config.server.version.clone(),
            created: Utc::now(),
            motd: config.motd.load_lines(),
        };

        Self::new(
            info,
            CapRegistry::new(caps),
            Arc::new(ConfigCredentials::from_config(config)),
            config.timeouts,
            config.debug,
        )
    }

    pub fn next_client_id(&self) -> ClientId {
        ClientId(self.next_client.fetch_add(1, Ordering::Relaxed))
    }

    pub fn connection_opened(&self) {
        self.connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn connection_closed(&self) {
        self.connections.fetch_sub(1, Ordering::Relaxed);
    }

    /// Reserve `nick` for `id`. Returns `false` if another client holds it.
    /// Reserving a nickname the client already holds succeeds.
    pub fn reserve_nick(&self, nick: &str, id: ClientId) -> bool {
        match self.nicks.entry(irc_to_lower(nick)) {
            Entry::Occupied(entry) => *entry.get() == id,
            Entry::Vacant(entry) => {
                entry.insert(id);
                true
            }
        }
    }

    /// Release `nick` if `id` holds it.
    pub fn release_nick(&self, nick: &str, id: ClientId) {
        self.nicks.remove_if(&irc_to_lower(nick), |_, owner| *owner == id);
    }

    /// Move `id` from `old` to `new`. Fails without side effects if `new` is
    /// held by someone else.
    pub fn rename_nick(&self, old: &str, new: &str, id: ClientId) -> bool {
        if !self.reserve_nick(new, id) {
            return false;
        }
        if irc_to_lower(old) != irc_to_lower(new) {
            self.release_nick(old, id);
        }
        true
    }

    pub fn nick_owner(&self, nick: &str) -> Option<ClientId> {
        self.nicks.get(&irc_to_lower(nick)).map(|e| *e.value())
    }

    pub fn register_user(&self, record: UserRecord) -> Arc<RwLock<UserRecord>> {
        let id = record.id;
        let record = Arc::new(RwLock::new(record));
        self.users.insert(id, record.clone());
        record
    }

    pub fn remove_user(&self, id: ClientId) {
        self.users.remove(&id);
    }

    pub fn user_by_nick(&self, nick: &str) -> Option<Arc<RwLock<UserRecord>>> {
        let id = self.nick_owner(nick)?;
        self.users.get(&id).map(|u| u.value().clone())
    }

    pub fn channel(&self, name: &str) -> Option<ChannelHandle> {
        self.channels.get(&irc_to_lower(name)).map(|c| c.value().clone())
    }

    /// Existing channel handle, or a freshly spawned actor.
    pub fn channel_or_create(self: &Arc<Self>, name: &str) -> ChannelHandle {
        self.channels
            .entry(irc_to_lower(name))
            .or_insert_with(|| {
                let id = self.next_channel.fetch_add(1, Ordering::Relaxed);
                ChannelActor::spawn(id, name.to_owned(), Arc::downgrade(self), self.debug)
            })
            .value()
            .clone()
    }

    /// Counts for the LUSERS burst.
    pub fn lusers(&self) -> Lusers {
        let users = self.users.len();
        let opers = self
            .users
            .iter()
            .filter(|u| u.value().read().is_oper())
            .count();
        let invisible = self
            .users
            .iter()
            .filter(|u| u.value().read().modes.contains(&UserMode::Invisible))
            .count();
        let connections = self.connections.load(Ordering::Relaxed);
        Lusers {
            users: users - invisible,
            invisible,
            opers,
            unknown: connections.saturating_sub(users),
            channels: self.channels.len(),
        }
    }
}

/// Snapshot of server population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lusers {
    pub users: usize,
    pub invisible: usize,
    pub opers: usize,
    pub unknown: usize,
    pub channels: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> Arc<Matrix> {
        let info = ServerInfo {
            name: "irc.nomad.example".into(),
            network: "Nomad".into(),
            version: "nomad-test".into(),
            created: Utc::now(),
            motd: Vec::new(),
        };
        Arc::new(Matrix::new(
            info,
            CapRegistry::default(),
            Arc::new(ConfigCredentials::default()),
            TimeoutsConfig::default(),
            DebugFlags::default(),
        ))
    }

    #[test]
    fn nick_reservation_is_casefolded() {
        let m = matrix();
        assert!(m.reserve_nick("Dan[1]", ClientId(1)));
        assert!(m.reserve_nick("dan{1}", ClientId(1)));
        assert!(!m.reserve_nick("DAN{1}", ClientId(2)));
        assert_eq!(m.nick_owner("dan[1]"), Some(ClientId(1)));

        m.release_nick("dan{1}", ClientId(2));
        assert_eq!(m.nick_owner("dan[1]"), Some(ClientId(1)));
        m.release_nick("dan{1}", ClientId(1));
        assert_eq!(m.nick_owner("dan[1]"), None);
    }

    #[test]
    fn rename_keeps_old_on_collision() {
        let m = matrix();
        m.reserve_nick("amy", ClientId(1));
        m.reserve_nick("bob", ClientId(2));
        assert!(!m.rename_nick("amy", "BOB", ClientId(1)));
        assert_eq!(m.nick_owner("amy"), Some(ClientId(1)));

        assert!(m.rename_nick("amy", "Amy", ClientId(1)));
        assert_eq!(m.nick_owner("amy"), Some(ClientId(1)));
        assert!(m.rename_nick("amy", "ann", ClientId(1)));
        assert_eq!(m.nick_owner("amy"), None);
        assert_eq!(m.nick_owner("ann"), Some(ClientId(1)));
    }

    #[tokio::test]
    async fn channels_are_created_once() {
        let m = matrix();
        let a = m.channel_or_create("#Nomad");
        let b = m.channel_or_create("#nomad");
        assert_eq!(a.id(), b.id());
        assert_eq!(a.name(), "#Nomad");
        assert!(m.channel("#NOMAD").is_some());
        assert_eq!(m.lusers().channels, 1);
    }
}
