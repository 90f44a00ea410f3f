//! In-process test server.
//!
//! Every client gets its own [`Connection`] task over a
//! [`tokio::io::duplex`] pipe; all of them share one Matrix.

use std::sync::Arc;

use nomad_ircd::config::Config;
use nomad_ircd::handlers::Registry;
use nomad_ircd::network::Connection;
use nomad_ircd::state::Matrix;
use tokio::task::JoinHandle;

use super::client::TestClient;

/// Server configuration used unless a test supplies its own.
pub const DEFAULT_CONFIG: &str = r#"
    [server]
    name = "irc.test"
    network = "TestNet"
    version = "nomad-test"

    [[oper]]
    name = "admin"
    password = "letmein"
"#;

/// Bytes buffered in each direction of a client pipe.
const PIPE_SIZE: usize = 64 * 1024;

/// A test IRC server.
pub struct TestServer {
    pub matrix: Arc<Matrix>,
    registry: Arc<Registry>,
}

impl TestServer {
    /// Server with [`DEFAULT_CONFIG`].
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CONFIG)
    }

    /// Server built from a TOML configuration.
    pub fn with_config(toml: &str) -> Self {
        let config: Config = toml.parse().expect("test config parses");
        config.validate().expect("test config is valid");
        Self {
            matrix: Arc::new(Matrix::from_config(&config)),
            registry: Arc::new(Registry::new()),
        }
    }

    /// Open a connection. The returned handle resolves when the server
    /// side of the session ends.
    pub fn connect(&self) -> (TestClient, JoinHandle<std::io::Result<()>>) {
        let (client, server) = tokio::io::duplex(PIPE_SIZE);
        let (read, write) = tokio::io::split(server);
        let conn = Connection::new(
            self.matrix.clone(),
            self.registry.clone(),
            "127.0.0.1",
            read,
            write,
        );
        let task = tokio::spawn(conn.run());
        (TestClient::new(client), task)
    }

    /// Connect and complete registration as `nick`, draining the welcome
    /// burst.
    pub async fn register(&self, nick: &str) -> TestClient {
        let (mut client, _task) = self.connect();
        client.register(nick).await.expect("registration succeeds");
        client
    }
}
