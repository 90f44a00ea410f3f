//! Test IRC client.
//!
//! Sends raw lines and parses what the server writes back.

use std::time::Duration;

use nomad_proto::{Command, Message};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, ReadHalf, WriteHalf};
use tokio::time::timeout;

/// How long `recv` waits before giving up.
const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// A test IRC client.
pub struct TestClient {
    reader: BufReader<ReadHalf<DuplexStream>>,
    writer: WriteHalf<DuplexStream>,
}

impl TestClient {
    pub fn new(stream: DuplexStream) -> Self {
        let (read, write) = tokio::io::split(stream);
        Self {
            reader: BufReader::new(read),
            writer: write,
        }
    }

    /// Send a raw IRC line; CRLF is appended when missing.
    pub async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with('\n') {
            self.writer.write_all(b"\r\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive one line, without its terminator.
    pub async fn recv_line_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("connection closed");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Receive one line with the default timeout.
    pub async fn recv_line(&mut self) -> anyhow::Result<String> {
        self.recv_line_timeout(RECV_TIMEOUT).await
    }

    /// Receive and parse one message.
    pub async fn recv(&mut self) -> anyhow::Result<Message> {
        let line = self.recv_line().await?;
        line.parse::<Message>()
            .map_err(|e| anyhow::anyhow!("parse error on {line:?}: {e}"))
    }

    /// Receive messages until `predicate` matches; the match is included.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<Message>>
    where
        F: FnMut(&Message) -> bool,
    {
        let mut messages = Vec::new();
        loop {
            let msg = self.recv().await?;
            let done = predicate(&msg);
            messages.push(msg);
            if done {
                return Ok(messages);
            }
        }
    }

    /// Receive until the given numeric arrives.
    pub async fn recv_until_code(&mut self, code: u16) -> anyhow::Result<Vec<Message>> {
        self.recv_until(|msg| numeric(msg) == Some(code)).await
    }

    /// Assert nothing arrives within a short window.
    pub async fn assert_silent(&mut self) {
        if let Ok(line) = self.recv_line_timeout(Duration::from_millis(100)).await {
            panic!("expected silence, got {line:?}");
        }
    }

    /// NICK + USER, then drain the burst through end of MOTD.
    pub async fn register(&mut self, nick: &str) -> anyhow::Result<Vec<Message>> {
        self.send(&format!("NICK {nick}")).await?;
        self.send(&format!("USER {nick} 0 * :Test User {nick}")).await?;
        self.recv_until(|msg| matches!(numeric(msg), Some(376 | 422)))
            .await
    }

    /// Send JOIN and drain through RPL_ENDOFNAMES.
    pub async fn join(&mut self, channel: &str) -> anyhow::Result<Vec<Message>> {
        self.send(&format!("JOIN {channel}")).await?;
        self.recv_until_code(366).await
    }
}

/// Numeric code of a reply, if it is one.
pub fn numeric(msg: &Message) -> Option<u16> {
    match msg.command {
        Command::Response(resp, _) => Some(resp.code()),
        _ => None,
    }
}

/// Numeric codes of `messages`, skipping non-numerics.
#[allow(dead_code)]
pub fn codes(messages: &[Message]) -> Vec<u16> {
    messages.iter().filter_map(numeric).collect()
}
