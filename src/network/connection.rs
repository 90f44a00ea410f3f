//! Connection - drives one client session.
//!
//! Each Connection runs in its own Tokio task:
//!
//! ```text
//!   FramedRead<IrcCodec> ──▶ tokio::select! ◀── mpsc (channel actors)
//!                               │     ▲
//!                               ▼     │ sleep_until(login / idle / quit)
//!                          [Registry::dispatch]
//!                               │
//!                               ▼
//!   FramedWrite<IrcCodec> ◀── actor queue, then outbox, then error reply
//! ```
//!
//! After every line the messages channel actors queued for this client are
//! written first, then the handler's direct replies, then the numeric for a
//! returned error. A JOIN echo therefore precedes its NAMES reply and a
//! MODE echo precedes the errors for the rejected part of the same command.

use std::collections::HashSet;
use std::io;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use nomad_proto::{Message, Prefix, Verb};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, info, warn};

use super::codec::{Frame, IrcCodec};
use crate::error::{HandlerError, TimeoutKind};
use crate::handlers::{Context, Registry};
use crate::state::{Matrix, Session};

/// Capacity of the per-connection outbound queue shared with channel actors.
const OUTBOUND_QUEUE: usize = 512;

/// Why the session ended.
#[derive(Debug)]
enum Close {
    /// The client closed its side.
    Eof,
    /// QUIT, a fatal error or a timer; an `ERROR` line has been sent.
    Closed(String),
}

/// Liveness timers.
///
/// The login deadline is fixed when the connection is accepted. Once
/// registered, silence for the idle window triggers a PING and silence
/// for a further quit window closes the link.
#[derive(Debug)]
struct Timers {
    login: Instant,
    last_activity: Instant,
    ping_sent: Option<Instant>,
}

impl Timers {
    fn new(matrix: &Matrix) -> Self {
        let now = Instant::now();
        Self {
            login: now + matrix.timeouts.login(),
            last_activity: now,
            ping_sent: None,
        }
    }

    fn deadline(&self, matrix: &Matrix, registered: bool) -> Instant {
        if !registered {
            self.login
        } else if let Some(sent) = self.ping_sent {
            sent + matrix.timeouts.quit()
        } else {
            self.last_activity + matrix.timeouts.idle()
        }
    }

    fn activity(&mut self) {
        self.last_activity = Instant::now();
        self.ping_sent = None;
    }
}

/// A client connection over any byte stream.
pub struct Connection<R, W> {
    matrix: Arc<Matrix>,
    registry: Arc<Registry>,
    host: String,
    reader: FramedRead<R, IrcCodec>,
    writer: FramedWrite<W, IrcCodec>,
}

impl<R, W> Connection<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(
        matrix: Arc<Matrix>,
        registry: Arc<Registry>,
        host: impl Into<String>,
        reader: R,
        writer: W,
    ) -> Self {
        Self {
            matrix,
            registry,
            host: host.into(),
            reader: FramedRead::new(reader, IrcCodec::new()),
            writer: FramedWrite::new(writer, IrcCodec::new()),
        }
    }

    /// Serve the client until it quits, fails fatally, times out or
    /// disconnects. Shared state is cleaned up on every path.
    pub async fn run(mut self) -> io::Result<()> {
        let (tx, mut rx) = mpsc::channel(OUTBOUND_QUEUE);
        let id = self.matrix.next_client_id();
        let mut session = Session::new(
            id,
            self.host.clone(),
            self.matrix.credentials.requires_password(),
            tx,
        );

        self.matrix.connection_opened();
        info!(client = %id, host = %self.host, "connection opened");

        let result = self.serve(&mut session, &mut rx).await;

        let reason = match &result {
            Ok(Close::Closed(reason)) => reason.clone(),
            Ok(Close::Eof) => "Connection closed".to_owned(),
            Err(e) => format!("Write error: {e}"),
        };
        cleanup(&self.matrix, &mut session, &reason).await;
        self.matrix.connection_closed();
        info!(client = %id, reason = %reason, "connection closed");

        result.map(|_| ())
    }

    async fn serve(
        &mut self,
        session: &mut Session,
        rx: &mut mpsc::Receiver<Message>,
    ) -> io::Result<Close> {
        let mut timers = Timers::new(&self.matrix);

        loop {
            let deadline = timers.deadline(&self.matrix, session.is_registered());

            tokio::select! {
                Some(msg) = rx.recv() => {
                    self.write(msg).await?;
                    self.writer.flush().await?;
                }
                frame = self.reader.next() => {
                    let Some(frame) = frame else {
                        return Ok(Close::Eof);
                    };
                    timers.activity();
                    if let Some(close) = self.process(session, rx, frame?).await? {
                        return Ok(close);
                    }
                }
                _ = sleep_until(deadline) => {
                    if !session.is_registered() {
                        let err = HandlerError::Timeout(TimeoutKind::Login);
                        return self.fatal(session, &err).await;
                    }
                    if timers.ping_sent.is_some() {
                        let err = HandlerError::Timeout(TimeoutKind::Ping);
                        return self.fatal(session, &err).await;
                    }

                    let server = self.matrix.info.name.clone();
                    let ping = Message::verb(
                        Some(Prefix::ServerName(server.clone())),
                        Verb::PING,
                        &[server.as_str()],
                    );
                    self.write(ping).await?;
                    self.writer.flush().await?;
                    timers.ping_sent = Some(Instant::now());
                }
            }
        }
    }

    /// Handle one decoded line and write everything it produced.
    async fn process(
        &mut self,
        session: &mut Session,
        rx: &mut mpsc::Receiver<Message>,
        frame: Frame,
    ) -> io::Result<Option<Close>> {
        let mut outbox = Vec::new();

        let result = match frame {
            Ok(msg) => {
                if self.matrix.debug.net {
                    debug!(client = %session.id, line = %msg.to_line().trim_end(), "<<");
                }
                let command = msg.command.name();
                let mut ctx = Context::new(&self.matrix, session, &mut outbox);
                self.registry
                    .dispatch(&mut ctx, &msg)
                    .await
                    .map_err(|e| (e, command))
            }
            Err(e) => {
                debug!(client = %session.id, error = %e, "malformed line");
                Err((HandlerError::from(e), String::new()))
            }
        };

        while let Ok(msg) = rx.try_recv() {
            self.write(msg).await?;
        }
        for msg in outbox {
            self.write(msg).await?;
        }

        if let Err((err, command)) = result {
            if err.is_fatal() {
                return self.fatal(session, &err).await.map(Some);
            }
            let nick = session.nick_or_star().to_owned();
            if let Some(reply) = err.to_irc_reply(&self.matrix.info.name, &nick, &command) {
                self.write(reply).await?;
            }
        }

        if let Some(reason) = session.quit.clone() {
            self.close_link(&reason).await?;
            return Ok(Some(Close::Closed(reason)));
        }

        self.writer.flush().await?;
        Ok(None)
    }

    /// Report a fatal error and send the closing `ERROR` line.
    async fn fatal(&mut self, session: &Session, err: &HandlerError) -> io::Result<Close> {
        warn!(client = %session.id, error = %err, code = err.error_code(), "closing connection");
        let nick = session.nick_or_star().to_owned();
        if let Some(reply) = err.to_irc_reply(&self.matrix.info.name, &nick, "") {
            self.write(reply).await?;
        }
        let reason = err.close_reason();
        self.close_link(&reason).await?;
        Ok(Close::Closed(reason))
    }

    async fn close_link(&mut self, reason: &str) -> io::Result<()> {
        let text = format!("Closing Link: {} ({})", self.host, reason);
        self.write(Message::verb(None, Verb::ERROR, &[text.as_str()]))
            .await?;
        self.writer.flush().await
    }

    async fn write(&mut self, msg: Message) -> io::Result<()> {
        if self.matrix.debug.net {
            debug!(host = %self.host, line = %msg.to_line().trim_end(), ">>");
        }
        self.writer.feed(msg).await
    }
}

/// Leave every channel, tell the peers once, and free the nickname.
async fn cleanup(matrix: &Matrix, session: &mut Session, reason: &str) {
    let id = session.id;

    if let Some(record) = session.record.take() {
        let (prefix, channels) = {
            let user = record.read();
            (user.prefix(), user.channels.iter().cloned().collect::<Vec<_>>())
        };
        let quit = Message::verb(Some(prefix), Verb::QUIT, &[reason]);

        let mut told = HashSet::new();
        for name in channels {
            let Some(channel) = matrix.channel(&name) else {
                continue;
            };
            for peer in channel.depart(id).await {
                if peer.id != id && told.insert(peer.id) {
                    let _ = peer.sender.try_send(quit.clone());
                }
            }
        }
        matrix.remove_user(id);
    }

    if let Some(nick) = session.nick.take() {
        matrix.release_nick(&nick, id);
    }
}
