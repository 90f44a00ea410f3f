//! Command handler context.
//!
//! Defines the [`Context`] passed to every handler and the [`Handler`]
//! trait itself.

use std::sync::Arc;

use async_trait::async_trait;
use nomad_proto::{Message, Prefix, Response};

use crate::error::HandlerResult;
use crate::state::{Matrix, Session};

/// Handler context passed to each command handler.
///
/// Direct replies go to the outbox and are written after the handler
/// returns, behind anything channel actors queued for this connection in
/// the meantime. For a multi-target command such as `JOIN nochan,#ok` the
/// echo from `#ok` therefore arrives before the 403 for `nochan`, and the
/// replies do not interleave per target.
pub struct Context<'a> {
    /// Shared server state.
    pub matrix: &'a Arc<Matrix>,
    /// State of the connection issuing the command.
    pub session: &'a mut Session,
    outbox: &'a mut Vec<Message>,
}

impl<'a> Context<'a> {
    pub fn new(
        matrix: &'a Arc<Matrix>,
        session: &'a mut Session,
        outbox: &'a mut Vec<Message>,
    ) -> Self {
        Self {
            matrix,
            session,
            outbox,
        }
    }

    #[inline]
    pub fn server_name(&self) -> &str {
        &self.matrix.info.name
    }

    #[inline]
    pub fn server_prefix(&self) -> Prefix {
        Prefix::ServerName(self.matrix.info.name.clone())
    }

    /// Nickname for numeric replies, `*` before one is set.
    pub fn nick(&self) -> String {
        self.session.nick_or_star().to_owned()
    }

    /// Queue a message for this client.
    pub fn send(&mut self, msg: Message) {
        self.outbox.push(msg);
    }

    /// Queue a numeric reply. The client's nickname is prepended to
    /// `params`.
    pub fn reply(&mut self, response: Response, params: &[&str]) {
        let nick = self.nick();
        let mut all = Vec::with_capacity(params.len() + 1);
        all.push(nick.as_str());
        all.extend_from_slice(params);
        let msg = Message::numeric(&self.matrix.info.name, response, &all);
        self.outbox.push(msg);
    }

    /// Queue a prefix-less error built by a `Response::err_*` constructor.
    pub fn reply_err(&mut self, msg: Message) {
        let msg = msg.with_prefix(self.server_prefix());
        self.outbox.push(msg);
    }
}

/// A command handler.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult;
}
