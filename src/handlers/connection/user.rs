//! USER command handler for connection registration.

use async_trait::async_trait;
use nomad_proto::Message;
use tracing::debug;

use super::super::{Context, Handler};
use super::welcome::try_complete_registration;
use crate::error::{HandlerError, HandlerResult};

/// Handler for USER command.
pub struct UserHandler;

#[async_trait]
impl Handler for UserHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        if ctx.session.is_registered() {
            return Err(HandlerError::AlreadyRegistered);
        }

        // USER <username> <mode> <unused> <realname>
        let username = msg.command.arg(0).unwrap_or("");
        let realname = msg.command.arg(3).ok_or(HandlerError::NeedMoreParams)?;
        if username.is_empty() {
            return Err(HandlerError::NeedMoreParams);
        }

        ctx.session.registration.on_user()?;
        ctx.session.user = Some(username.to_owned());
        ctx.session.realname = Some(realname.to_owned());

        if ctx.matrix.debug.client {
            debug!(client = %ctx.session.id, user = %username, realname = %realname, "user set");
        }

        try_complete_registration(ctx)
    }
}
