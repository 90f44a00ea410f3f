//! PASS command handler.
//!
//! The connection password must arrive before NICK and USER. A wrong
//! password closes the connection.

use async_trait::async_trait;
use nomad_proto::Message;
use tracing::warn;

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};

/// Handler for PASS command.
pub struct PassHandler;

#[async_trait]
impl Handler for PassHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // PASS <password>
        let password = msg.command.arg(0).ok_or(HandlerError::NeedMoreParams)?;

        ctx.session.registration.on_pass()?;

        if !ctx.matrix.credentials.verify_password(password) {
            warn!(client = %ctx.session.id, host = %ctx.session.host, "bad connection password");
            return Err(HandlerError::PasswordMismatch);
        }

        ctx.session.registration.pass_accepted();
        Ok(())
    }
}
