//! User status handlers: AWAY.

use async_trait::async_trait;
use nomad_proto::{Message, Response, UserMode};
use tracing::debug;

use super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};

/// Handler for AWAY command.
///
/// `AWAY [message]`
///
/// Sets or clears away status. The `a` user mode mirrors it.
pub struct AwayHandler;

#[async_trait]
impl Handler for AwayHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let record = ctx
            .session
            .record
            .clone()
            .ok_or_else(|| HandlerError::Internal("registered session without a record".into()))?;

        match msg.command.arg(0).filter(|text| !text.is_empty()) {
            Some(text) => {
                {
                    let mut user = record.write();
                    user.away = Some(text.to_owned());
                    user.modes.insert(UserMode::Away);
                }
                debug!(client = %ctx.session.id, away = %text, "marked away");
                ctx.reply(Response::RPL_NOWAWAY, &["You have been marked as being away"]);
            }
            None => {
                {
                    let mut user = record.write();
                    user.away = None;
                    user.modes.remove(&UserMode::Away);
                }
                debug!(client = %ctx.session.id, "no longer away");
                ctx.reply(Response::RPL_UNAWAY, &["You are no longer marked as being away"]);
            }
        }
        Ok(())
    }
}
