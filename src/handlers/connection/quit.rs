//! QUIT command handler.

use async_trait::async_trait;
use nomad_proto::Message;
use tracing::info;

use super::super::{Context, Handler};
use crate::error::HandlerResult;

/// Handler for QUIT command.
pub struct QuitHandler;

#[async_trait]
impl Handler for QuitHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let reason = match msg.command.arg(0) {
            Some(text) if !text.is_empty() => format!("Quit: {text}"),
            _ => "Client Quit".to_owned(),
        };

        info!(
            client = %ctx.session.id,
            nick = ?ctx.session.nick,
            reason = %reason,
            "client quit"
        );

        // The connection loop closes the link once the handler returns.
        ctx.session.quit = Some(reason);
        Ok(())
    }
}
