//! PING and PONG handlers.

use async_trait::async_trait;
use nomad_proto::{Message, Verb};

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};

/// Handler for PING command.
pub struct PingHandler;

#[async_trait]
impl Handler for PingHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // PING <token>
        let token = msg.command.arg(0).ok_or(HandlerError::NeedMoreParams)?;

        let server = ctx.server_name().to_owned();
        let pong = Message::verb(
            Some(ctx.server_prefix()),
            Verb::PONG,
            &[server.as_str(), token],
        );
        ctx.send(pong);
        Ok(())
    }
}

/// Handler for PONG command.
pub struct PongHandler;

#[async_trait]
impl Handler for PongHandler {
    async fn handle(&self, _ctx: &mut Context<'_>, _msg: &Message) -> HandlerResult {
        // Any inbound line resets the idle timer; that is handled by the
        // connection loop.
        Ok(())
    }
}
