//! MODE command handler.
//!
//! - User modes: `MODE nick [+/-modes]`
//! - Channel modes: `MODE channel [+/-modes [args...]]`
//!
//! The target decides the path: a leading channel prefix character routes
//! to the channel actor, anything else to the user record.

mod channel;
mod user;

use async_trait::async_trait;
use nomad_proto::{ChannelExt, Message};
use tracing::Instrument;

use super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};

/// Handler for MODE command.
pub struct ModeHandler;

#[async_trait]
impl Handler for ModeHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // MODE <target> [modes [params]]
        let target = msg.command.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let pieces: Vec<&str> = msg.command.params().iter().skip(1).map(String::as_str).collect();

        let span = tracing::debug_span!("mode", client = %ctx.session.id, target = %target);
        async move {
            if target.is_channel_target() {
                channel::handle_channel_mode(ctx, target, &pieces).await
            } else {
                user::handle_user_mode(ctx, target, &pieces)
            }
        }
        .instrument(span)
        .await
    }
}
