//! PART command handler.
//!
//! ```text
//! PART <channels> [<reason>]
//! ```
//!
//! The channel actor broadcasts the PART to every member, the parting
//! user included, and drains itself once empty unless it is `+P`.

use async_trait::async_trait;
use nomad_proto::{ChannelExt, Message, Response, Verb, irc_to_lower};
use tracing::info;

use super::super::{Context, Handler};
use super::{report, split_list};
use crate::error::{ChannelError, HandlerError, HandlerResult};

/// Handler for PART command.
pub struct PartHandler;

#[async_trait]
impl Handler for PartHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let channels = msg.command.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let reason = msg
            .command
            .arg(1)
            .filter(|r| !r.is_empty())
            .map(str::to_owned);

        let record = ctx
            .session
            .record
            .clone()
            .ok_or_else(|| HandlerError::Internal("registered session without a record".into()))?;
        let prefix = record.read().prefix();

        for name in split_list(channels) {
            let key_name = irc_to_lower(name);
            let handle = match ctx.matrix.channel(name) {
                Some(handle) if name.is_channel_name() => handle,
                _ => {
                    let nick = ctx.nick();
                    ctx.reply_err(Response::err_nosuchchannel(&nick, name));
                    continue;
                }
            };

            if !record.read().channels.contains(&key_name) {
                report(ctx, Verb::PART, name, ChannelError::NotOnChannel);
                continue;
            }

            let result = handle
                .part(ctx.session.id, prefix.clone(), reason.clone())
                .await;
            record.write().channels.remove(&key_name);

            match result {
                Ok(()) => {
                    info!(client = %ctx.session.id, channel = %handle.name(), "parted channel");
                }
                // The actor was already gone; membership is dropped either way.
                Err(ChannelError::Draining) => {}
                Err(error) => report(ctx, Verb::PART, name, error),
            }
        }

        Ok(())
    }
}
