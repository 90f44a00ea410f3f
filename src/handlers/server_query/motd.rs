//! MOTD command handler.
//!
//! `MOTD [target]`
//!
//! Returns the "Message of the Day" for the server. The same lines close
//! the welcome burst.

use async_trait::async_trait;
use nomad_proto::{Message, Response};

use super::super::{Context, Handler};
use crate::error::HandlerResult;

/// Handler for MOTD command.
pub struct MotdHandler;

#[async_trait]
impl Handler for MotdHandler {
    async fn handle(&self, ctx: &mut Context<'_>, _msg: &Message) -> HandlerResult {
        send_motd(ctx);
        Ok(())
    }
}

/// Queue RPL_MOTDSTART, one RPL_MOTD per line and RPL_ENDOFMOTD, or
/// ERR_NOMOTD when no MOTD is configured.
pub fn send_motd(ctx: &mut Context<'_>) {
    if ctx.matrix.info.motd.is_empty() {
        let nick = ctx.nick();
        ctx.reply_err(Response::err_nomotd(&nick));
        return;
    }

    let start = format!("- {} Message of the day - ", ctx.server_name());
    let lines: Vec<String> = ctx
        .matrix
        .info
        .motd
        .iter()
        .map(|line| format!("- {line}"))
        .collect();

    ctx.reply(Response::RPL_MOTDSTART, &[start.as_str()]);
    for line in &lines {
        ctx.reply(Response::RPL_MOTD, &[line.as_str()]);
    }
    ctx.reply(Response::RPL_ENDOFMOTD, &["End of /MOTD command."]);
}
