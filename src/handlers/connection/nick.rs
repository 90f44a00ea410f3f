//! NICK command handler.
//!
//! During registration NICK reserves the nickname and may complete
//! registration. Once registered it is a nickname change, echoed to the
//! user and announced once to everyone sharing a channel with them.

use std::collections::HashSet;

use async_trait::async_trait;
use nomad_proto::{Message, NickExt, Verb, irc_to_lower, is_middle_safe};
use tracing::{debug, info};

use super::super::{Context, Handler};
use super::welcome::try_complete_registration;
use crate::error::{HandlerError, HandlerResult};

/// Handler for NICK command.
pub struct NickHandler;

#[async_trait]
impl Handler for NickHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // NICK <nickname>
        let nick = msg
            .command
            .arg(0)
            .filter(|n| !n.is_empty())
            .ok_or(HandlerError::NoNicknameGiven)?;

        if !nick.is_valid_nick() {
            // 432 echoes the nickname as a middle parameter.
            let shown = if is_middle_safe(nick) { nick } else { "*" };
            return Err(HandlerError::ErroneousNickname(shown.to_owned()));
        }

        if ctx.session.is_registered() {
            change_nick(ctx, nick).await
        } else {
            set_initial_nick(ctx, nick)
        }
    }
}

fn set_initial_nick(ctx: &mut Context<'_>, nick: &str) -> HandlerResult {
    let id = ctx.session.id;

    if !ctx.matrix.reserve_nick(nick, id) {
        return Err(HandlerError::NickCollision(nick.to_owned()));
    }
    if let Some(old) = ctx.session.nick.take()
        && irc_to_lower(&old) != irc_to_lower(nick)
    {
        ctx.matrix.release_nick(&old, id);
    }

    ctx.session.nick = Some(nick.to_owned());
    ctx.session.registration.on_nick();
    if ctx.matrix.debug.client {
        debug!(client = %id, nick = %nick, "nick set");
    }

    try_complete_registration(ctx)
}

async fn change_nick(ctx: &mut Context<'_>, nick: &str) -> HandlerResult {
    let id = ctx.session.id;
    let record = ctx
        .session
        .record
        .clone()
        .ok_or_else(|| HandlerError::Internal("registered session without a record".into()))?;

    let (old_prefix, channels) = {
        let user = record.read();
        if user.nick == nick {
            return Ok(());
        }
        if !ctx.matrix.rename_nick(&user.nick, nick, id) {
            return Err(HandlerError::NicknameInUse(nick.to_owned()));
        }
        (user.prefix(), user.channels.iter().cloned().collect::<Vec<_>>())
    };

    record.write().nick = nick.to_owned();
    ctx.session.nick = Some(nick.to_owned());

    let announce = Message::verb(Some(old_prefix.clone()), Verb::NICK, &[nick]);
    ctx.send(announce.clone());

    let mut told = HashSet::new();
    for name in channels {
        let Some(channel) = ctx.matrix.channel(&name) else {
            continue;
        };
        for peer in channel.rename(id, nick.to_owned()).await {
            if told.insert(peer.id) {
                let _ = peer.sender.try_send(announce.clone());
            }
        }
    }

    info!(client = %id, old = %old_prefix, new = %nick, "nick changed");
    Ok(())
}
