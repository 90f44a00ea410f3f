//! User MODE.

use nomad_proto::{Command, Message, ModeChange, Response, TargetKind, Verb};
use tracing::debug;

use super::super::Context;
use crate::error::{HandlerError, HandlerResult};
use crate::mode::{self, UserRequester};

pub(super) fn handle_user_mode(ctx: &mut Context<'_>, target: &str, pieces: &[&str]) -> HandlerResult {
    let own = ctx
        .session
        .record
        .clone()
        .ok_or_else(|| HandlerError::Internal("registered session without a record".into()))?;
    let user = ctx
        .matrix
        .user_by_nick(target)
        .ok_or_else(|| HandlerError::NoSuchNick(target.to_owned()))?;

    let is_self = user.read().id == ctx.session.id;
    let (is_oper, prefix) = {
        let me = own.read();
        (me.is_oper(), me.prefix())
    };

    if pieces.is_empty() {
        if !is_self && !is_oper {
            return Err(HandlerError::UsersDontMatch);
        }
        let modes = user.read().mode_string();
        ctx.reply(Response::RPL_UMODEIS, &[modes.as_str()]);
        return Ok(());
    }

    let requester = UserRequester { is_self, is_oper };
    let (outcome, target_nick, target_sender, modes) = {
        let mut record = user.write();
        let outcome = mode::apply(&mut *record, &requester, ModeChange::user_modes(pieces));
        (
            outcome,
            record.nick.clone(),
            record.sender.clone(),
            record.mode_string(),
        )
    };

    let confirmation = outcome.confirmation();
    if !confirmation.is_empty() {
        if ctx.matrix.debug.client {
            debug!(target = %target_nick, modes = %confirmation.join(" "), "user modes applied");
        }
        let mut params = Vec::with_capacity(confirmation.len() + 1);
        params.push(target_nick.clone());
        params.extend(confirmation);
        let echo = Message::from(Command::Verb(Verb::MODE, params)).with_prefix(prefix);
        if !is_self {
            let _ = target_sender.try_send(echo.clone());
        }
        ctx.send(echo);
    }

    let nick = ctx.nick();
    for error in outcome.distinct_errors() {
        ctx.reply_err(error.to_irc_reply(TargetKind::User, &nick, &target_nick));
    }

    if !outcome.queries.is_empty() {
        ctx.reply(Response::RPL_UMODEIS, &[modes.as_str()]);
    }

    Ok(())
}
