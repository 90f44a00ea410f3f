//! Channel MODE.

use nomad_proto::{ChannelMode, ModeChange, ModeKind, ModeType, Response, TargetKind};
use tracing::debug;

use super::super::Context;
use crate::error::{ChannelError, HandlerError, HandlerResult};
use crate::mode::ChannelRequester;
use crate::state::{ListEntry, ModeSnapshot};

pub(super) async fn handle_channel_mode(
    ctx: &mut Context<'_>,
    target: &str,
    pieces: &[&str],
) -> HandlerResult {
    let handle = ctx
        .matrix
        .channel(target)
        .ok_or_else(|| HandlerError::NoSuchChannel(target.to_owned()))?;
    let channel_error = |error: ChannelError| HandlerError::Channel {
        channel: target.to_owned(),
        error,
    };

    if pieces.is_empty() {
        let snapshot = handle.query().await.map_err(channel_error)?;
        send_channel_modes(ctx, &snapshot);
        return Ok(());
    }

    let record = ctx
        .session
        .record
        .clone()
        .ok_or_else(|| HandlerError::Internal("registered session without a record".into()))?;
    let (prefix, is_oper) = {
        let user = record.read();
        (user.prefix(), user.is_oper())
    };
    let requester = ChannelRequester {
        id: ctx.session.id,
        mask: prefix.to_string(),
        is_oper,
    };

    let reply = handle
        .mode(requester, prefix, ModeChange::channel_modes(pieces))
        .await
        .map_err(channel_error)?;

    let channel = reply.snapshot.channel.clone();
    let nick = ctx.nick();
    for error in reply.outcome.distinct_errors() {
        ctx.reply_err(error.to_irc_reply(TargetKind::Channel, &nick, &channel));
    }
    if !reply.outcome.errors.is_empty() && ctx.matrix.debug.channel {
        debug!(channel = %channel, errors = reply.outcome.errors.len(), "mode changes rejected");
    }

    // Answer queries in the order they were asked; flags and parameters
    // share one RPL_CHANNELMODEIS.
    let mut sent_modes = false;
    for mode in &reply.outcome.queries {
        if mode.kind() == ModeKind::List {
            let entries = reply
                .lists
                .iter()
                .find(|(m, _)| m == mode)
                .map(|(_, entries)| entries.as_slice())
                .unwrap_or_default();
            send_list(ctx, &channel, *mode, entries);
        } else if !sent_modes {
            send_channel_modes(ctx, &reply.snapshot);
            sent_modes = true;
        }
    }

    Ok(())
}

/// RPL_CHANNELMODEIS.
fn send_channel_modes(ctx: &mut Context<'_>, snapshot: &ModeSnapshot) {
    let mut params = Vec::with_capacity(snapshot.params.len() + 1);
    params.push(snapshot.channel.as_str());
    params.extend(snapshot.params.iter().map(String::as_str));
    ctx.reply(Response::RPL_CHANNELMODEIS, &params);
}

/// One entry line per mask, then the end marker.
fn send_list(ctx: &mut Context<'_>, channel: &str, mode: ChannelMode, entries: &[ListEntry]) {
    let (entry, end, text) = match mode {
        ChannelMode::BanMask => (
            Response::RPL_BANLIST,
            Response::RPL_ENDOFBANLIST,
            "End of channel ban list",
        ),
        ChannelMode::ExceptionMask => (
            Response::RPL_EXCEPTLIST,
            Response::RPL_ENDOFEXCEPTLIST,
            "End of channel exception list",
        ),
        ChannelMode::InviteMask => (
            Response::RPL_INVITELIST,
            Response::RPL_ENDOFINVITELIST,
            "End of channel invite list",
        ),
        _ => return,
    };

    for item in entries {
        let set_at = item.set_at.to_string();
        ctx.reply(
            entry,
            &[channel, item.mask.as_str(), item.set_by.as_str(), set_at.as_str()],
        );
    }
    ctx.reply(end, &[channel, text]);
}
