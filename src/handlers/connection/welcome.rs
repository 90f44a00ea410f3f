//! Welcome burst and registration completion.

use std::collections::{BTreeSet, HashSet};

use nomad_proto::{ChannelMode, ModeType, Response, UserMode};
use tracing::info;

use super::super::Context;
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::server_query::send_motd;
use crate::state::UserRecord;

/// Finish registration if NICK, USER and CAP are all settled.
///
/// Called after every command that can satisfy a registration sub-flag.
/// On the call that performs the transition the user is published in the
/// Matrix and the welcome burst (001-004, LUSERS, MOTD) is queued.
pub fn try_complete_registration(ctx: &mut Context<'_>) -> HandlerResult {
    if !ctx.session.registration.try_complete()? {
        return Ok(());
    }

    let (Some(nick), Some(user)) = (ctx.session.nick.clone(), ctx.session.user.clone()) else {
        return Err(HandlerError::Internal(
            "registration completed without nick or user".into(),
        ));
    };

    let record = UserRecord {
        id: ctx.session.id,
        nick: nick.clone(),
        user: user.clone(),
        realname: ctx.session.realname.clone().unwrap_or_default(),
        host: ctx.session.host.clone(),
        modes: BTreeSet::new(),
        away: None,
        channels: HashSet::new(),
        sender: ctx.session.sender.clone(),
        multi_prefix: ctx.session.multi_prefix(),
    };
    let record = ctx.matrix.register_user(record);
    ctx.session.record = Some(record);

    info!(
        client = %ctx.session.id,
        nick = %nick,
        user = %user,
        host = %ctx.session.host,
        "client registered"
    );

    send_welcome_burst(ctx, &nick, &user);
    send_lusers(ctx);
    send_motd(ctx);
    Ok(())
}

fn send_welcome_burst(ctx: &mut Context<'_>, nick: &str, user: &str) {
    let info = &ctx.matrix.info;
    let server = info.name.clone();
    let version = info.version.clone();

    let welcome = format!(
        "Welcome to the {} Internet Relay Chat Network {}!{}@{}",
        info.network, nick, user, ctx.session.host
    );
    let yourhost = format!("Your host is {}, running version {}", server, version);
    let created = format!(
        "This server was created {}",
        info.created.format("%a %b %d %Y at %H:%M:%S UTC")
    );
    let user_modes: String = UserMode::ALL.iter().map(|m| m.as_char()).collect();
    let chan_modes: String = ChannelMode::ALL.iter().map(|m| m.as_char()).collect();

    ctx.reply(Response::RPL_WELCOME, &[welcome.as_str()]);
    ctx.reply(Response::RPL_YOURHOST, &[yourhost.as_str()]);
    ctx.reply(Response::RPL_CREATED, &[created.as_str()]);
    ctx.reply(
        Response::RPL_MYINFO,
        &[
            server.as_str(),
            version.as_str(),
            user_modes.as_str(),
            chan_modes.as_str(),
        ],
    );
}

fn send_lusers(ctx: &mut Context<'_>) {
    let lusers = ctx.matrix.lusers();

    let client = format!(
        "There are {} users and {} invisible on 1 servers",
        lusers.users, lusers.invisible
    );
    let opers = lusers.opers.to_string();
    let unknown = lusers.unknown.to_string();
    let channels = lusers.channels.to_string();
    let me = format!(
        "I have {} clients and 0 servers",
        lusers.users + lusers.invisible
    );

    ctx.reply(Response::RPL_LUSERCLIENT, &[client.as_str()]);
    ctx.reply(Response::RPL_LUSEROP, &[opers.as_str(), "operator(s) online"]);
    ctx.reply(
        Response::RPL_LUSERUNKNOWN,
        &[unknown.as_str(), "unknown connection(s)"],
    );
    ctx.reply(
        Response::RPL_LUSERCHANNELS,
        &[channels.as_str(), "channels formed"],
    );
    ctx.reply(Response::RPL_LUSERME, &[me.as_str()]);
}
