//! JOIN command handler.

use async_trait::async_trait;
use nomad_proto::{ChannelExt, Message, Response, Verb, irc_to_lower};
use tracing::{debug, info};

use super::super::{Context, Handler};
use super::{report, split_list};
use crate::error::{ChannelError, HandlerError, HandlerResult};
use crate::state::{JoinParams, JoinReply};

/// A join that races a draining channel retries on the fresh one this
/// many times before giving up.
const DRAIN_RETRIES: usize = 3;

/// Handler for JOIN command.
pub struct JoinHandler;

#[async_trait]
impl Handler for JoinHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // JOIN <channels> [keys]
        let channels = msg.command.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let mut keys = msg.command.arg(1).map(|k| k.split(',')).into_iter().flatten();

        for name in split_list(channels) {
            let key = keys.next().filter(|k| !k.is_empty()).map(str::to_owned);

            if !name.is_channel_name() {
                let nick = ctx.nick();
                ctx.reply_err(Response::err_nosuchchannel(&nick, name));
                continue;
            }

            match join_channel(ctx, name, key).await {
                Ok(Some(reply)) => send_names(ctx, &reply),
                Ok(None) => {}
                Err(error) => report(ctx, Verb::JOIN, name, error),
            }
        }

        Ok(())
    }
}

/// Join one channel. `Ok(None)` when the user is already a member.
async fn join_channel(
    ctx: &mut Context<'_>,
    name: &str,
    key: Option<String>,
) -> Result<Option<JoinReply>, ChannelError> {
    let key_name = irc_to_lower(name);
    let Some(record) = ctx.session.record.clone() else {
        return Err(ChannelError::NotOnChannel);
    };

    let (nick, prefix) = {
        let user = record.read();
        if user.channels.contains(&key_name) {
            return Ok(None);
        }
        (user.nick.clone(), user.prefix())
    };

    let mut attempt = 0;
    let reply = loop {
        let handle = ctx.matrix.channel_or_create(name);
        let params = JoinParams {
            id: ctx.session.id,
            nick: nick.clone(),
            prefix: prefix.clone(),
            sender: ctx.session.sender.clone(),
            multi_prefix: ctx.session.multi_prefix(),
            key: key.clone(),
        };
        match handle.join(params).await {
            Err(ChannelError::Draining) if attempt < DRAIN_RETRIES => {
                attempt += 1;
                debug!(channel = %name, attempt, "channel draining, retrying join");
            }
            other => break other?,
        }
    };

    record.write().channels.insert(key_name);
    info!(client = %ctx.session.id, nick = %nick, channel = %reply.channel, "joined channel");
    Ok(Some(reply))
}

/// RPL_NAMREPLY followed by RPL_ENDOFNAMES.
fn send_names(ctx: &mut Context<'_>, reply: &JoinReply) {
    let names = reply.names.join(" ");
    ctx.reply(
        Response::RPL_NAMREPLY,
        &[reply.symbol, reply.channel.as_str(), names.as_str()],
    );
    ctx.reply(
        Response::RPL_ENDOFNAMES,
        &[reply.channel.as_str(), "End of /NAMES list."],
    );
}
