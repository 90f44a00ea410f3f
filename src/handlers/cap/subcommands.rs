use std::collections::HashSet;

use nomad_proto::{CapModifier, CapSubCommand, CapToken, Message, Verb};
use tracing::{debug, info};

use crate::error::HandlerResult;
use crate::handlers::{Context, try_complete_registration};

/// `:<server> CAP <nick> <sub> <list>`
fn cap_reply(ctx: &Context<'_>, sub: CapSubCommand, list: &str) -> Message {
    let nick = ctx.nick();
    Message::verb(
        Some(ctx.server_prefix()),
        Verb::CAP,
        &[nick.as_str(), sub.as_str(), list],
    )
}

/// Keep the registered user's record in step with the negotiated set.
fn sync_record(ctx: &Context<'_>) {
    if let Some(ref record) = ctx.session.record {
        record.write().multi_prefix = ctx.session.multi_prefix();
    }
}

/// Handle `CAP LS` - list supported capabilities.
pub fn handle_ls(ctx: &mut Context<'_>) {
    let list = ctx.matrix.caps.ls_list();
    let reply = cap_reply(ctx, CapSubCommand::LS, &list);
    ctx.send(reply);
}

/// Handle `CAP LIST` - list enabled capabilities.
pub fn handle_list(ctx: &mut Context<'_>) {
    let list = ctx.session.caps.to_list();
    let reply = cap_reply(ctx, CapSubCommand::LIST, &list);
    ctx.send(reply);
}

/// Handle `CAP REQ :<tokens>`.
///
/// Supported names are acknowledged in one ACK line echoing each token with
/// its modifier; unsupported names, and attempts to disable a sticky
/// capability, are echoed in one NAK line. Successive requests accumulate.
pub fn handle_req(ctx: &mut Context<'_>, arg: &str) {
    let tokens = CapToken::parse_list(arg);
    let supported: HashSet<&str> = ctx
        .matrix
        .caps
        .intersect(tokens.iter().map(|t| t.name.as_str()))
        .0
        .into_iter()
        .collect();

    let mut acked = Vec::with_capacity(tokens.len());
    let mut naked = Vec::new();

    for token in &tokens {
        let name = token.name.as_str();
        if !supported.contains(name) {
            naked.push(token.to_string());
            continue;
        }

        let session = &mut *ctx.session;
        match token.modifier {
            Some(CapModifier::Disable) if session.sticky.contains(name) => {
                naked.push(token.to_string());
                continue;
            }
            Some(CapModifier::Disable) => {
                session.caps.remove(name);
                session.pending_ack.remove(name);
            }
            Some(CapModifier::Sticky) => {
                session.caps.set(name, true);
                session.sticky.insert(name.to_owned());
            }
            Some(CapModifier::Ack) => {
                // Present but off until the client confirms.
                if !session.caps.is_enabled(name) {
                    session.caps.set(name, false);
                    session.pending_ack.insert(name.to_owned());
                }
            }
            None => session.caps.set(name, true),
        }
        acked.push(token.to_string());
    }

    if !acked.is_empty() || naked.is_empty() {
        let reply = cap_reply(ctx, CapSubCommand::ACK, &acked.join(" "));
        ctx.send(reply);
    }
    if !naked.is_empty() {
        let reply = cap_reply(ctx, CapSubCommand::NAK, &naked.join(" "));
        ctx.send(reply);
    }

    sync_record(ctx);
    debug!(client = %ctx.session.id, ack = ?acked, nak = ?naked, "CAP REQ");
}

/// Handle a client `CAP ACK`, confirming capabilities granted with `~`.
pub fn handle_ack(ctx: &mut Context<'_>, arg: &str) {
    for token in CapToken::parse_list(arg) {
        if ctx.session.pending_ack.remove(&token.name) {
            ctx.session.caps.set(token.name, true);
        }
    }
    sync_record(ctx);
}

/// Handle `CAP CLEAR` - drop every non-sticky capability and report what
/// is left.
pub fn handle_clear(ctx: &mut Context<'_>) {
    let session = &mut *ctx.session;
    let cleared: Vec<String> = session
        .caps
        .iter()
        .map(|(name, _)| name.to_owned())
        .filter(|name| !session.sticky.contains(name))
        .collect();
    for name in &cleared {
        session.caps.remove(name);
    }
    session.pending_ack.clear();

    let list = ctx.session.caps.to_list();
    let reply = cap_reply(ctx, CapSubCommand::ACK, &list);
    ctx.send(reply);
    sync_record(ctx);
}

/// Handle `CAP END` - finish negotiation and register if NICK and USER are in.
pub fn handle_end(ctx: &mut Context<'_>) -> HandlerResult {
    info!(
        client = %ctx.session.id,
        capabilities = %ctx.session.caps.to_list(),
        "CAP negotiation complete"
    );
    try_complete_registration(ctx)
}
