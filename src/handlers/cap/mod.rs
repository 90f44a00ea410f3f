//! CAP command handler for IRCv3 capability negotiation.
//!
//! Implements the LS, LIST, REQ, ACK, CLEAR and END subcommands.
//! Reference: <https://ircv3.net/specs/extensions/capability-negotiation>
//!
//! Every subcommand first runs through the session's CAP state machine;
//! a rejected transition is answered with `ERR_INVALIDCAPCMD` and changes
//! nothing.

mod subcommands;

use async_trait::async_trait;
use nomad_proto::{CapSubCommand, Message};
use tracing::debug;

use super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use subcommands::{handle_ack, handle_clear, handle_end, handle_list, handle_ls, handle_req};

/// Handler for CAP command.
pub struct CapHandler;

#[async_trait]
impl Handler for CapHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // CAP <subcommand> [:capabilities]
        let sub_str = msg.command.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let subcommand: CapSubCommand = sub_str
            .parse()
            .map_err(|_| HandlerError::InvalidCapCmd(sub_str.to_owned()))?;
        let arg = msg.command.arg(1).unwrap_or("");

        let before = ctx.session.registration.cap_state();
        let after = ctx.session.registration.on_cap(subcommand)?;
        if ctx.matrix.debug.client && before != after {
            debug!(client = %ctx.session.id, from = ?before, to = ?after, "cap state");
        }

        match subcommand {
            CapSubCommand::LS => handle_ls(ctx),
            CapSubCommand::LIST => handle_list(ctx),
            CapSubCommand::REQ => handle_req(ctx, arg),
            CapSubCommand::ACK => handle_ack(ctx, arg),
            CapSubCommand::CLEAR => handle_clear(ctx),
            CapSubCommand::END => return handle_end(ctx),
            // Rejected by the state machine above.
            CapSubCommand::NAK => return Err(HandlerError::InvalidCapCmd(sub_str.to_owned())),
        }
        Ok(())
    }
}
