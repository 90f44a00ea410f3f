use async_trait::async_trait;
use nomad_proto::{Message, Response, UserMode, Verb};
use tracing::{info, warn};

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};

/// Handler for OPER command.
///
/// `OPER name password`
///
/// Authenticates a user as an IRC operator. Success sets `+o` and echoes
/// the mode change; a failure is reported and the connection stays open.
pub struct OperHandler;

#[async_trait]
impl Handler for OperHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // OPER <name> <password>
        let (Some(name), Some(password)) = (msg.command.arg(0), msg.command.arg(1)) else {
            return Err(HandlerError::NeedMoreParams);
        };
        if name.is_empty() || password.is_empty() {
            return Err(HandlerError::NeedMoreParams);
        }

        let nick = ctx.nick();
        match ctx.matrix.credentials.verify_oper(name, password) {
            None => {
                warn!(nick = %nick, oper_name = %name, "OPER failed: unknown oper name");
                return Err(HandlerError::NoOperHost(name.to_owned()));
            }
            Some(false) => {
                warn!(nick = %nick, oper_name = %name, "OPER failed: incorrect password");
                return Err(HandlerError::OperPasswordMismatch);
            }
            Some(true) => {}
        }

        let record = ctx
            .session
            .record
            .clone()
            .ok_or_else(|| HandlerError::Internal("registered session without a record".into()))?;
        let prefix = {
            let mut user = record.write();
            user.modes.insert(UserMode::Operator);
            user.prefix()
        };

        info!(nick = %nick, oper_name = %name, "OPER successful");

        ctx.reply(Response::RPL_YOUREOPER, &["You are now an IRC operator"]);
        ctx.send(Message::verb(Some(prefix), Verb::MODE, &[nick.as_str(), "+o"]));
        Ok(())
    }
}
