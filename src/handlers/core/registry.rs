//! Command handler registry and dispatch.

use std::collections::HashMap;

use nomad_proto::{Command, Message, Verb};
use tracing::{Instrument, Level, debug, span};

use super::context::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{
    cap::CapHandler,
    channel::{JoinHandler, PartHandler},
    connection::{NickHandler, PassHandler, PingHandler, PongHandler, QuitHandler, UserHandler},
    mode::ModeHandler,
    oper::OperHandler,
    server_query::MotdHandler,
    user_status::AwayHandler,
};

/// Registry of command handlers.
pub struct Registry {
    handlers: HashMap<Verb, Box<dyn Handler>>,
}

/// The handler for `verb`, if this server implements it.
///
/// The match is exhaustive so a new verb cannot be added to the protocol
/// crate without deciding here whether it is served.
fn handler_for(verb: Verb) -> Option<Box<dyn Handler>> {
    let handler: Box<dyn Handler> = match verb {
        // Connection/registration
        Verb::CAP => Box::new(CapHandler),
        Verb::NICK => Box::new(NickHandler),
        Verb::USER => Box::new(UserHandler),
        Verb::PASS => Box::new(PassHandler),
        Verb::PING => Box::new(PingHandler),
        Verb::PONG => Box::new(PongHandler),
        Verb::QUIT => Box::new(QuitHandler),

        // Channels and modes
        Verb::JOIN => Box::new(JoinHandler),
        Verb::PART => Box::new(PartHandler),
        Verb::MODE => Box::new(ModeHandler),

        // Session
        Verb::AWAY => Box::new(AwayHandler),
        Verb::OPER => Box::new(OperHandler),
        Verb::MOTD => Box::new(MotdHandler),

        // Message routing and queries live outside this core.
        Verb::DEBUG
        | Verb::ERROR
        | Verb::INVITE
        | Verb::ISON
        | Verb::KICK
        | Verb::KILL
        | Verb::LIST
        | Verb::NAMES
        | Verb::NOTICE
        | Verb::PRIVMSG
        | Verb::PROXY
        | Verb::TIME
        | Verb::TOPIC
        | Verb::VERSION
        | Verb::WHO
        | Verb::WHOIS => return None,
    };
    Some(handler)
}

impl Registry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let handlers = Verb::ALL
            .iter()
            .filter_map(|verb| handler_for(*verb).map(|h| (*verb, h)))
            .collect();
        Self { handlers }
    }

    /// Whether `verb` has a handler.
    pub fn handles(&self, verb: Verb) -> bool {
        self.handlers.contains_key(&verb)
    }

    /// Dispatch a message to the appropriate handler.
    ///
    /// Before registration completes only the verbs allowed by
    /// [`Verb::allowed_before_registration`] reach a handler; everything
    /// else is `ERR_NOTREGISTERED`.
    pub async fn dispatch(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let registered = ctx.session.is_registered();

        let verb = match msg.command {
            Command::Verb(verb, _) => verb,
            Command::Raw(ref name, _) => {
                return Err(if registered {
                    HandlerError::UnknownCommand(name.clone())
                } else {
                    HandlerError::NotRegistered
                });
            }
            Command::Response(..) => {
                // Numerics only flow server to client.
                debug!(client = %ctx.session.id, command = %msg.command.name(), "numeric from client ignored");
                return Ok(());
            }
        };

        if !registered && !verb.allowed_before_registration() {
            return Err(HandlerError::NotRegistered);
        }

        let Some(handler) = self.handlers.get(&verb) else {
            return Err(HandlerError::UnknownCommand(verb.as_str().to_owned()));
        };

        let irc_span = span!(
            Level::DEBUG,
            "irc.command",
            command = %verb,
            client = %ctx.session.id,
            nick = ctx.session.nick.as_deref(),
        );

        let result = handler.handle(ctx, msg).instrument(irc_span).await;
        if let Err(ref e) = result {
            debug!(command = %verb, error = %e, code = e.error_code(), "command error");
        }
        result
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
