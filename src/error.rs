//! Unified error handling for nomad-ircd.
//!
//! Every failure a session can hit while handling a line is a
//! [`HandlerError`]. Its [`ErrorKind`] decides whether the connection
//! survives: only authentication failures, timeouts and internal faults
//! close it.

use nomad_proto::{
    CapSubCommand, Message, MessageParseError, Prefix, ProtocolError, Response,
};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::state::{CapTransitionError, RegistrationError};

/// Error taxonomy for connection handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed line or argument.
    ProtocolSyntax,
    /// Command used in the wrong phase or negotiation state.
    Sequencing,
    /// Requester lacks the privilege for the change or command.
    Permission,
    /// Bad PASS or nickname collision during registration.
    Authentication,
    /// Login or ping timer expired.
    Timeout,
    /// The connection can no longer be served (output closed, actor gone).
    Internal,
}

impl ErrorKind {
    /// Whether the connection must be closed.
    pub fn is_fatal(self) -> bool {
        matches!(
            self,
            ErrorKind::Authentication | ErrorKind::Timeout | ErrorKind::Internal
        )
    }
}

/// Which timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutKind {
    /// Registration not finished within the login window.
    Login,
    /// No traffic after PING within the quit window.
    Ping,
}

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("malformed line: {0}")]
    Malformed(#[from] ProtocolError),

    #[error("not enough parameters")]
    NeedMoreParams,

    #[error("no nickname given")]
    NoNicknameGiven,

    #[error("erroneous nickname: {0}")]
    ErroneousNickname(String),

    #[error("nickname in use: {0}")]
    NicknameInUse(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("invalid CAP subcommand: {0}")]
    InvalidCapCmd(String),

    #[error("no such nick: {0}")]
    NoSuchNick(String),

    #[error("no such channel: {0}")]
    NoSuchChannel(String),

    #[error("not registered")]
    NotRegistered,

    #[error("already registered")]
    AlreadyRegistered,

    #[error("late capability negotiation: {0}")]
    LateCapNegotiation(CapSubCommand),

    #[error("channel {channel}: {error}")]
    Channel {
        channel: String,
        error: ChannelError,
    },

    #[error("cannot change mode for other users")]
    UsersDontMatch,

    #[error("operator password mismatch")]
    OperPasswordMismatch,

    #[error("no operator block for {0}")]
    NoOperHost(String),

    #[error("password mismatch")]
    PasswordMismatch,

    #[error("password required")]
    PasswordRequired,

    #[error("nickname collision: {0}")]
    NickCollision(String),

    #[error("{0:?} timeout")]
    Timeout(TimeoutKind),

    #[error("send error: {0}")]
    Send(#[from] mpsc::error::SendError<Message>),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CapTransitionError> for HandlerError {
    fn from(e: CapTransitionError) -> Self {
        match e {
            CapTransitionError::AlreadyNegotiated(sub) => HandlerError::LateCapNegotiation(sub),
            CapTransitionError::ServerOnly(sub) => HandlerError::InvalidCapCmd(sub.to_string()),
        }
    }
}

impl From<RegistrationError> for HandlerError {
    fn from(e: RegistrationError) -> Self {
        match e {
            RegistrationError::AlreadyRegistered | RegistrationError::PassTooLate => {
                HandlerError::AlreadyRegistered
            }
            RegistrationError::PasswordRequired => HandlerError::PasswordRequired,
        }
    }
}

impl HandlerError {
    /// Position of this error in the taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Malformed(_)
            | Self::NeedMoreParams
            | Self::NoNicknameGiven
            | Self::ErroneousNickname(_)
            | Self::NicknameInUse(_)
            | Self::UnknownCommand(_)
            | Self::InvalidCapCmd(_)
            | Self::NoSuchNick(_)
            | Self::NoSuchChannel(_) => ErrorKind::ProtocolSyntax,
            Self::NotRegistered | Self::AlreadyRegistered | Self::LateCapNegotiation(_) => {
                ErrorKind::Sequencing
            }
            Self::Channel { error, .. } => error.kind(),
            Self::UsersDontMatch | Self::OperPasswordMismatch | Self::NoOperHost(_) => {
                ErrorKind::Permission
            }
            Self::PasswordMismatch | Self::PasswordRequired | Self::NickCollision(_) => {
                ErrorKind::Authentication
            }
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::Send(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Whether the connection must be closed.
    #[inline]
    pub fn is_fatal(&self) -> bool {
        self.kind().is_fatal()
    }

    /// Get a static error code string for log fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "malformed",
            Self::NeedMoreParams => "need_more_params",
            Self::NoNicknameGiven => "no_nickname_given",
            Self::ErroneousNickname(_) => "erroneous_nickname",
            Self::NicknameInUse(_) => "nickname_in_use",
            Self::UnknownCommand(_) => "unknown_command",
            Self::InvalidCapCmd(_) => "invalid_cap_cmd",
            Self::NoSuchNick(_) => "no_such_nick",
            Self::NoSuchChannel(_) => "no_such_channel",
            Self::NotRegistered => "not_registered",
            Self::AlreadyRegistered => "already_registered",
            Self::LateCapNegotiation(_) => "late_cap_negotiation",
            Self::Channel { error, .. } => error.error_code(),
            Self::UsersDontMatch => "users_dont_match",
            Self::OperPasswordMismatch => "oper_password_mismatch",
            Self::NoOperHost(_) => "no_oper_host",
            Self::PasswordMismatch => "password_mismatch",
            Self::PasswordRequired => "password_required",
            Self::NickCollision(_) => "nick_collision",
            Self::Timeout(TimeoutKind::Login) => "login_timeout",
            Self::Timeout(TimeoutKind::Ping) => "ping_timeout",
            Self::Send(_) => "send_error",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Convert to an IRC error reply message.
    ///
    /// Returns `None` for errors that don't warrant a client-visible reply
    /// (e.g., timeouts, send failures, empty lines).
    pub fn to_irc_reply(&self, server_name: &str, nick: &str, cmd_name: &str) -> Option<Message> {
        let msg = match self {
            Self::Malformed(ProtocolError::MessageTooLong { .. }) => {
                Response::err_inputtoolong(nick)
            }
            Self::Malformed(e) => match e.parse_cause() {
                Some(MessageParseError::EmptyLine | MessageParseError::MissingCommand) => {
                    return None;
                }
                Some(
                    MessageParseError::MalformedNumeric(verb)
                    | MessageParseError::InvalidCommand(verb),
                ) => Response::err_unknowncommand(nick, verb),
                _ => Response::err_unknowncommand(nick, e.command_hint()?),
            },
            Self::NeedMoreParams => Response::err_needmoreparams(nick, cmd_name),
            Self::NoNicknameGiven => Response::err_nonicknamegiven(nick),
            Self::ErroneousNickname(bad) => Response::err_erroneusnickname(nick, bad),
            Self::NicknameInUse(taken) | Self::NickCollision(taken) => {
                Response::err_nicknameinuse(nick, taken)
            }
            Self::UnknownCommand(cmd) => Response::err_unknowncommand(nick, cmd),
            Self::InvalidCapCmd(sub) => Response::err_invalidcapcmd(nick, sub),
            Self::LateCapNegotiation(sub) => Response::err_invalidcapcmd(nick, sub.as_str()),
            Self::NoSuchNick(target) => Response::err_nosuchnick(nick, target),
            Self::NoSuchChannel(target) => Response::err_nosuchchannel(nick, target),
            Self::NotRegistered => Response::err_notregistered(nick),
            Self::AlreadyRegistered => Response::err_alreadyregistred(nick),
            Self::Channel { channel, error } => error.to_irc_reply(nick, channel),
            Self::UsersDontMatch => Response::err_usersdontmatch(nick),
            Self::OperPasswordMismatch | Self::PasswordMismatch | Self::PasswordRequired => {
                Response::err_passwdmismatch(nick)
            }
            Self::NoOperHost(_) => Response::err_nooperhost(nick),

            // These errors don't get client-visible replies
            Self::Timeout(_) | Self::Send(_) | Self::Internal(_) => return None,
        };

        Some(msg.with_prefix(Prefix::ServerName(server_name.to_string())))
    }

    /// Reason given in the closing `ERROR` line for fatal errors.
    pub fn close_reason(&self) -> String {
        match self {
            Self::Timeout(TimeoutKind::Login) => "Registration timeout".to_string(),
            Self::Timeout(TimeoutKind::Ping) => "Ping timeout".to_string(),
            Self::PasswordMismatch | Self::PasswordRequired => "Bad password".to_string(),
            Self::NickCollision(_) => "Nickname collision".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

/// Channel operation errors.
///
/// These errors represent channel-specific failures that can be mapped
/// to numeric replies by handler code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("not on channel")]
    NotOnChannel,

    #[error("you're not channel operator")]
    ChanOpPrivsNeeded,

    #[error("user {0} is not on that channel")]
    UserNotInChannel(String),

    #[error("cannot join channel (+i)")]
    InviteOnlyChan,

    #[error("cannot join channel (+l)")]
    ChannelIsFull,

    #[error("cannot join channel (+k)")]
    BadChannelKey,

    #[error("cannot join channel (+b)")]
    BannedFromChan,

    /// The channel actor is shutting down; the caller may retry.
    #[error("channel is closing")]
    Draining,
}

impl ChannelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotOnChannel | Self::UserNotInChannel(_) => ErrorKind::Sequencing,
            Self::ChanOpPrivsNeeded
            | Self::InviteOnlyChan
            | Self::ChannelIsFull
            | Self::BadChannelKey
            | Self::BannedFromChan => ErrorKind::Permission,
            Self::Draining => ErrorKind::Internal,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotOnChannel => "not_on_channel",
            Self::ChanOpPrivsNeeded => "chanop_privs_needed",
            Self::UserNotInChannel(_) => "user_not_in_channel",
            Self::InviteOnlyChan => "invite_only_chan",
            Self::ChannelIsFull => "channel_is_full",
            Self::BadChannelKey => "bad_channel_key",
            Self::BannedFromChan => "banned_from_chan",
            Self::Draining => "channel_draining",
        }
    }

    /// Convert to an IRC error reply message (without prefix).
    pub fn to_irc_reply(&self, nick: &str, channel: &str) -> Message {
        match self {
            Self::NotOnChannel => Response::err_notonchannel(nick, channel),
            Self::ChanOpPrivsNeeded => Response::err_chanoprivsneeded(nick, channel),
            Self::UserNotInChannel(target) => Response::err_usernotinchannel(nick, target, channel),
            Self::InviteOnlyChan => Response::err_inviteonlychan(nick, channel),
            Self::ChannelIsFull => Response::err_channelisfull(nick, channel),
            Self::BadChannelKey => Response::err_badchannelkey(nick, channel),
            Self::BannedFromChan => Response::err_bannedfromchan(nick, channel),
            Self::Draining => Response::err_nosuchchannel(nick, channel),
        }
    }
}
