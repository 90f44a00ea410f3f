//! Semantic error constructors for `Response`.
//!
//! Each constructor returns a prefix-less [`Message`]; callers attach the
//! server prefix with [`Message::with_prefix`].

use crate::command::Command;
use crate::message::Message;
use crate::response::Response;

macro_rules! impl_err {
    (
        $(#[$meta:meta])*
        $name:ident, $resp:ident, $msg:literal
    ) => {
        $(#[$meta])*
        pub fn $name(client: &str) -> Message {
            Self::error_msg(Response::$resp, vec![client.to_string(), $msg.to_string()])
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident, $resp:ident, $arg:ident, $msg:literal
    ) => {
        $(#[$meta])*
        pub fn $name(client: &str, $arg: &str) -> Message {
            Self::error_msg(
                Response::$resp,
                vec![client.to_string(), $arg.to_string(), $msg.to_string()],
            )
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident, $resp:ident, $arg1:ident, $arg2:ident, $msg:literal
    ) => {
        $(#[$meta])*
        pub fn $name(client: &str, $arg1: &str, $arg2: &str) -> Message {
            Self::error_msg(
                Response::$resp,
                vec![
                    client.to_string(),
                    $arg1.to_string(),
                    $arg2.to_string(),
                    $msg.to_string(),
                ],
            )
        }
    };
}

impl Response {
    fn error_msg(response: Response, args: Vec<String>) -> Message {
        Message::from(Command::Response(response, args))
    }

    impl_err!(
        /// 401 ERR_NOSUCHNICK
        err_nosuchnick, ERR_NOSUCHNICK, nick, "No such nick/channel"
    );
    impl_err!(
        /// 403 ERR_NOSUCHCHANNEL
        err_nosuchchannel, ERR_NOSUCHCHANNEL, channel, "No such channel"
    );
    impl_err!(
        /// 410 ERR_INVALIDCAPCMD
        err_invalidcapcmd, ERR_INVALIDCAPCMD, subcommand, "Invalid CAP subcommand"
    );
    impl_err!(
        /// 417 ERR_INPUTTOOLONG
        err_inputtoolong, ERR_INPUTTOOLONG, "Input line too long"
    );
    impl_err!(
        /// 421 ERR_UNKNOWNCOMMAND
        err_unknowncommand, ERR_UNKNOWNCOMMAND, command, "Unknown command"
    );
    impl_err!(
        /// 422 ERR_NOMOTD
        err_nomotd, ERR_NOMOTD, "MOTD File is missing"
    );
    impl_err!(
        /// 431 ERR_NONICKNAMEGIVEN
        err_nonicknamegiven, ERR_NONICKNAMEGIVEN, "No nickname given"
    );
    impl_err!(
        /// 432 ERR_ERRONEUSNICKNAME
        err_erroneusnickname, ERR_ERRONEUSNICKNAME, nick, "Erroneous nickname"
    );
    impl_err!(
        /// 433 ERR_NICKNAMEINUSE
        err_nicknameinuse, ERR_NICKNAMEINUSE, nick, "Nickname is already in use"
    );
    impl_err!(
        /// 441 ERR_USERNOTINCHANNEL
        err_usernotinchannel, ERR_USERNOTINCHANNEL, nick, channel, "They aren't on that channel"
    );
    impl_err!(
        /// 442 ERR_NOTONCHANNEL
        err_notonchannel, ERR_NOTONCHANNEL, channel, "You're not on that channel"
    );
    impl_err!(
        /// 451 ERR_NOTREGISTERED
        err_notregistered, ERR_NOTREGISTERED, "You have not registered"
    );
    impl_err!(
        /// 461 ERR_NEEDMOREPARAMS
        err_needmoreparams, ERR_NEEDMOREPARAMS, command, "Not enough parameters"
    );
    impl_err!(
        /// 462 ERR_ALREADYREGISTRED
        err_alreadyregistred, ERR_ALREADYREGISTRED, "You may not reregister"
    );
    impl_err!(
        /// 464 ERR_PASSWDMISMATCH
        err_passwdmismatch, ERR_PASSWDMISMATCH, "Password incorrect"
    );
    impl_err!(
        /// 471 ERR_CHANNELISFULL
        err_channelisfull, ERR_CHANNELISFULL, channel, "Cannot join channel (+l)"
    );
    impl_err!(
        /// 473 ERR_INVITEONLYCHAN
        err_inviteonlychan, ERR_INVITEONLYCHAN, channel, "Cannot join channel (+i)"
    );
    impl_err!(
        /// 474 ERR_BANNEDFROMCHAN
        err_bannedfromchan, ERR_BANNEDFROMCHAN, channel, "Cannot join channel (+b)"
    );
    impl_err!(
        /// 475 ERR_BADCHANNELKEY
        err_badchannelkey, ERR_BADCHANNELKEY, channel, "Cannot join channel (+k)"
    );
    impl_err!(
        /// 481 ERR_NOPRIVILEGES
        err_noprivileges, ERR_NOPRIVILEGES, "Permission Denied- You're not an IRC operator"
    );
    impl_err!(
        /// 482 ERR_CHANOPRIVSNEEDED
        err_chanoprivsneeded, ERR_CHANOPRIVSNEEDED, channel, "You're not channel operator"
    );
    impl_err!(
        /// 491 ERR_NOOPERHOST
        err_nooperhost, ERR_NOOPERHOST, "No O-lines for your host"
    );
    impl_err!(
        /// 501 ERR_UMODEUNKNOWNFLAG
        err_umodeunknownflag, ERR_UMODEUNKNOWNFLAG, "Unknown MODE flag"
    );
    impl_err!(
        /// 502 ERR_USERSDONTMATCH
        err_usersdontmatch, ERR_USERSDONTMATCH, "Cannot change mode for other users"
    );

    impl_err!(
        /// 525 ERR_INVALIDKEY
        err_invalidkey, ERR_INVALIDKEY, channel, "Key is not well-formed"
    );

    /// 696 ERR_INVALIDMODEPARAM
    pub fn err_invalidmodeparam(
        client: &str,
        target: &str,
        mode: char,
        param: &str,
        description: &str,
    ) -> Message {
        Self::error_msg(
            Response::ERR_INVALIDMODEPARAM,
            vec![
                client.to_string(),
                target.to_string(),
                mode.to_string(),
                param.to_string(),
                description.to_string(),
            ],
        )
    }

    /// 472 ERR_UNKNOWNMODE
    pub fn err_unknownmode(client: &str, mode: char, channel: &str) -> Message {
        Self::error_msg(
            Response::ERR_UNKNOWNMODE,
            vec![
                client.to_string(),
                mode.to_string(),
                format!("is unknown mode char to me for {}", channel),
            ],
        )
    }
}
