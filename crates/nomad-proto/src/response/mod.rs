//! IRC numeric replies.
//!
//! Numerics are three-digit server-to-client codes. The table below is
//! closed: parsing a numeric outside it yields [`Command::Raw`].
//!
//! # Reference
//! - RFC 2812 Section 5: Replies
//! - Modern IRC numerics for 417, 525 and 696
//!
//! [`Command::Raw`]: crate::Command::Raw

#![allow(non_camel_case_types)]

mod constructors;
mod helpers;

pub use helpers::ResponseCategory;

/// IRC server response code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
#[allow(missing_docs)]
pub enum Response {
    /// 001 - Welcome to the network
    RPL_WELCOME = 1,
    /// 002 - Your host is running version
    RPL_YOURHOST = 2,
    /// 003 - Server creation date
    RPL_CREATED = 3,
    /// 004 - Server name, version and mode letters
    RPL_MYINFO = 4,
    /// 005 - Try another server
    RPL_BOUNCE = 5,
    RPL_TRACELINK = 200,
    RPL_TRACECONNECTING = 201,
    RPL_TRACEHANDSHAKE = 202,
    RPL_TRACEUNKNOWN = 203,
    RPL_TRACEOPERATOR = 204,
    RPL_TRACEUSER = 205,
    RPL_TRACESERVER = 206,
    RPL_TRACESERVICE = 207,
    RPL_TRACENEWTYPE = 208,
    RPL_TRACECLASS = 209,
    RPL_TRACERECONNECT = 210,
    RPL_STATSLINKINFO = 211,
    RPL_STATSCOMMANDS = 212,
    RPL_ENDOFSTATS = 219,
    /// 221 - Current user modes
    RPL_UMODEIS = 221,
    RPL_SERVLIST = 234,
    RPL_SERVLISTEND = 235,
    RPL_STATSUPTIME = 242,
    RPL_STATSOLINE = 243,
    /// 251 - Luser client count
    RPL_LUSERCLIENT = 251,
    /// 252 - Luser operator count
    RPL_LUSEROP = 252,
    /// 253 - Luser unregistered connections
    RPL_LUSERUNKNOWN = 253,
    /// 254 - Luser channel count
    RPL_LUSERCHANNELS = 254,
    /// 255 - Luser local info
    RPL_LUSERME = 255,
    RPL_ADMINME = 256,
    RPL_ADMINLOC1 = 257,
    RPL_ADMINLOC2 = 258,
    RPL_ADMINEMAIL = 259,
    RPL_TRACELOG = 261,
    RPL_TRACEEND = 262,
    RPL_TRYAGAIN = 263,
    RPL_AWAY = 301,
    RPL_USERHOST = 302,
    RPL_ISON = 303,
    /// 305 - No longer marked away
    RPL_UNAWAY = 305,
    /// 306 - Now marked away
    RPL_NOWAWAY = 306,
    RPL_WHOISUSER = 311,
    RPL_WHOISSERVER = 312,
    RPL_WHOISOPERATOR = 313,
    RPL_WHOWASUSER = 314,
    RPL_ENDOFWHO = 315,
    RPL_WHOISIDLE = 317,
    RPL_ENDOFWHOIS = 318,
    RPL_WHOISCHANNELS = 319,
    RPL_LIST = 322,
    RPL_LISTEND = 323,
    /// 324 - Current channel modes
    RPL_CHANNELMODEIS = 324,
    RPL_UNIQOPIS = 325,
    RPL_NOTOPIC = 331,
    RPL_TOPIC = 332,
    RPL_INVITING = 341,
    RPL_SUMMONING = 342,
    /// 346 - Invite mask entry
    RPL_INVITELIST = 346,
    /// 347 - End of invite masks
    RPL_ENDOFINVITELIST = 347,
    /// 348 - Exception mask entry
    RPL_EXCEPTLIST = 348,
    /// 349 - End of exception masks
    RPL_ENDOFEXCEPTLIST = 349,
    RPL_VERSION = 351,
    RPL_WHOREPLY = 352,
    /// 353 - Channel member list
    RPL_NAMREPLY = 353,
    RPL_LINKS = 364,
    RPL_ENDOFLINKS = 365,
    /// 366 - End of member list
    RPL_ENDOFNAMES = 366,
    /// 367 - Ban mask entry
    RPL_BANLIST = 367,
    /// 368 - End of ban masks
    RPL_ENDOFBANLIST = 368,
    RPL_ENDOFWHOWAS = 369,
    RPL_INFO = 371,
    /// 372 - MOTD line
    RPL_MOTD = 372,
    RPL_ENDOFINFO = 374,
    /// 375 - MOTD start
    RPL_MOTDSTART = 375,
    /// 376 - MOTD end
    RPL_ENDOFMOTD = 376,
    /// 381 - Operator status granted
    RPL_YOUREOPER = 381,
    RPL_REHASHING = 382,
    RPL_YOURESERVICE = 383,
    RPL_TIME = 391,
    RPL_USERSSTART = 392,
    RPL_USERS = 393,
    RPL_ENDOFUSERS = 394,
    RPL_NOUSERS = 395,
    /// 401 - No such nick
    ERR_NOSUCHNICK = 401,
    ERR_NOSUCHSERVER = 402,
    /// 403 - No such channel
    ERR_NOSUCHCHANNEL = 403,
    ERR_CANNOTSENDTOCHAN = 404,
    ERR_TOOMANYCHANNELS = 405,
    ERR_WASNOSUCHNICK = 406,
    ERR_TOOMANYTARGETS = 407,
    ERR_NOSUCHSERVICE = 408,
    ERR_NOORIGIN = 409,
    /// 410 - Invalid CAP subcommand
    ERR_INVALIDCAPCMD = 410,
    ERR_NORECIPIENT = 411,
    ERR_NOTEXTTOSEND = 412,
    ERR_NOTOPLEVEL = 413,
    ERR_WILDTOPLEVEL = 414,
    ERR_BADMASK = 415,
    /// 417 - Input line too long
    ERR_INPUTTOOLONG = 417,
    /// 421 - Unknown command
    ERR_UNKNOWNCOMMAND = 421,
    /// 422 - MOTD missing
    ERR_NOMOTD = 422,
    ERR_NOADMININFO = 423,
    ERR_FILEERROR = 424,
    /// 431 - No nickname given
    ERR_NONICKNAMEGIVEN = 431,
    /// 432 - Erroneous nickname
    ERR_ERRONEUSNICKNAME = 432,
    /// 433 - Nickname in use
    ERR_NICKNAMEINUSE = 433,
    ERR_NICKCOLLISION = 436,
    ERR_UNAVAILRESOURCE = 437,
    /// 441 - Target not on channel
    ERR_USERNOTINCHANNEL = 441,
    /// 442 - You are not on channel
    ERR_NOTONCHANNEL = 442,
    ERR_USERONCHANNEL = 443,
    ERR_NOLOGIN = 444,
    ERR_SUMMONDISABLED = 445,
    ERR_USERSDISABLED = 446,
    /// 451 - Not registered
    ERR_NOTREGISTERED = 451,
    /// 461 - Not enough parameters
    ERR_NEEDMOREPARAMS = 461,
    /// 462 - Already registered
    ERR_ALREADYREGISTRED = 462,
    ERR_NOPERMFORHOST = 463,
    /// 464 - Password incorrect
    ERR_PASSWDMISMATCH = 464,
    ERR_YOUREBANNEDCREEP = 465,
    ERR_YOUWILLBEBANNED = 466,
    ERR_KEYSET = 467,
    /// 471 - Channel is full (+l)
    ERR_CHANNELISFULL = 471,
    /// 472 - Unknown channel mode letter
    ERR_UNKNOWNMODE = 472,
    /// 473 - Invite only (+i)
    ERR_INVITEONLYCHAN = 473,
    ERR_BANNEDFROMCHAN = 474,
    /// 475 - Bad channel key (+k)
    ERR_BADCHANNELKEY = 475,
    ERR_BADCHANMASK = 476,
    ERR_NOCHANMODES = 477,
    ERR_BANLISTFULL = 478,
    /// 481 - Not an IRC operator
    ERR_NOPRIVILEGES = 481,
    /// 482 - Not a channel operator
    ERR_CHANOPRIVSNEEDED = 482,
    ERR_CANTKILLSERVER = 483,
    ERR_RESTRICTED = 484,
    ERR_UNIQOPPRIVSNEEDED = 485,
    /// 491 - No operator block for host
    ERR_NOOPERHOST = 491,
    /// 501 - Unknown user mode letter
    ERR_UMODEUNKNOWNFLAG = 501,
    /// 502 - Cannot change modes for other users
    ERR_USERSDONTMATCH = 502,
    /// 525 - Channel key is not well-formed
    ERR_INVALIDKEY = 525,
    /// 696 - Mode parameter is not well-formed
    ERR_INVALIDMODEPARAM = 696,
}

impl Response {
    /// Every numeric in the table, in ascending code order.
    pub const ALL: &'static [Response] = &[
        Response::RPL_WELCOME,
        Response::RPL_YOURHOST,
        Response::RPL_CREATED,
        Response::RPL_MYINFO,
        Response::RPL_BOUNCE,
        Response::RPL_TRACELINK,
        Response::RPL_TRACECONNECTING,
        Response::RPL_TRACEHANDSHAKE,
        Response::RPL_TRACEUNKNOWN,
        Response::RPL_TRACEOPERATOR,
        Response::RPL_TRACEUSER,
        Response::RPL_TRACESERVER,
        Response::RPL_TRACESERVICE,
        Response::RPL_TRACENEWTYPE,
        Response::RPL_TRACECLASS,
        Response::RPL_TRACERECONNECT,
        Response::RPL_STATSLINKINFO,
        Response::RPL_STATSCOMMANDS,
        Response::RPL_ENDOFSTATS,
        Response::RPL_UMODEIS,
        Response::RPL_SERVLIST,
        Response::RPL_SERVLISTEND,
        Response::RPL_STATSUPTIME,
        Response::RPL_STATSOLINE,
        Response::RPL_LUSERCLIENT,
        Response::RPL_LUSEROP,
        Response::RPL_LUSERUNKNOWN,
        Response::RPL_LUSERCHANNELS,
        Response::RPL_LUSERME,
        Response::RPL_ADMINME,
        Response::RPL_ADMINLOC1,
        Response::RPL_ADMINLOC2,
        Response::RPL_ADMINEMAIL,
        Response::RPL_TRACELOG,
        Response::RPL_TRACEEND,
        Response::RPL_TRYAGAIN,
        Response::RPL_AWAY,
        Response::RPL_USERHOST,
        Response::RPL_ISON,
        Response::RPL_UNAWAY,
        Response::RPL_NOWAWAY,
        Response::RPL_WHOISUSER,
        Response::RPL_WHOISSERVER,
        Response::RPL_WHOISOPERATOR,
        Response::RPL_WHOWASUSER,
        Response::RPL_ENDOFWHO,
        Response::RPL_WHOISIDLE,
        Response::RPL_ENDOFWHOIS,
        Response::RPL_WHOISCHANNELS,
        Response::RPL_LIST,
        Response::RPL_LISTEND,
        Response::RPL_CHANNELMODEIS,
        Response::RPL_UNIQOPIS,
        Response::RPL_NOTOPIC,
        Response::RPL_TOPIC,
        Response::RPL_INVITING,
        Response::RPL_SUMMONING,
        Response::RPL_INVITELIST,
        Response::RPL_ENDOFINVITELIST,
        Response::RPL_EXCEPTLIST,
        Response::RPL_ENDOFEXCEPTLIST,
        Response::RPL_VERSION,
        Response::RPL_WHOREPLY,
        Response::RPL_NAMREPLY,
        Response::RPL_LINKS,
        Response::RPL_ENDOFLINKS,
        Response::RPL_ENDOFNAMES,
        Response::RPL_BANLIST,
        Response::RPL_ENDOFBANLIST,
        Response::RPL_ENDOFWHOWAS,
        Response::RPL_INFO,
        Response::RPL_MOTD,
        Response::RPL_ENDOFINFO,
        Response::RPL_MOTDSTART,
        Response::RPL_ENDOFMOTD,
        Response::RPL_YOUREOPER,
        Response::RPL_REHASHING,
        Response::RPL_YOURESERVICE,
        Response::RPL_TIME,
        Response::RPL_USERSSTART,
        Response::RPL_USERS,
        Response::RPL_ENDOFUSERS,
        Response::RPL_NOUSERS,
        Response::ERR_NOSUCHNICK,
        Response::ERR_NOSUCHSERVER,
        Response::ERR_NOSUCHCHANNEL,
        Response::ERR_CANNOTSENDTOCHAN,
        Response::ERR_TOOMANYCHANNELS,
        Response::ERR_WASNOSUCHNICK,
        Response::ERR_TOOMANYTARGETS,
        Response::ERR_NOSUCHSERVICE,
        Response::ERR_NOORIGIN,
        Response::ERR_INVALIDCAPCMD,
        Response::ERR_NORECIPIENT,
        Response::ERR_NOTEXTTOSEND,
        Response::ERR_NOTOPLEVEL,
        Response::ERR_WILDTOPLEVEL,
        Response::ERR_BADMASK,
        Response::ERR_INPUTTOOLONG,
        Response::ERR_UNKNOWNCOMMAND,
        Response::ERR_NOMOTD,
        Response::ERR_NOADMININFO,
        Response::ERR_FILEERROR,
        Response::ERR_NONICKNAMEGIVEN,
        Response::ERR_ERRONEUSNICKNAME,
        Response::ERR_NICKNAMEINUSE,
        Response::ERR_NICKCOLLISION,
        Response::ERR_UNAVAILRESOURCE,
        Response::ERR_USERNOTINCHANNEL,
        Response::ERR_NOTONCHANNEL,
        Response::ERR_USERONCHANNEL,
        Response::ERR_NOLOGIN,
        Response::ERR_SUMMONDISABLED,
        Response::ERR_USERSDISABLED,
        Response::ERR_NOTREGISTERED,
        Response::ERR_NEEDMOREPARAMS,
        Response::ERR_ALREADYREGISTRED,
        Response::ERR_NOPERMFORHOST,
        Response::ERR_PASSWDMISMATCH,
        Response::ERR_YOUREBANNEDCREEP,
        Response::ERR_YOUWILLBEBANNED,
        Response::ERR_KEYSET,
        Response::ERR_CHANNELISFULL,
        Response::ERR_UNKNOWNMODE,
        Response::ERR_INVITEONLYCHAN,
        Response::ERR_BANNEDFROMCHAN,
        Response::ERR_BADCHANNELKEY,
        Response::ERR_BADCHANMASK,
        Response::ERR_NOCHANMODES,
        Response::ERR_BANLISTFULL,
        Response::ERR_NOPRIVILEGES,
        Response::ERR_CHANOPRIVSNEEDED,
        Response::ERR_CANTKILLSERVER,
        Response::ERR_RESTRICTED,
        Response::ERR_UNIQOPPRIVSNEEDED,
        Response::ERR_NOOPERHOST,
        Response::ERR_UMODEUNKNOWNFLAG,
        Response::ERR_USERSDONTMATCH,
        Response::ERR_INVALIDKEY,
        Response::ERR_INVALIDMODEPARAM,
    ];
}
