//! Mode letters and their static argument classes.
//!
//! Every letter has a fixed [`ModeKind`], from which its [`Arity`] follows.
//! Nothing here changes at runtime.

use std::fmt;
use std::hash::Hash;

use crate::error::ModeError;

/// What a mode change does with its letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModeOp {
    /// '+' - set the mode
    Add,
    /// '-' - clear the mode
    Remove,
    /// '=' - query the mode
    List,
}

impl ModeOp {
    /// Wire character.
    pub fn as_char(self) -> char {
        match self {
            ModeOp::Add => '+',
            ModeOp::Remove => '-',
            ModeOp::List => '=',
        }
    }

    /// Parse an operator character.
    pub fn from_char(c: char) -> Option<ModeOp> {
        match c {
            '+' => Some(ModeOp::Add),
            '-' => Some(ModeOp::Remove),
            '=' => Some(ModeOp::List),
            _ => None,
        }
    }
}

/// Argument requirement of a mode letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Never takes an argument.
    None,
    /// Takes exactly one argument for both add and remove.
    Required,
    /// Takes an argument only when being added.
    RequiredOnAdd,
}

/// Category of a mode letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModeKind {
    /// Plain on/off flag.
    Flag,
    /// Mask list (`b`, `e`, `I`); an argument-less change queries the list.
    List,
    /// Status of a channel member, argument is a nickname.
    Membership,
    /// Flag that carries a value while set (`k`, `l`).
    Parameter,
}

impl ModeKind {
    /// Arity implied by the category.
    pub const fn arity(self) -> Arity {
        match self {
            ModeKind::Flag => Arity::None,
            ModeKind::List | ModeKind::Membership => Arity::Required,
            ModeKind::Parameter => Arity::RequiredOnAdd,
        }
    }
}

/// Whether a MODE command targets a user or a channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// Nickname target.
    User,
    /// Channel target.
    Channel,
}

/// Common interface of [`UserMode`] and [`ChannelMode`].
pub trait ModeType: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Target kind this letter set belongs to.
    const TARGET: TargetKind;

    /// Every letter, in canonical display order.
    const ALL: &'static [Self];

    /// Look up a letter.
    fn from_char(c: char) -> Option<Self>;

    /// The letter.
    fn as_char(self) -> char;

    /// Category of the letter.
    fn kind(self) -> ModeKind;

    /// Argument requirement of the letter.
    fn arity(self) -> Arity {
        self.kind().arity()
    }

    /// Whether `op` on this letter consumes an argument token.
    fn consumes_arg(self, op: ModeOp) -> bool {
        match (self.arity(), op) {
            (_, ModeOp::List) => false,
            (Arity::None, _) => false,
            (Arity::Required, _) => true,
            (Arity::RequiredOnAdd, op) => op == ModeOp::Add,
        }
    }
}

/// User modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UserMode {
    /// 'a' - away, managed through AWAY
    Away,
    /// 'i' - invisible
    Invisible,
    /// 'O' - local operator
    LocalOperator,
    /// 'o' - operator
    Operator,
    /// 'r' - restricted connection
    Restricted,
    /// 's' - receives server notices (deprecated)
    ServerNotice,
    /// 'w' - receives WALLOPS
    WallOps,
}

impl ModeType for UserMode {
    const TARGET: TargetKind = TargetKind::User;

    const ALL: &'static [Self] = &[
        UserMode::Away,
        UserMode::Invisible,
        UserMode::LocalOperator,
        UserMode::Operator,
        UserMode::Restricted,
        UserMode::ServerNotice,
        UserMode::WallOps,
    ];

    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'a' => UserMode::Away,
            'i' => UserMode::Invisible,
            'O' => UserMode::LocalOperator,
            'o' => UserMode::Operator,
            'r' => UserMode::Restricted,
            's' => UserMode::ServerNotice,
            'w' => UserMode::WallOps,
            _ => return None,
        })
    }

    fn as_char(self) -> char {
        match self {
            UserMode::Away => 'a',
            UserMode::Invisible => 'i',
            UserMode::LocalOperator => 'O',
            UserMode::Operator => 'o',
            UserMode::Restricted => 'r',
            UserMode::ServerNotice => 's',
            UserMode::WallOps => 'w',
        }
    }

    fn kind(self) -> ModeKind {
        ModeKind::Flag
    }
}

/// Channel modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelMode {
    /// 'a' - anonymous
    Anonymous,
    /// 'b' - ban mask
    BanMask,
    /// 'O' - channel creator flag
    ChannelCreator,
    /// 'o' - channel operator
    ChannelOperator,
    /// 'e' - ban exception mask
    ExceptionMask,
    /// 'I' - invite exception mask
    InviteMask,
    /// 'i' - invite only
    InviteOnly,
    /// 'k' - key
    Key,
    /// 'm' - moderated
    Moderated,
    /// 'n' - no messages from outside
    NoOutside,
    /// 't' - only operators may set the topic
    OpOnlyTopic,
    /// 'P' - persists with no members
    Persistent,
    /// 'p' - private
    Private,
    /// 'q' - quiet
    Quiet,
    /// 'r' - server reop
    ReOp,
    /// 's' - secret (deprecated)
    Secret,
    /// 'l' - member limit
    UserLimit,
    /// 'v' - voice
    Voice,
}

impl ModeType for ChannelMode {
    const TARGET: TargetKind = TargetKind::Channel;

    const ALL: &'static [Self] = &[
        ChannelMode::Anonymous,
        ChannelMode::BanMask,
        ChannelMode::ChannelCreator,
        ChannelMode::ChannelOperator,
        ChannelMode::ExceptionMask,
        ChannelMode::InviteMask,
        ChannelMode::InviteOnly,
        ChannelMode::Key,
        ChannelMode::Moderated,
        ChannelMode::NoOutside,
        ChannelMode::OpOnlyTopic,
        ChannelMode::Persistent,
        ChannelMode::Private,
        ChannelMode::Quiet,
        ChannelMode::ReOp,
        ChannelMode::Secret,
        ChannelMode::UserLimit,
        ChannelMode::Voice,
    ];

    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'a' => ChannelMode::Anonymous,
            'b' => ChannelMode::BanMask,
            'O' => ChannelMode::ChannelCreator,
            'o' => ChannelMode::ChannelOperator,
            'e' => ChannelMode::ExceptionMask,
            'I' => ChannelMode::InviteMask,
            'i' => ChannelMode::InviteOnly,
            'k' => ChannelMode::Key,
            'm' => ChannelMode::Moderated,
            'n' => ChannelMode::NoOutside,
            't' => ChannelMode::OpOnlyTopic,
            'P' => ChannelMode::Persistent,
            'p' => ChannelMode::Private,
            'q' => ChannelMode::Quiet,
            'r' => ChannelMode::ReOp,
            's' => ChannelMode::Secret,
            'l' => ChannelMode::UserLimit,
            'v' => ChannelMode::Voice,
            _ => return None,
        })
    }

    fn as_char(self) -> char {
        match self {
            ChannelMode::Anonymous => 'a',
            ChannelMode::BanMask => 'b',
            ChannelMode::ChannelCreator => 'O',
            ChannelMode::ChannelOperator => 'o',
            ChannelMode::ExceptionMask => 'e',
            ChannelMode::InviteMask => 'I',
            ChannelMode::InviteOnly => 'i',
            ChannelMode::Key => 'k',
            ChannelMode::Moderated => 'm',
            ChannelMode::NoOutside => 'n',
            ChannelMode::OpOnlyTopic => 't',
            ChannelMode::Persistent => 'P',
            ChannelMode::Private => 'p',
            ChannelMode::Quiet => 'q',
            ChannelMode::ReOp => 'r',
            ChannelMode::Secret => 's',
            ChannelMode::UserLimit => 'l',
            ChannelMode::Voice => 'v',
        }
    }

    fn kind(self) -> ModeKind {
        match self {
            ChannelMode::BanMask | ChannelMode::ExceptionMask | ChannelMode::InviteMask => {
                ModeKind::List
            }
            ChannelMode::ChannelOperator | ChannelMode::Voice => ModeKind::Membership,
            ChannelMode::Key | ChannelMode::UserLimit => ModeKind::Parameter,
            _ => ModeKind::Flag,
        }
    }
}

impl fmt::Display for UserMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Arity of `letter` for the given target kind.
pub fn arity(letter: char, target: TargetKind) -> Result<Arity, ModeError> {
    let found = match target {
        TargetKind::User => UserMode::from_char(letter).map(ModeType::arity),
        TargetKind::Channel => ChannelMode::from_char(letter).map(ModeType::arity),
    };
    found.ok_or(ModeError::UnknownMode(letter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_round_trip() {
        for mode in UserMode::ALL {
            assert_eq!(UserMode::from_char(mode.as_char()), Some(*mode));
        }
        for mode in ChannelMode::ALL {
            assert_eq!(ChannelMode::from_char(mode.as_char()), Some(*mode));
        }
        assert_eq!(ChannelMode::ALL.len(), 18);
    }

    #[test]
    fn test_arity_table() {
        assert_eq!(arity('i', TargetKind::User), Ok(Arity::None));
        assert_eq!(arity('o', TargetKind::User), Ok(Arity::None));
        assert_eq!(arity('o', TargetKind::Channel), Ok(Arity::Required));
        assert_eq!(arity('b', TargetKind::Channel), Ok(Arity::Required));
        assert_eq!(arity('k', TargetKind::Channel), Ok(Arity::RequiredOnAdd));
        assert_eq!(arity('l', TargetKind::Channel), Ok(Arity::RequiredOnAdd));
        assert_eq!(arity('O', TargetKind::Channel), Ok(Arity::None));
        assert_eq!(arity('s', TargetKind::Channel), Ok(Arity::None));
    }

    #[test]
    fn test_unknown_letters() {
        assert_eq!(arity('z', TargetKind::Channel), Err(ModeError::UnknownMode('z')));
        assert_eq!(arity('k', TargetKind::User), Err(ModeError::UnknownMode('k')));
    }

    #[test]
    fn test_consumes_arg() {
        assert!(ChannelMode::Key.consumes_arg(ModeOp::Add));
        assert!(!ChannelMode::Key.consumes_arg(ModeOp::Remove));
        assert!(ChannelMode::Voice.consumes_arg(ModeOp::Remove));
        assert!(!ChannelMode::BanMask.consumes_arg(ModeOp::List));
        assert!(!ChannelMode::Moderated.consumes_arg(ModeOp::Add));
    }
}
