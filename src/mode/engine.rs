//! Generic mode application.
//!
//! [`apply`] walks parsed changes left to right. For each one it resolves
//! unknown letters, short-circuits queries to the read path, asks the target
//! whether the requester may make the change, checks that an argument is
//! present when the letter's arity demands one, and only then mutates. A
//! rejected change is recorded and skipped; the rest still apply.

use nomad_proto::{Message, ModeChange, ModeError, ModeOp, ModeType, Response, TargetKind};

/// Why a single change was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModeRejection {
    UnknownMode(char),
    NeedMoreParams,
    ChanOpPrivsNeeded,
    NoPrivileges,
    UserNotInChannel(String),
    /// `+k` value that could not be stored or echoed.
    InvalidKey,
    /// Mask or nickname argument for this letter that could not be echoed.
    InvalidParam(char),
}

impl ModeRejection {
    /// Numeric reply for the requester. `target` is the channel or nickname
    /// the MODE named.
    pub fn to_irc_reply(&self, kind: TargetKind, nick: &str, target: &str) -> Message {
        match (self, kind) {
            (Self::UnknownMode(_), TargetKind::User) => Response::err_umodeunknownflag(nick),
            (Self::UnknownMode(c), TargetKind::Channel) => {
                Response::err_unknownmode(nick, *c, target)
            }
            (Self::NeedMoreParams, _) => Response::err_needmoreparams(nick, "MODE"),
            (Self::ChanOpPrivsNeeded, _) => Response::err_chanoprivsneeded(nick, target),
            (Self::NoPrivileges, _) => Response::err_noprivileges(nick),
            (Self::UserNotInChannel(who), _) => Response::err_usernotinchannel(nick, who, target),
            (Self::InvalidKey, _) => Response::err_invalidkey(nick, target),
            // The offending value is the one thing the reply cannot carry.
            (Self::InvalidParam(c), _) => {
                Response::err_invalidmodeparam(nick, target, *c, "*", "Invalid mode parameter")
            }
        }
    }
}

/// Result of [`ModeTarget::mutate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// The change took effect, or was already in effect.
    Applied,
    /// Silently dropped (not echoed, no error).
    Ignored,
    Rejected(ModeRejection),
}

/// Something modes can be applied to.
pub trait ModeTarget {
    type Mode: ModeType;
    type Requester;

    /// Whether `requester` may make `change`.
    fn authorize(
        &self,
        requester: &Self::Requester,
        change: &ModeChange<Self::Mode>,
    ) -> Result<(), ModeRejection>;

    /// Perform an authorized add or remove. May normalise `change.arg`
    /// (the canonical nickname, say) before it is echoed.
    fn mutate(&mut self, change: &mut ModeChange<Self::Mode>) -> Mutation;
}

/// What [`apply`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeOutcome<M> {
    /// Changes in effect, in application order.
    pub applied: Vec<ModeChange<M>>,
    /// Letters whose current value or list was asked for.
    pub queries: Vec<M>,
    /// One entry per skipped change, in order.
    pub errors: Vec<ModeRejection>,
}

impl<M> Default for ModeOutcome<M> {
    fn default() -> Self {
        Self {
            applied: Vec::new(),
            queries: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl<M: ModeType> ModeOutcome<M> {
    /// MODE parameters confirming the applied changes; empty when none.
    pub fn confirmation(&self) -> Vec<String> {
        ModeChange::render(&self.applied)
    }

    /// Errors with repeats removed, first occurrence kept.
    pub fn distinct_errors(&self) -> Vec<&ModeRejection> {
        let mut seen = Vec::new();
        for err in &self.errors {
            if !seen.contains(&err) {
                seen.push(err);
            }
        }
        seen
    }
}

/// Apply parsed changes to `target` on behalf of `requester`.
pub fn apply<T: ModeTarget>(
    target: &mut T,
    requester: &T::Requester,
    changes: Vec<Result<ModeChange<T::Mode>, ModeError>>,
) -> ModeOutcome<T::Mode> {
    let mut outcome = ModeOutcome::default();

    for change in changes {
        let mut change = match change {
            Ok(change) => change,
            Err(ModeError::UnknownMode(c)) => {
                outcome.errors.push(ModeRejection::UnknownMode(c));
                continue;
            }
        };

        if change.op == ModeOp::List {
            if !outcome.queries.contains(&change.mode) {
                outcome.queries.push(change.mode);
            }
            continue;
        }

        if let Err(rejection) = target.authorize(requester, &change) {
            outcome.errors.push(rejection);
            continue;
        }

        if change.mode.consumes_arg(change.op) && change.arg.is_none() {
            outcome.errors.push(ModeRejection::NeedMoreParams);
            continue;
        }

        match target.mutate(&mut change) {
            Mutation::Applied => outcome.applied.push(change),
            Mutation::Ignored => {}
            Mutation::Rejected(rejection) => outcome.errors.push(rejection),
        }
    }

    outcome
}
