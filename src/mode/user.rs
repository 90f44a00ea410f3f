//! User mode rules.

use nomad_proto::{ModeChange, ModeOp, UserMode};

use super::engine::{ModeRejection, ModeTarget, Mutation};
use crate::state::UserRecord;

/// Who is changing a user's modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserRequester {
    /// The requester is the target.
    pub is_self: bool,
    /// The requester holds +o or +O.
    pub is_oper: bool,
}

impl ModeTarget for UserRecord {
    type Mode = UserMode;
    type Requester = UserRequester;

    fn authorize(
        &self,
        requester: &UserRequester,
        change: &ModeChange<UserMode>,
    ) -> Result<(), ModeRejection> {
        if !requester.is_self && !requester.is_oper {
            return Err(ModeRejection::NoPrivileges);
        }
        match (change.op, change.mode) {
            // Operator status comes from OPER; only opers may hand it out.
            (ModeOp::Add, UserMode::Operator | UserMode::LocalOperator)
            | (ModeOp::Remove, UserMode::Restricted)
                if !requester.is_oper =>
            {
                Err(ModeRejection::NoPrivileges)
            }
            _ => Ok(()),
        }
    }

    fn mutate(&mut self, change: &mut ModeChange<UserMode>) -> Mutation {
        // +a/-a follows AWAY.
        if change.mode == UserMode::Away {
            return Mutation::Ignored;
        }
        match change.op {
            ModeOp::Add => {
                self.modes.insert(change.mode);
            }
            ModeOp::Remove => {
                self.modes.remove(&change.mode);
            }
            ModeOp::List => return Mutation::Ignored,
        }
        Mutation::Applied
    }
}
