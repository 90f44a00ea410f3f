//! Channel mode rules.
//!
//! Changes need channel operator status; `+P` additionally needs a server
//! operator. Membership modes name a current member, list modes carry a
//! mask, `+k`/`+l` carry their value and `-k`/`-l` clear it. Masks, keys
//! and nicknames are echoed as middle parameters, so any that is empty,
//! starts with `:` or contains a space is refused.

use chrono::Utc;
use nomad_proto::{ChannelMode, ModeChange, ModeKind, ModeOp, ModeType, is_middle_safe};

use super::engine::{ModeRejection, ModeTarget, Mutation};
use crate::state::{ChannelState, ClientId, ListEntry};

/// Who is changing a channel's modes.
#[derive(Debug, Clone)]
pub struct ChannelRequester {
    pub id: ClientId,
    /// `nick!user@host`, recorded as the setter of list entries.
    pub mask: String,
    pub is_oper: bool,
}

impl ModeTarget for ChannelState {
    type Mode = ChannelMode;
    type Requester = ChannelRequester;

    fn authorize(
        &self,
        requester: &ChannelRequester,
        change: &ModeChange<ChannelMode>,
    ) -> Result<(), ModeRejection> {
        if !self.is_op(requester.id) {
            return Err(ModeRejection::ChanOpPrivsNeeded);
        }
        if change.mode == ChannelMode::Persistent && !requester.is_oper {
            return Err(ModeRejection::NoPrivileges);
        }
        Ok(())
    }

    fn mutate(&mut self, change: &mut ModeChange<ChannelMode>) -> Mutation {
        let adding = match change.op {
            ModeOp::Add => true,
            ModeOp::Remove => false,
            ModeOp::List => return Mutation::Ignored,
        };

        match change.mode.kind() {
            ModeKind::Membership => {
                let nick = change.arg.as_deref().unwrap_or_default();
                if !is_middle_safe(nick) {
                    return Mutation::Rejected(ModeRejection::InvalidParam(change.mode.as_char()));
                }
                let Some(id) = self.member_by_nick(nick) else {
                    return Mutation::Rejected(ModeRejection::UserNotInChannel(nick.to_owned()));
                };
                let Some(member) = self.members.get_mut(&id) else {
                    return Mutation::Ignored;
                };
                match change.mode {
                    ChannelMode::ChannelOperator => member.modes.op = adding,
                    _ => member.modes.voice = adding,
                }
                change.arg = Some(member.nick.clone());
                Mutation::Applied
            }
            ModeKind::List => self.mutate_list(change, adding),
            ModeKind::Parameter => self.mutate_parameter(change, adding),
            ModeKind::Flag => {
                if adding {
                    self.flags.insert(change.mode);
                } else {
                    self.flags.remove(&change.mode);
                }
                Mutation::Applied
            }
        }
    }
}

impl ChannelState {
    fn mutate_list(&mut self, change: &ModeChange<ChannelMode>, adding: bool) -> Mutation {
        let Some(mask) = change.arg.as_deref() else {
            return Mutation::Ignored;
        };
        if !is_middle_safe(mask) {
            return Mutation::Rejected(ModeRejection::InvalidParam(change.mode.as_char()));
        }
        let Some(list) = self.list_mut(change.mode) else {
            return Mutation::Ignored;
        };
        let existing = list.iter().position(|e| e.mask == mask);

        match (adding, existing) {
            (true, None) => {
                list.push(ListEntry {
                    mask: mask.to_owned(),
                    set_by: String::new(),
                    set_at: Utc::now().timestamp(),
                });
                Mutation::Applied
            }
            (false, Some(idx)) => {
                list.remove(idx);
                Mutation::Applied
            }
            _ => Mutation::Ignored,
        }
    }

    fn mutate_parameter(&mut self, change: &ModeChange<ChannelMode>, adding: bool) -> Mutation {
        match (change.mode, adding) {
            (ChannelMode::Key, true) => match change.arg.as_deref() {
                Some(key) if is_middle_safe(key) => {
                    self.key = Some(key.to_owned());
                    Mutation::Applied
                }
                Some(_) => Mutation::Rejected(ModeRejection::InvalidKey),
                None => Mutation::Ignored,
            },
            (ChannelMode::Key, false) => {
                self.key = None;
                Mutation::Applied
            }
            (ChannelMode::UserLimit, true) => {
                match change.arg.as_deref().and_then(|a| a.parse::<usize>().ok()) {
                    Some(limit) if limit > 0 => {
                        self.limit = Some(limit);
                        Mutation::Applied
                    }
                    _ => Mutation::Ignored,
                }
            }
            (ChannelMode::UserLimit, false) => {
                self.limit = None;
                Mutation::Applied
            }
            _ => Mutation::Ignored,
        }
    }

    /// Stamp freshly added list entries with their setter.
    pub(crate) fn stamp_setter(&mut self, applied: &[ModeChange<ChannelMode>], setter: &str) {
        for change in applied.iter().filter(|c| c.op == ModeOp::Add) {
            let Some(mask) = change.arg.as_deref() else {
                continue;
            };
            if let Some(entry) = self
                .list_mut(change.mode)
                .and_then(|list| list.iter_mut().find(|e| e.mask == mask))
            {
                entry.set_by = setter.to_owned();
            }
        }
    }
}
