//! Channel state owned by a channel actor.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use nomad_proto::{ChannelMode, Message, ModeType, irc_eq, mask_match};
use tokio::sync::mpsc;

use super::ClientId;

/// Membership modes (+o, +v) of one channel member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberModes {
    pub op: bool,
    pub voice: bool,
}

impl MemberModes {
    /// NAMES prefix: the highest status only, or every status with
    /// `multi-prefix`.
    pub fn prefixes(&self, multi_prefix: bool) -> String {
        let mut s = String::new();
        if self.op {
            s.push('@');
        }
        if self.voice && (multi_prefix || !self.op) {
            s.push('+');
        }
        s
    }
}

/// A channel member as the actor sees it.
#[derive(Debug, Clone)]
pub struct Member {
    pub nick: String,
    pub modes: MemberModes,
    pub sender: mpsc::Sender<Message>,
}

/// One entry of a ban, exception or invite list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub mask: String,
    pub set_by: String,
    pub set_at: i64,
}

/// Complete channel state.
#[derive(Debug, Clone)]
pub struct ChannelState {
    pub name: String,
    pub created: DateTime<Utc>,
    /// Flag modes without arguments.
    pub flags: BTreeSet<ChannelMode>,
    pub key: Option<String>,
    pub limit: Option<usize>,
    pub bans: Vec<ListEntry>,
    pub excepts: Vec<ListEntry>,
    pub invex: Vec<ListEntry>,
    pub members: HashMap<ClientId, Member>,
}

impl ChannelState {
    /// A fresh channel with the usual `+nt` defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created: Utc::now(),
            flags: [ChannelMode::NoOutside, ChannelMode::OpOnlyTopic]
                .into_iter()
                .collect(),
            key: None,
            limit: None,
            bans: Vec::new(),
            excepts: Vec::new(),
            invex: Vec::new(),
            members: HashMap::new(),
        }
    }

    /// RPL_CHANNELMODEIS parameters: the mode token, then the key and limit.
    pub fn mode_params(&self) -> Vec<String> {
        let mut letters = String::from("+");
        let mut args = Vec::new();
        letters.extend(self.flags.iter().map(|m| m.as_char()));
        if let Some(ref key) = self.key {
            letters.push(ChannelMode::Key.as_char());
            args.push(key.clone());
        }
        if let Some(limit) = self.limit {
            letters.push(ChannelMode::UserLimit.as_char());
            args.push(limit.to_string());
        }
        let mut out = vec![letters];
        out.extend(args);
        out
    }

    pub fn list(&self, mode: ChannelMode) -> Option<&Vec<ListEntry>> {
        match mode {
            ChannelMode::BanMask => Some(&self.bans),
            ChannelMode::ExceptionMask => Some(&self.excepts),
            ChannelMode::InviteMask => Some(&self.invex),
            _ => None,
        }
    }

    pub fn list_mut(&mut self, mode: ChannelMode) -> Option<&mut Vec<ListEntry>> {
        match mode {
            ChannelMode::BanMask => Some(&mut self.bans),
            ChannelMode::ExceptionMask => Some(&mut self.excepts),
            ChannelMode::InviteMask => Some(&mut self.invex),
            _ => None,
        }
    }

    pub fn member_by_nick(&self, nick: &str) -> Option<ClientId> {
        self.members
            .iter()
            .find(|(_, m)| irc_eq(&m.nick, nick))
            .map(|(id, _)| *id)
    }

    pub fn is_op(&self, id: ClientId) -> bool {
        self.members.get(&id).is_some_and(|m| m.modes.op)
    }

    /// Banned unless an exception also matches.
    pub fn is_banned(&self, hostmask: &str) -> bool {
        let matches = |list: &[ListEntry]| list.iter().any(|e| mask_match(&e.mask, hostmask));
        matches(&self.bans) && !matches(&self.excepts)
    }

    pub fn is_invex(&self, hostmask: &str) -> bool {
        self.invex.iter().any(|e| mask_match(&e.mask, hostmask))
    }

    /// NAMES entries, sorted by nickname, prefixed for the viewer.
    pub fn names(&self, multi_prefix: bool) -> Vec<String> {
        let mut names: Vec<String> = self
            .members
            .values()
            .map(|m| format!("{}{}", m.modes.prefixes(multi_prefix), m.nick))
            .collect();
        names.sort_by(|a, b| {
            a.trim_start_matches(['@', '+'])
                .cmp(b.trim_start_matches(['@', '+']))
        });
        names
    }

    /// `=` public, `*` private, `@` secret.
    pub fn names_symbol(&self) -> &'static str {
        if self.flags.contains(&ChannelMode::Secret) {
            "@"
        } else if self.flags.contains(&ChannelMode::Private) {
            "*"
        } else {
            "="
        }
    }
}
