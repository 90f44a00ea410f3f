//! Mode string parsing and compact rendering.

use std::fmt;

use crate::error::ModeError;

use super::types::{ChannelMode, ModeKind, ModeOp, ModeType, UserMode};

/// One requested or applied mode change.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModeChange<M> {
    /// Set, clear or query.
    pub op: ModeOp,
    /// The letter.
    pub mode: M,
    /// Argument consumed from the command, if any.
    pub arg: Option<String>,
}

impl<M: ModeType> ModeChange<M> {
    /// `+mode` without argument.
    pub fn add(mode: M) -> Self {
        ModeChange {
            op: ModeOp::Add,
            mode,
            arg: None,
        }
    }

    /// `-mode` without argument.
    pub fn remove(mode: M) -> Self {
        ModeChange {
            op: ModeOp::Remove,
            mode,
            arg: None,
        }
    }

    /// Attach an argument.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = Some(arg.into());
        self
    }

    /// Parse MODE pieces: the mode string first, then argument tokens.
    ///
    /// Letters before any `+`/`-` are queries. Arguments are handed out left
    /// to right only to letters whose arity asks for one under the current
    /// operator; a letter that finds none left gets `arg: None` and the
    /// tokens stay where they are. List-mode letters without an argument
    /// become queries. Unknown letters consume nothing and yield
    /// [`ModeError::UnknownMode`] in their position. Surplus arguments are
    /// ignored.
    pub fn parse(pieces: &[&str]) -> Vec<Result<ModeChange<M>, ModeError>> {
        let mut out = Vec::new();
        let Some((modestring, rest)) = pieces.split_first() else {
            return out;
        };

        let mut args = rest.iter();
        let mut op = ModeOp::List;

        for c in modestring.chars() {
            if let Some(next) = ModeOp::from_char(c) {
                op = next;
                continue;
            }
            let Some(mode) = M::from_char(c) else {
                out.push(Err(ModeError::UnknownMode(c)));
                continue;
            };

            let arg = if mode.consumes_arg(op) {
                args.next().map(|a| (*a).to_owned())
            } else {
                None
            };
            // A list letter with no mask is a listing, not a missing argument.
            let op = if mode.kind() == ModeKind::List && arg.is_none() {
                ModeOp::List
            } else {
                op
            };
            out.push(Ok(ModeChange { op, mode, arg }));
        }

        out
    }

    /// Render add/remove changes as MODE parameters: one compact `+xy-z`
    /// token followed by the arguments in order. Queries are skipped.
    /// Returns an empty vector when nothing remains.
    pub fn render(changes: &[ModeChange<M>]) -> Vec<String> {
        let mut modestring = String::new();
        let mut args = Vec::new();
        let mut current = None;

        for change in changes.iter().filter(|c| c.op != ModeOp::List) {
            if current != Some(change.op) {
                modestring.push(change.op.as_char());
                current = Some(change.op);
            }
            modestring.push(change.mode.as_char());
            if let Some(ref arg) = change.arg {
                args.push(arg.clone());
            }
        }

        if modestring.is_empty() {
            return args;
        }
        let mut out = Vec::with_capacity(args.len() + 1);
        out.push(modestring);
        out.extend(args);
        out
    }
}

impl ModeChange<UserMode> {
    /// Parse user mode pieces like `["+iw"]`.
    pub fn user_modes(pieces: &[&str]) -> Vec<Result<Self, ModeError>> {
        Self::parse(pieces)
    }
}

impl ModeChange<ChannelMode> {
    /// Parse channel mode pieces like `["+ok", "dan", "secret"]`.
    pub fn channel_modes(pieces: &[&str]) -> Vec<Result<Self, ModeError>> {
        Self::parse(pieces)
    }
}

impl<M: ModeType> fmt::Display for ModeChange<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op.as_char(), self.mode)?;
        if let Some(ref arg) = self.arg {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok<M: ModeType>(parsed: Vec<Result<ModeChange<M>, ModeError>>) -> Vec<ModeChange<M>> {
        parsed.into_iter().map(Result::unwrap).collect()
    }

    #[test]
    fn test_user_flags() {
        let modes = ok(ModeChange::user_modes(&["+iw-s"]));
        assert_eq!(
            modes,
            vec![
                ModeChange::add(UserMode::Invisible),
                ModeChange::add(UserMode::WallOps),
                ModeChange::remove(UserMode::ServerNotice),
            ]
        );
    }

    #[test]
    fn test_args_follow_letters_in_order() {
        let modes = ok(ModeChange::channel_modes(&["+ok-v", "dan", "secret", "eve"]));
        assert_eq!(modes[0], ModeChange::add(ChannelMode::ChannelOperator).with_arg("dan"));
        assert_eq!(modes[1], ModeChange::add(ChannelMode::Key).with_arg("secret"));
        assert_eq!(modes[2], ModeChange::remove(ChannelMode::Voice).with_arg("eve"));
    }

    #[test]
    fn test_key_without_arg_is_left_empty() {
        let modes = ok(ModeChange::channel_modes(&["+k"]));
        assert_eq!(modes, vec![ModeChange::add(ChannelMode::Key)]);
    }

    #[test]
    fn test_missing_arg_does_not_steal_from_later_change() {
        // -k takes nothing, +l takes the only token
        let modes = ok(ModeChange::channel_modes(&["-k+l", "10"]));
        assert_eq!(modes[0], ModeChange::remove(ChannelMode::Key));
        assert_eq!(modes[1], ModeChange::add(ChannelMode::UserLimit).with_arg("10"));
    }

    #[test]
    fn test_list_modes_without_arg_become_queries() {
        let modes = ok(ModeChange::channel_modes(&["+ib"]));
        assert_eq!(modes[0], ModeChange::add(ChannelMode::InviteOnly));
        assert_eq!(modes[1].op, ModeOp::List);
        assert_eq!(modes[1].mode, ChannelMode::BanMask);

        let modes = ok(ModeChange::channel_modes(&["=e", "ignored"]));
        assert_eq!(modes[0].op, ModeOp::List);
        assert_eq!(modes[0].arg, None);
    }

    #[test]
    fn test_list_removal_without_mask_is_a_query() {
        let modes = ok(ModeChange::channel_modes(&["-b+k", "pw"]));
        assert_eq!(modes[0].op, ModeOp::List);
        assert_eq!(modes[0].arg, None);
        assert_eq!(modes[1], ModeChange::add(ChannelMode::Key).with_arg("pw"));
    }

    #[test]
    fn test_no_sign_is_query() {
        let modes = ok(ModeChange::channel_modes(&["b"]));
        assert_eq!(modes[0].op, ModeOp::List);
    }

    #[test]
    fn test_unknown_letter_keeps_position() {
        let parsed = ModeChange::<ChannelMode>::channel_modes(&["+zk", "key"]);
        assert_eq!(parsed[0], Err(ModeError::UnknownMode('z')));
        assert_eq!(
            parsed[1],
            Ok(ModeChange::add(ChannelMode::Key).with_arg("key"))
        );
    }

    #[test]
    fn test_render_compact() {
        let changes = vec![
            ModeChange::add(ChannelMode::InviteOnly),
            ModeChange::add(ChannelMode::Key).with_arg("secret"),
            ModeChange::remove(ChannelMode::UserLimit),
            ModeChange::remove(ChannelMode::Voice).with_arg("eve"),
            ModeChange::add(ChannelMode::Moderated),
        ];
        assert_eq!(
            ModeChange::render(&changes),
            vec!["+ik-lv+m", "secret", "eve"]
        );
        assert!(ModeChange::<UserMode>::render(&[]).is_empty());
    }
}
