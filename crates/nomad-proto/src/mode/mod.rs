//! IRC user and channel mode table.

mod parse;
mod types;

pub use self::parse::ModeChange;
pub use self::types::{arity, Arity, ChannelMode, ModeKind, ModeOp, ModeType, TargetKind, UserMode};
