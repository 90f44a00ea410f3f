//! Channel name validation.
//!
//! A channel name is 2 to 64 characters: one of `&!#+` followed by letters
//! and digits.

use regex::Regex;
use std::sync::OnceLock;

/// Characters that open a channel name.
pub const CHANNEL_PREFIXES: [char; 4] = ['&', '!', '#', '+'];

fn channel_expr() -> &'static Regex {
    static EXPR: OnceLock<Regex> = OnceLock::new();
    EXPR.get_or_init(|| Regex::new(r"^[&!#+][\pL\pN]{1,63}$").expect("channel pattern compiles"))
}

/// Extension trait for channel names.
pub trait ChannelExt {
    /// True when the string starts with a channel prefix character.
    ///
    /// Used to route `MODE <target>` to the channel or user path before
    /// the name is validated.
    fn is_channel_target(&self) -> bool;

    /// True when the whole string matches the channel name pattern.
    fn is_channel_name(&self) -> bool;
}

impl ChannelExt for str {
    fn is_channel_target(&self) -> bool {
        self.starts_with(CHANNEL_PREFIXES)
    }

    fn is_channel_name(&self) -> bool {
        channel_expr().is_match(self)
    }
}

impl ChannelExt for String {
    fn is_channel_target(&self) -> bool {
        self.as_str().is_channel_target()
    }

    fn is_channel_name(&self) -> bool {
        self.as_str().is_channel_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!("#nomad".is_channel_name());
        assert!("&local".is_channel_name());
        assert!("!safe1".is_channel_name());
        assert!("+modeless".is_channel_name());
        assert!(format!("#{}", "a".repeat(63)).is_channel_name());
    }

    #[test]
    fn test_invalid_names() {
        assert!(!"#".is_channel_name());
        assert!(!"nomad".is_channel_name());
        assert!(!"#with space".is_channel_name());
        assert!(!"#dash-ed".is_channel_name());
        assert!(!format!("#{}", "a".repeat(64)).is_channel_name());
    }

    #[test]
    fn test_target_detection() {
        assert!("#x y".is_channel_target());
        assert!(!"dan".is_channel_target());
    }
}
