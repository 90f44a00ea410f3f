//! Nickname validation.
//!
//! A nickname is 2 to 32 characters. The first character is a letter or one
//! of ``[]{}^` ``; the rest may also contain digits. Letters and digits are
//! Unicode-aware, so `Zoë` is as valid as `zoe`.

use regex::Regex;
use std::sync::OnceLock;

/// Shortest accepted nickname, in characters.
pub const NICK_MIN_LEN: usize = 2;
/// Longest accepted nickname, in characters.
pub const NICK_MAX_LEN: usize = 32;

fn nickname_expr() -> &'static Regex {
    static EXPR: OnceLock<Regex> = OnceLock::new();
    EXPR.get_or_init(|| {
        Regex::new(r"^[\pL\[\]{}^`][\pL\pN\[\]{}^`]{1,31}$").expect("nickname pattern compiles")
    })
}

/// Extension trait for checking if a string is a valid nickname.
pub trait NickExt {
    /// Check if this string matches the nickname pattern.
    ///
    /// ```
    /// use nomad_proto::NickExt;
    ///
    /// assert!("dan".is_valid_nick());
    /// assert!("[cool]".is_valid_nick());
    /// assert!(!"x".is_valid_nick());       // too short
    /// assert!(!"9lives".is_valid_nick());  // leading digit
    /// assert!(!"a b".is_valid_nick());
    /// ```
    fn is_valid_nick(&self) -> bool;
}

impl NickExt for str {
    fn is_valid_nick(&self) -> bool {
        nickname_expr().is_match(self)
    }
}

impl NickExt for String {
    fn is_valid_nick(&self) -> bool {
        self.as_str().is_valid_nick()
    }
}
