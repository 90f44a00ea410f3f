//! Code conversion and classification for [`Response`].

use std::fmt;

use super::Response;

/// Fixed category of a numeric reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResponseCategory {
    /// Registration, command and query replies.
    Informational,
    /// `RPL_TRACE*` replies.
    Trace,
    /// `ERR_*` replies (400-599, and 696).
    Error,
}

impl Response {
    /// Returns the numeric code as u16
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Look up a numeric by code.
    pub fn from_code(code: u16) -> Option<Response> {
        Response::ALL
            .binary_search_by_key(&code, Response::code)
            .ok()
            .map(|idx| Response::ALL[idx])
    }

    /// The category this numeric belongs to.
    pub fn category(&self) -> ResponseCategory {
        match self.code() {
            400..=599 | 696 => ResponseCategory::Error,
            200..=210 | 261 | 262 => ResponseCategory::Trace,
            _ => ResponseCategory::Informational,
        }
    }

    /// Check if this is an error response
    #[inline]
    pub fn is_error(&self) -> bool {
        self.category() == ResponseCategory::Error
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_and_unique() {
        assert!(Response::ALL.windows(2).all(|w| w[0].code() < w[1].code()));
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Response::from_code(1), Some(Response::RPL_WELCOME));
        assert_eq!(Response::from_code(433), Some(Response::ERR_NICKNAMEINUSE));
        assert_eq!(Response::from_code(461), Some(Response::ERR_NEEDMOREPARAMS));
        assert_eq!(Response::from_code(410), Some(Response::ERR_INVALIDCAPCMD));
        assert_eq!(Response::from_code(696), Some(Response::ERR_INVALIDMODEPARAM));
        assert_eq!(Response::from_code(999), None);
    }

    #[test]
    fn test_categories() {
        assert_eq!(Response::RPL_WELCOME.category(), ResponseCategory::Informational);
        assert_eq!(Response::RPL_TRACEUSER.category(), ResponseCategory::Trace);
        assert_eq!(Response::RPL_TRACEEND.category(), ResponseCategory::Trace);
        assert_eq!(Response::RPL_UMODEIS.category(), ResponseCategory::Informational);
        assert!(Response::ERR_USERSDONTMATCH.is_error());
        assert!(Response::ERR_INVALIDMODEPARAM.is_error());
        assert!(!Response::RPL_ENDOFMOTD.is_error());
    }

    #[test]
    fn test_display_padding() {
        assert_eq!(Response::RPL_MYINFO.to_string(), "004");
        assert_eq!(Response::RPL_LUSERME.to_string(), "255");
    }
}
