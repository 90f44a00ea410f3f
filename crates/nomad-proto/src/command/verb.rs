//! Named IRC verbs.

use std::fmt;
use std::str::FromStr;

macro_rules! verbs {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        /// The textual commands this server understands.
        ///
        /// The set is closed: a verb outside it parses as [`Command::Raw`]
        /// and is answered with `ERR_UNKNOWNCOMMAND` by the server.
        ///
        /// [`Command::Raw`]: super::Command::Raw
        #[allow(clippy::upper_case_acronyms, missing_docs)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum Verb {
            $($(#[$meta])* $name,)+
        }

        impl Verb {
            /// Every verb, in declaration order.
            pub const ALL: &'static [Verb] = &[$(Verb::$name),+];

            /// Wire spelling of the verb.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Verb::$name => stringify!($name),)+
                }
            }
        }

        impl FromStr for Verb {
            type Err = ();

            /// Case-insensitive lookup.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case(stringify!($name)) {
                        return Ok(Verb::$name);
                    }
                )+
                Err(())
            }
        }
    };
}

verbs! {
    /// Set or clear an away message
    AWAY,
    /// Capability negotiation
    CAP,
    /// Operator debugging
    DEBUG,
    /// Fatal error notice, server to client
    ERROR,
    INVITE,
    ISON,
    JOIN,
    KICK,
    KILL,
    LIST,
    MODE,
    MOTD,
    NAMES,
    NICK,
    NOTICE,
    OPER,
    PART,
    PASS,
    PING,
    PONG,
    PRIVMSG,
    /// HAProxy PROXY preamble
    PROXY,
    QUIT,
    TIME,
    TOPIC,
    USER,
    VERSION,
    WHO,
    WHOIS,
}

impl Verb {
    /// Whether the verb may be used before registration completes.
    pub fn allowed_before_registration(&self) -> bool {
        matches!(
            self,
            Verb::PASS | Verb::NICK | Verb::USER | Verb::CAP | Verb::PING | Verb::PONG | Verb::QUIT
        )
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
