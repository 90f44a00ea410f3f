//! Capability names, REQ token modifiers and capability sets.

mod registry;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub use self::registry::CapRegistry;

/// Known capability names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Capability {
    /// Show every membership prefix in NAMES (`@+dan`).
    MultiPrefix,
    /// SASL authentication. Recognized but not offered by this server.
    Sasl,
}

impl Capability {
    /// Every known capability.
    pub const ALL: &'static [Capability] = &[Capability::MultiPrefix, Capability::Sasl];

    /// Wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Capability::MultiPrefix => "multi-prefix",
            Capability::Sasl => "sasl",
        }
    }

    /// Whether the server has an implementation behind this name.
    pub const fn is_implemented(self) -> bool {
        matches!(self, Capability::MultiPrefix)
    }
}

impl FromStr for Capability {
    type Err = ();

    /// Names are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .iter()
            .copied()
            .find(|cap| cap.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Modifier prefixed to a capability name in a CAP token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapModifier {
    /// '-' - disable the capability
    Disable,
    /// '~' - client must ACK before the capability takes effect
    Ack,
    /// '=' - sticky, cannot be disabled later in the session
    Sticky,
}

impl CapModifier {
    /// Wire character.
    pub const fn as_char(self) -> char {
        match self {
            CapModifier::Disable => '-',
            CapModifier::Ack => '~',
            CapModifier::Sticky => '=',
        }
    }

    /// Parse a modifier character.
    pub const fn from_char(c: char) -> Option<CapModifier> {
        match c {
            '-' => Some(CapModifier::Disable),
            '~' => Some(CapModifier::Ack),
            '=' => Some(CapModifier::Sticky),
            _ => None,
        }
    }
}

/// A capability name with its optional modifier, as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CapToken {
    /// Leading modifier, if any.
    pub modifier: Option<CapModifier>,
    /// Capability name without the modifier.
    pub name: String,
}

impl CapToken {
    /// Bare token without modifier.
    pub fn plain(name: impl Into<String>) -> Self {
        CapToken {
            modifier: None,
            name: name.into(),
        }
    }

    /// Split a single token. Returns `None` if no name remains.
    pub fn parse(token: &str) -> Option<CapToken> {
        let mut chars = token.chars();
        let (modifier, name) = match chars.next().and_then(CapModifier::from_char) {
            Some(m) => (Some(m), chars.as_str()),
            None => (None, token),
        };
        if name.is_empty() {
            return None;
        }
        Some(CapToken {
            modifier,
            name: name.to_owned(),
        })
    }

    /// Split a space-separated capability list, dropping empty tokens.
    pub fn parse_list(list: &str) -> Vec<CapToken> {
        list.split_whitespace().filter_map(CapToken::parse).collect()
    }

    /// Whether the token asks for the capability to be disabled.
    pub fn is_disable(&self) -> bool {
        self.modifier == Some(CapModifier::Disable)
    }
}

impl fmt::Display for CapToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(m) = self.modifier {
            write!(f, "{}", m.as_char())?;
        }
        f.write_str(&self.name)
    }
}

/// Mapping from capability name to enabled flag.
///
/// Keys are case-sensitive. Iteration is in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    caps: BTreeMap<String, bool>,
}

impl CapabilitySet {
    /// Empty set.
    pub fn new() -> Self {
        CapabilitySet::default()
    }

    /// Set the flag for `name`.
    pub fn set(&mut self, name: impl Into<String>, enabled: bool) {
        self.caps.insert(name.into(), enabled);
    }

    /// Drop `name` entirely. Returns whether it was enabled.
    pub fn remove(&mut self, name: &str) -> bool {
        self.caps.remove(name).unwrap_or(false)
    }

    /// Whether `name` is present and enabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.caps.get(name).copied().unwrap_or(false)
    }

    /// Whether `name` is present at all.
    pub fn contains(&self, name: &str) -> bool {
        self.caps.contains_key(name)
    }

    /// Enabled names in order.
    pub fn enabled(&self) -> impl Iterator<Item = &str> {
        self.caps
            .iter()
            .filter(|(_, on)| **on)
            .map(|(name, _)| name.as_str())
    }

    /// All names with their flags.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.caps.iter().map(|(name, on)| (name.as_str(), *on))
    }

    /// Enabled names joined with spaces.
    pub fn to_list(&self) -> String {
        self.enabled().collect::<Vec<_>>().join(" ")
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.caps.len()
    }

    /// True when no entries exist.
    pub fn is_empty(&self) -> bool {
        self.caps.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CapabilitySet {
    /// Every collected name is enabled.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        CapabilitySet {
            caps: iter.into_iter().map(|name| (name.into(), true)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_names_are_case_sensitive() {
        assert_eq!("multi-prefix".parse(), Ok(Capability::MultiPrefix));
        assert_eq!("sasl".parse(), Ok(Capability::Sasl));
        assert_eq!("Multi-Prefix".parse::<Capability>(), Err(()));
    }

    #[test]
    fn test_token_modifiers() {
        let t = CapToken::parse("=multi-prefix").unwrap();
        assert_eq!(t.modifier, Some(CapModifier::Sticky));
        assert_eq!(t.name, "multi-prefix");
        assert_eq!(t.to_string(), "=multi-prefix");

        assert!(CapToken::parse("-sasl").unwrap().is_disable());
        assert_eq!(CapToken::parse("~x").unwrap().modifier, Some(CapModifier::Ack));
        assert_eq!(CapToken::parse("-"), None);
    }

    #[test]
    fn test_parse_list_skips_extra_spaces() {
        let tokens = CapToken::parse_list("  multi-prefix   sasl ");
        assert_eq!(
            tokens,
            vec![CapToken::plain("multi-prefix"), CapToken::plain("sasl")]
        );
    }

    #[test]
    fn test_set_flags() {
        let mut set: CapabilitySet = ["multi-prefix"].into_iter().collect();
        set.set("sasl", false);
        assert!(set.is_enabled("multi-prefix"));
        assert!(!set.is_enabled("sasl"));
        assert!(set.contains("sasl"));
        assert_eq!(set.to_list(), "multi-prefix");
        assert!(set.remove("multi-prefix"));
        assert_eq!(set.len(), 1);
    }
}
