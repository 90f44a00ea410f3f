//! The server's supported capability set.

use super::{Capability, CapabilitySet};

/// Capabilities the server offers. Built once at startup, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapRegistry {
    supported: CapabilitySet,
}

impl CapRegistry {
    /// Registry offering exactly `caps`.
    pub fn new(caps: impl IntoIterator<Item = Capability>) -> Self {
        CapRegistry {
            supported: caps.into_iter().map(Capability::as_str).collect(),
        }
    }

    /// The supported set.
    pub fn supported(&self) -> &CapabilitySet {
        &self.supported
    }

    /// Whether `name` is offered.
    pub fn is_supported(&self, name: &str) -> bool {
        self.supported.is_enabled(name)
    }

    /// Space-separated list for `CAP LS`.
    pub fn ls_list(&self) -> String {
        self.supported.to_list()
    }

    /// Split requested names into `(granted, rejected)`, each in request
    /// order. Has no side effects.
    pub fn intersect<'a, I>(&self, requested: I) -> (Vec<&'a str>, Vec<&'a str>)
    where
        I: IntoIterator<Item = &'a str>,
    {
        requested
            .into_iter()
            .partition(|name| self.is_supported(name))
    }
}

impl Default for CapRegistry {
    fn default() -> Self {
        CapRegistry::new([Capability::MultiPrefix])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_offers_multi_prefix_only() {
        let reg = CapRegistry::default();
        assert!(reg.is_supported("multi-prefix"));
        assert!(!reg.is_supported("sasl"));
        assert_eq!(reg.ls_list(), "multi-prefix");
    }

    #[test]
    fn test_intersect_keeps_order() {
        let reg = CapRegistry::default();
        let (granted, rejected) = reg.intersect(["sasl", "multi-prefix", "MULTI-PREFIX"]);
        assert_eq!(granted, vec!["multi-prefix"]);
        assert_eq!(rejected, vec!["sasl", "MULTI-PREFIX"]);
    }

    #[test]
    fn test_intersect_empty() {
        let reg = CapRegistry::new([]);
        let (granted, rejected) = reg.intersect(["multi-prefix"]);
        assert!(granted.is_empty());
        assert_eq!(rejected, vec!["multi-prefix"]);
        assert!(reg.supported().is_empty());
    }
}
