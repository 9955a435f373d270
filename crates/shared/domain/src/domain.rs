use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of the second level of the pattern table: a hostname, or `*` for the cross-site
/// bucket.
///
/// Hostnames are lower-cased and stripped of a trailing dot. Site and wildcard buckets are
/// independent frequency spaces; nothing here merges them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainKey(String);

impl DomainKey {
    pub const WILDCARD: &'static str = "*";

    #[must_use]
    pub fn wildcard() -> Self {
        Self(Self::WILDCARD.to_owned())
    }

    /// Builds a site key. Returns `None` for an empty hostname or one containing whitespace
    /// `/` or `*`, such as
    /// the empty hostname of pages loaded from `file://`.
    #[must_use]
    pub fn site(hostname: &str) -> Option<Self> {
        let host = hostname.trim().trim_end_matches('.').to_ascii_lowercase();
        if host.is_empty() || host.chars().any(|c| c.is_whitespace() || matches!(c, '/' | '*')) {
            return None;
        }
        Some(Self(host))
    }

    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.0 == Self::WILDCARD
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DomainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_keys_are_normalized() {
        assert_eq!(DomainKey::site("Shop.Example.COM.").unwrap().as_str(), "shop.example.com");
        assert_eq!(DomainKey::site("localhost").unwrap().as_str(), "localhost");
    }

    #[test]
    fn unusable_hostnames_are_rejected() {
        assert!(DomainKey::site("").is_none());
        assert!(DomainKey::site("  ").is_none());
        assert!(DomainKey::site("bad host").is_none());
        assert!(DomainKey::site("*").is_none());
    }

    #[test]
    fn wildcard_is_star() {
        let w = DomainKey::wildcard();
        assert!(w.is_wildcard());
        assert_eq!(serde_json::to_string(&w).unwrap(), "\"*\"");
        assert!(!DomainKey::site("site.com").unwrap().is_wildcard());
    }
}
