use sfa_domain::config::PatternsConfig;
use sfa_domain::keys;
use std::time::Duration;

/// Tunables of a [`PatternStore`](crate::PatternStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    /// Storage key of the encrypted table.
    pub storage_key: String,
    /// Upper bound for each storage read, write, encryption or decryption.
    pub io_timeout: Duration,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self { storage_key: keys::LEARNED_PATTERNS.to_owned(), io_timeout: Duration::from_secs(5) }
    }
}

impl From<&PatternsConfig> for StoreSettings {
    fn from(config: &PatternsConfig) -> Self {
        Self::default().with_io_timeout(Duration::from_millis(config.io_timeout_ms))
    }
}

impl StoreSettings {
    /// A zero timeout would fail every call; it is raised to one millisecond.
    #[must_use]
    pub fn with_io_timeout(mut self, timeout: Duration) -> Self {
        self.io_timeout = timeout.max(Duration::from_millis(1));
        self
    }

    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}
