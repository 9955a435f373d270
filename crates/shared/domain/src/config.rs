use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration of the autofill tools.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub storage: StorageConfig,
    pub vault: VaultConfig,
    pub patterns: PatternsConfig,
    pub logging: LoggingConfig,
}

/// Arc-wrapped config, cheap to clone into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Encoding of new writes. Compressed files are marked, so the choice can change on an
/// existing data directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionChoice {
    #[default]
    None,
    Lz4,
}

/// Where and how values are persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub compression: CompressionChoice,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CipherChoice {
    #[default]
    Aes256gcm,
    Chacha20poly1305,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    pub cipher: CipherChoice,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PatternsConfig {
    /// Upper bound for one storage or crypto step of the pattern store.
    pub io_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    /// Also write rolling log files here.
    pub dir: Option<PathBuf>,
}

// --- Default ---

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("data"), compression: CompressionChoice::None }
    }
}

impl Default for PatternsConfig {
    fn default() -> Self {
        Self { io_timeout_ms: 5_000 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), json: false, dir: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from("data"));
        assert_eq!(config.vault.cipher, CipherChoice::Aes256gcm);
        assert_eq!(config.patterns.io_timeout_ms, 5_000);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.dir.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let json = r#"{"vault":{"cipher":"chacha20poly1305"},"storage":{"compression":"lz4"}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.vault.cipher, CipherChoice::Chacha20poly1305);
        assert_eq!(config.storage.compression, CompressionChoice::Lz4);
        assert_eq!(config.storage.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn clones_share_until_mutated() {
        let base = AppConfig::default();
        let mut changed = base.clone();
        changed.patterns.io_timeout_ms = 10;
        assert_eq!(base.patterns.io_timeout_ms, 5_000);
        assert_eq!(changed.patterns.io_timeout_ms, 10);
    }
}
