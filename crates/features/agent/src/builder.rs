use crate::agent::PageAgent;
use crate::error::AgentError;
use sfa_domain::config::{AppConfig, CipherChoice, CompressionChoice};
use sfa_patterns::{PatternStore, StoreSettings};
use sfa_storage::{Compression, FileStore, KeyValueStore};
use sfa_vault::{AnyVault, CryptoVault, DEFAULT_KEY_SLOT};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// An agent persisting to a directory, with the cipher picked by configuration.
pub type DiskAgent = PageAgent<FileStore, AnyVault<FileStore>>;

/// Wires storage, vault, pattern store and agent from an [`AppConfig`].
///
/// ```rust,no_run
/// use sfa_agent::AgentBuilder;
/// use sfa_domain::config::AppConfig;
///
/// # async fn run() -> Result<(), sfa_agent::AgentError> {
/// let agent = AgentBuilder::new(AppConfig::default()).data_dir("/tmp/sfa").build().await?;
/// assert!(agent.is_enabled());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AgentBuilder {
    config: AppConfig,
    data_dir: Option<PathBuf>,
    init_key: bool,
}

impl AgentBuilder {
    #[must_use]
    pub const fn new(config: AppConfig) -> Self {
        Self { config, data_dir: None, init_key: true }
    }

    /// Overrides `storage.data_dir`.
    #[must_use]
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Whether [`build`](Self::build) creates the key up front when none is stored (default
    /// `true`). Without it the key is created by the first learn. A stored key is imported
    /// either way.
    #[must_use]
    pub const fn init_key(mut self, enable: bool) -> Self {
        self.init_key = enable;
        self
    }

    /// Opens the store, prepares the key, loads the table and reads the flags.
    ///
    /// An unreadable table is discarded, not reported.
    ///
    /// # Errors
    /// * [`AgentError::Storage`] if the directory cannot be opened or read.
    /// * [`AgentError::Vault`] if the stored key cannot be imported.
    /// * [`AgentError::Patterns`] if the table cannot be read in time.
    pub async fn build(self) -> Result<DiskAgent, AgentError> {
        let dir = self.data_dir.unwrap_or_else(|| self.config.storage.data_dir.clone());
        let compression = match self.config.storage.compression {
            CompressionChoice::None => Compression::None,
            CompressionChoice::Lz4 => Compression::Lz4,
        };

        let storage =
            Arc::new(FileStore::builder().root(dir).compression(compression).connect().await?);

        let vault = match self.config.vault.cipher {
            CipherChoice::Aes256gcm => AnyVault::Aes(CryptoVault::new(Arc::clone(&storage))),
            CipherChoice::Chacha20poly1305 => {
                AnyVault::ChaCha(CryptoVault::new(Arc::clone(&storage)))
            },
        };
        if self.init_key || storage.get(DEFAULT_KEY_SLOT).await?.is_some() {
            vault.init_key().await?;
        }
        info!(alg = vault.algorithm(), root = %storage.root().display(), "Vault ready");

        let settings = StoreSettings::from(&self.config.patterns);
        let patterns = PatternStore::open(Arc::clone(&storage), vault, settings).await?;
        PageAgent::new(storage, patterns).await
    }
}
