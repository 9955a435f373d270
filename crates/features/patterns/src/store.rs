use crate::entry::{MIN_VALUE_CHARS, Recorded};
use crate::error::PatternError;
use crate::settings::StoreSettings;
use crate::table::{PatternStats, PatternTable};
use parking_lot::RwLock;
use sfa_domain::{DomainKey, FieldType};
use sfa_kernel::within;
use sfa_storage::{KeyValueStore, KeyValueStoreExt};
use sfa_vault::{Envelope, EnvelopeCipher, EnvelopeCipherExt, VaultError};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Outcome of [`PatternStore::learn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Learned {
    /// Empty or shorter than two characters; nothing changed.
    Ignored,
    /// Counted and kept at `rank` (0 is the suggestion).
    Recorded { count: u32, rank: usize },
    /// Counted, then dropped as the lowest-ranked value of a full entry.
    Evicted,
}

impl From<Recorded> for Learned {
    fn from(recorded: Recorded) -> Self {
        match recorded {
            Recorded::Ranked { count, rank } => Self::Recorded { count, rank },
            Recorded::Evicted => Self::Evicted,
        }
    }
}

/// Outcome of [`PatternStore::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored yet.
    Empty,
    /// The stored table was decrypted.
    Restored(PatternStats),
    /// The stored table could not be decrypted or decoded and was replaced by an empty one.
    Discarded,
}

struct StoreInner<K, E> {
    storage: Arc<K>,
    cipher: E,
    settings: StoreSettings,
    table: RwLock<PatternTable>,
    loaded: AtomicBool,
    writer: Mutex<()>,
}

/// Learned values per (field type, domain), encrypted at rest as one envelope.
///
/// Mutations go through a single writer: [`learn`](Self::learn), [`load`](Self::load),
/// [`save`](Self::save) and [`clear`](Self::clear) queue on a FIFO lock held across the
/// whole read-modify-encrypt-write cycle, so two learns never persist from the same stale
/// table. [`suggest`](Self::suggest) reads the resident table and never waits for I/O.
///
/// Every storage or cipher step is bounded by [`StoreSettings::io_timeout`].
pub struct PatternStore<K, E> {
    inner: Arc<StoreInner<K, E>>,
}

impl<K, E> Clone for PatternStore<K, E> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<K, E> std::fmt::Debug for PatternStore<K, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternStore")
            .field("settings", &self.inner.settings)
            .field("loaded", &self.inner.loaded.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

impl<K, E> PatternStore<K, E>
where
    K: KeyValueStore,
    E: EnvelopeCipher,
{
    /// An unloaded store. Call [`load`](Self::load) or use [`open`](Self::open).
    #[must_use]
    pub fn new(storage: Arc<K>, cipher: E, settings: StoreSettings) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                storage,
                cipher,
                settings,
                table: RwLock::new(PatternTable::new()),
                loaded: AtomicBool::new(false),
                writer: Mutex::new(()),
            }),
        }
    }

    /// Creates and loads a store.
    ///
    /// # Errors
    /// See [`load`](Self::load).
    pub async fn open(
        storage: Arc<K>,
        cipher: E,
        settings: StoreSettings,
    ) -> Result<Self, PatternError> {
        let store = Self::new(storage, cipher, settings);
        store.load().await?;
        Ok(store)
    }

    #[must_use]
    pub fn settings(&self) -> &StoreSettings {
        &self.inner.settings
    }

    #[must_use]
    pub fn cipher(&self) -> &E {
        &self.inner.cipher
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.inner.loaded.load(Ordering::Acquire)
    }

    /// Replaces the resident table with the stored one.
    ///
    /// An unreadable envelope (bad JSON, wrong nonce length, failed authentication) is logged
    /// and replaced by an empty table; the next save overwrites it.
    ///
    /// # Errors
    /// * [`PatternError::Storage`] if the store cannot be read.
    /// * [`PatternError::Vault`] if the stored key cannot be imported or the key store fails
    ///   while decrypting. The store stays unloaded.
    /// * [`PatternError::Timeout`] if a step exceeds the I/O timeout.
    pub async fn load(&self) -> Result<LoadOutcome, PatternError> {
        let _writer = self.inner.writer.lock().await;
        self.load_locked().await
    }

    /// Encrypts the resident table and writes it, replacing the stored envelope.
    ///
    /// # Errors
    /// [`PatternError::Vault`], [`PatternError::Storage`] or [`PatternError::Timeout`].
    pub async fn save(&self) -> Result<(), PatternError> {
        let _writer = self.inner.writer.lock().await;
        self.save_locked().await
    }

    /// Counts one observation of `value` for (`field_type`, `domain`) and persists the table.
    ///
    /// Values shorter than two characters are ignored. A store that was never loaded loads
    /// first, so persisted counts are extended rather than overwritten. If persisting fails
    /// the observation stays in memory and the error is returned.
    ///
    /// # Errors
    /// See [`load`](Self::load) and [`save`](Self::save).
    pub async fn learn(
        &self,
        field_type: FieldType,
        value: &str,
        domain: &DomainKey,
    ) -> Result<Learned, PatternError> {
        let chars = value.chars().count();
        if chars < MIN_VALUE_CHARS {
            debug!(%field_type, %domain, chars, "Ignoring short value");
            return Ok(Learned::Ignored);
        }

        let _writer = self.inner.writer.lock().await;
        if !self.is_loaded() {
            self.load_locked().await?;
        }

        let learned = Learned::from(self.inner.table.write().record(field_type, domain, value));
        debug!(%field_type, %domain, chars, ?learned, "Learned value");

        self.save_locked().await?;
        Ok(learned)
    }

    /// Top value for the exact (`field_type`, `domain`) bucket, else the top of the `*`
    /// bucket, else `None`.
    #[must_use]
    pub fn suggest(&self, field_type: FieldType, domain: &DomainKey) -> Option<String> {
        self.inner.table.read().top(field_type, domain).map(str::to_owned)
    }

    /// A copy of the resident table.
    #[must_use]
    pub fn snapshot(&self) -> PatternTable {
        self.inner.table.read().clone()
    }

    #[must_use]
    pub fn stats(&self) -> PatternStats {
        self.inner.table.read().stats()
    }

    /// Wipes the whole backing store, forgets the in-memory key and empties the table.
    ///
    /// Runs as a writer: a learn already persisting finishes first, and learns queued behind
    /// the wipe start from the empty table under a new key.
    ///
    /// # Errors
    /// [`PatternError::Storage`] or [`PatternError::Timeout`] if the store cannot be cleared.
    /// The key and table are kept in that case.
    pub async fn clear(&self) -> Result<(), PatternError> {
        let _writer = self.inner.writer.lock().await;
        self.bounded("clearing storage", self.inner.storage.clear()).await?;
        self.inner.cipher.reset().await;
        self.replace_table(PatternTable::new());
        info!("Storage cleared");
        Ok(())
    }

    async fn load_locked(&self) -> Result<LoadOutcome, PatternError> {
        let key = self.inner.settings.storage_key.as_str();
        let stored = self.bounded("reading patterns", self.inner.storage.get(key)).await?;
        let Some(bytes) = stored else {
            self.replace_table(PatternTable::new());
            debug!(key, "No stored patterns");
            return Ok(LoadOutcome::Empty);
        };

        let decoded = match serde_json::from_slice::<Envelope>(&bytes) {
            Ok(envelope) => {
                within(
                    self.inner.settings.io_timeout,
                    "decrypting patterns",
                    self.inner.cipher.decrypt::<PatternTable>(&envelope),
                )
                .await?
            },
            Err(e) => Err(VaultError::from(e)),
        };

        match decoded {
            Ok(table) => {
                let stats = table.stats();
                self.replace_table(table);
                info!(key, field_types = stats.field_types, sites = stats.sites, "Loaded patterns");
                Ok(LoadOutcome::Restored(stats))
            },
            Err(e) if e.is_crypto() => {
                warn!(key, error = %e, "Stored patterns are unreadable, starting empty");
                self.replace_table(PatternTable::new());
                Ok(LoadOutcome::Discarded)
            },
            Err(e) => Err(e.into()),
        }
    }

    async fn save_locked(&self) -> Result<(), PatternError> {
        let key = self.inner.settings.storage_key.as_str();
        let table = self.snapshot();

        let envelope =
            self.bounded("encrypting patterns", self.inner.cipher.encrypt(&table)).await?;
        self.bounded("writing patterns", self.inner.storage.set_json(key, &envelope)).await?;

        debug!(key, bytes = envelope.data.len(), "Saved patterns");
        Ok(())
    }

    fn replace_table(&self, table: PatternTable) {
        *self.inner.table.write() = table;
        self.inner.loaded.store(true, Ordering::Release);
    }

    async fn bounded<T, Er>(
        &self,
        what: &'static str,
        fut: impl Future<Output = Result<T, Er>>,
    ) -> Result<T, PatternError>
    where
        PatternError: From<Er>,
    {
        Ok(within(self.inner.settings.io_timeout, what, fut).await??)
    }
}
