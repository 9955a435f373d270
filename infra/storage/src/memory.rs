use crate::error::StorageError;
use crate::key::KeyName;
use crate::store::KeyValueStore;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory [`KeyValueStore`] for tests and ephemeral sessions.
///
/// [`MemoryStore::set_available`] simulates an unreachable backend: while unavailable every
/// operation fails with [`StorageError::Unavailable`] and the contents are left untouched.
#[derive(Debug)]
pub struct MemoryStore {
    entries: RwLock<FxHashMap<KeyName, Vec<u8>>>,
    available: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self { entries: RwLock::default(), available: AtomicBool::new(true) }
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        KeyName::try_from(key).is_ok_and(|k| self.entries.read().contains_key(&k))
    }

    /// Overwrites raw bytes without any availability check. Test hook for corrupting data.
    pub fn insert_raw(&self, key: &str, value: impl Into<Vec<u8>>) -> Result<(), StorageError> {
        let key = KeyName::try_from(key)?;
        self.entries.write().insert(key, value.into());
        Ok(())
    }

    fn check(&self, op: &'static str) -> Result<(), StorageError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StorageError::Unavailable {
                message: "memory store is offline".into(),
                context: Some(op.into()),
            })
        }
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        self.check("get")?;
        let key = KeyName::try_from(key)?;
        Ok(self.entries.read().get(&key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.check("set")?;
        let key = KeyName::try_from(key)?;
        self.entries.write().insert(key, value.to_vec());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check("remove")?;
        let key = KeyName::try_from(key)?;
        self.entries.write().remove(&key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.check("clear")?;
        self.entries.write().clear();
        Ok(())
    }
}
