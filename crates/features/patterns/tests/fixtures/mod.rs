#![allow(dead_code, unreachable_pub)]

use sfa_domain::DomainKey;
use sfa_patterns::{PatternStore, StoreSettings};
use sfa_storage::{KeyValueStore, MemoryStore, StorageError};
use sfa_vault::{Aes, CryptoVault, Envelope, EnvelopeCipher, NONCE_LEN, VaultError};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Stores plaintext in the envelope. Lets tests run without key material.
#[derive(Debug, Default)]
pub struct PlainCipher {
    pub reject: AtomicBool,
    pub resets: AtomicUsize,
}

impl PlainCipher {
    pub fn rejecting() -> Self {
        Self { reject: AtomicBool::new(true), ..Self::default() }
    }
}

impl EnvelopeCipher for PlainCipher {
    async fn encrypt_bytes(&self, plaintext: &[u8]) -> Result<Envelope, VaultError> {
        Ok(Envelope { data: plaintext.to_vec(), iv: vec![0; NONCE_LEN] })
    }

    async fn decrypt_bytes(&self, envelope: &Envelope) -> Result<Vec<u8>, VaultError> {
        if self.reject.load(Ordering::SeqCst) {
            return Err(VaultError::Decryption { message: "rejected".into(), context: None });
        }
        Ok(envelope.data.clone())
    }

    async fn reset(&self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
    }
}

/// Delays every call by `delay`.
#[derive(Debug)]
pub struct SlowStore {
    pub inner: MemoryStore,
    pub delay: Duration,
}

impl KeyValueStore for SlowStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        tokio::time::sleep(self.delay).await;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        tokio::time::sleep(self.delay).await;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        tokio::time::sleep(self.delay).await;
        self.inner.remove(key).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        tokio::time::sleep(self.delay).await;
        self.inner.clear().await
    }
}

pub type VaultStore = PatternStore<MemoryStore, CryptoVault<MemoryStore, Aes>>;

/// A store over a real vault; both share the returned memory store.
pub async fn vault_store() -> (Arc<MemoryStore>, VaultStore) {
    let storage = Arc::new(MemoryStore::new());
    let store = reopen(&storage).await;
    (storage, store)
}

/// A fresh store and vault over existing storage, as after a restart.
pub async fn reopen(storage: &Arc<MemoryStore>) -> VaultStore {
    let vault = CryptoVault::new(Arc::clone(storage));
    PatternStore::open(Arc::clone(storage), vault, StoreSettings::default()).await.unwrap()
}

pub fn plain_store(storage: &Arc<MemoryStore>) -> PatternStore<MemoryStore, PlainCipher> {
    PatternStore::new(Arc::clone(storage), PlainCipher::default(), StoreSettings::default())
}

pub fn site(host: &str) -> DomainKey {
    DomainKey::site(host).unwrap()
}
