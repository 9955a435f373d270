use serde::{Deserialize, Serialize};
use sfa_storage::MemoryStore;
use sfa_vault::{CryptoVault, VaultCipher};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedEntry {
    pub values: Vec<String>,
    pub count: BTreeMap<String, u32>,
}

#[must_use]
pub fn sample_entry() -> SavedEntry {
    SavedEntry {
        values: vec!["a@x.com".to_owned(), "b@x.com".to_owned()],
        count: BTreeMap::from([("a@x.com".to_owned(), 3), ("b@x.com".to_owned(), 1)]),
    }
}

/// A vault over a fresh in-memory store; the store is returned for inspection.
#[must_use]
pub fn setup_vault<C: VaultCipher>() -> (Arc<MemoryStore>, CryptoVault<MemoryStore, C>) {
    let store = Arc::new(MemoryStore::new());
    let vault = CryptoVault::new(Arc::clone(&store));
    (store, vault)
}
