#![allow(dead_code, unreachable_pub)]

use sfa_agent::{InputField, PageAgent, PageSnapshot};
use sfa_domain::FieldDescriptor;
use sfa_patterns::{PatternStore, StoreSettings};
use sfa_storage::{KeyValueStore, MemoryStore, StorageError};
use sfa_vault::{Aes, CryptoVault};
use std::sync::Arc;
use std::time::Duration;

pub type MemoryAgent = PageAgent<MemoryStore, CryptoVault<MemoryStore, Aes>>;

pub async fn memory_agent() -> (Arc<MemoryStore>, MemoryAgent) {
    let storage = Arc::new(MemoryStore::new());
    let agent = agent_over(&storage).await;
    (storage, agent)
}

pub async fn agent_over(storage: &Arc<MemoryStore>) -> MemoryAgent {
    let vault = CryptoVault::new(Arc::clone(storage));
    let patterns = PatternStore::open(Arc::clone(storage), vault, StoreSettings::default())
        .await
        .unwrap();
    PageAgent::new(Arc::clone(storage), patterns).await.unwrap()
}

/// Memory storage whose writes of the pattern table take `delay`.
#[derive(Debug)]
pub struct SlowTableWrites {
    pub inner: MemoryStore,
    pub delay: Duration,
}

impl SlowTableWrites {
    pub fn new(delay: Duration) -> Self {
        Self { inner: MemoryStore::new(), delay }
    }
}

impl KeyValueStore for SlowTableWrites {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        if key == "learnedPatterns" {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.inner.clear().await
    }
}

pub async fn slow_agent(
    delay: Duration,
) -> (Arc<SlowTableWrites>, PageAgent<SlowTableWrites, CryptoVault<SlowTableWrites, Aes>>) {
    let storage = Arc::new(SlowTableWrites::new(delay));
    let vault = CryptoVault::new(Arc::clone(&storage));
    let patterns = PatternStore::open(Arc::clone(&storage), vault, StoreSettings::default())
        .await
        .unwrap();
    let agent = PageAgent::new(Arc::clone(&storage), patterns).await.unwrap();
    (storage, agent)
}

/// A sign-up form with email, first name and a hidden honeypot.
pub fn signup_page(hostname: &str) -> PageSnapshot {
    PageSnapshot::new(hostname)
        .with_field(InputField::new(
            "email",
            FieldDescriptor::default().with_type("email").with_name("user_mail"),
        ))
        .with_field(InputField::new(
            "given",
            FieldDescriptor::default().with_name("first_name").with_label("First name"),
        ))
        .with_field(
            InputField::new("trap", FieldDescriptor::default().with_name("company")).hidden(),
        )
        .with_field(InputField::new(
            "pw",
            FieldDescriptor::default().with_type("password").with_name("password"),
        ))
}

/// `page` with the given values typed in.
pub fn filled(mut page: PageSnapshot, values: &[(&str, &str)]) -> PageSnapshot {
    for field in &mut page.fields {
        if let Some((_, value)) = values.iter().find(|(id, _)| *id == field.id.as_str()) {
            field.value = (*value).to_owned();
        }
    }
    page
}
