//! # Learned patterns
//!
//! The suggestion engine of the autofill assistant. For every field type and site it keeps
//! up to [`MAX_VALUES_PER_ENTRY`] values ranked by how often the user typed them, plus a
//! cross-site `*` bucket per field type:
//!
//! ```text
//! email ─┬─ "shop.example"  ["a@x.com"(3), "b@x.com"(1)]
//!        └─ "*"             ["a@x.com"(5), "work@y.org"(2)]
//! ```
//!
//! [`PatternStore::suggest`] answers from the site bucket first and the `*` bucket second.
//! The whole table is encrypted as a single envelope through any
//! [`EnvelopeCipher`](sfa_vault::EnvelopeCipher) and rewritten after every
//! [`PatternStore::learn`].
//!
//! ```rust
//! use sfa_domain::{DomainKey, FieldType};
//! use sfa_patterns::{PatternStore, StoreSettings};
//! use sfa_storage::MemoryStore;
//! use sfa_vault::{Aes, CryptoVault};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), sfa_patterns::PatternError> {
//! let storage = Arc::new(MemoryStore::new());
//! let vault = CryptoVault::<_, Aes>::new(Arc::clone(&storage));
//! let store = PatternStore::open(storage, vault, StoreSettings::default()).await?;
//!
//! let site = DomainKey::site("shop.example").unwrap();
//! store.learn(FieldType::Email, "a@x.com", &site).await?;
//! store.learn(FieldType::Email, "a@x.com", &DomainKey::wildcard()).await?;
//!
//! let elsewhere = DomainKey::site("other.example").unwrap();
//! assert_eq!(store.suggest(FieldType::Email, &elsewhere).as_deref(), Some("a@x.com"));
//! # Ok(())
//! # }
//! ```

mod entry;
mod error;
mod settings;
mod store;
mod table;

pub use entry::{MAX_VALUES_PER_ENTRY, MIN_VALUE_CHARS, PatternEntry, Recorded};
pub use error::{PatternError, PatternErrorExt};
pub use settings::StoreSettings;
pub use store::{Learned, LoadOutcome, PatternStore};
pub use table::{PatternStats, PatternTable};
