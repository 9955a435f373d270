//! Durable asynchronous key-value storage.
//!
//! The autofill core keeps two values in storage: the exported encryption key and the
//! encrypted pattern table, plus a few installation flags. This crate defines the
//! [`KeyValueStore`] seam those components are written against and two implementations:
//!
//! - **[`FileStore`]**: one file per key under a root directory, atomic writes
//!   (unique temp file + `fsync` + `rename`), optional LZ4 compression and cleanup of
//!   temp files orphaned by a crash.
//! - **[`MemoryStore`]**: a map behind a lock, with a switch that makes it fail like an
//!   unreachable backend.
//!
//! Missing keys read as `None`; removing a missing key succeeds.
//!
//! ```rust
//! use sfa_storage::{Compression, FileStore, KeyValueStoreExt, StorageError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), StorageError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     let store = FileStore::builder()
//!         .root(tmp.path())
//!         .compression(Compression::Lz4)
//!         .connect()
//!         .await?;
//!
//!     store.set_json("securityLevel", "high").await?;
//!     let level: Option<String> = store.get_json("securityLevel").await?;
//!     assert_eq!(level.as_deref(), Some("high"));
//!     Ok(())
//! }
//! ```

mod builder;
mod error;
mod file;
mod key;
mod maintenance;
mod memory;
mod store;

pub use builder::FileStoreBuilder;
pub use error::{StorageError, StorageErrorExt};
pub use file::{Compression, FileStore};
pub use key::KeyName;
pub use memory::MemoryStore;
pub use store::{KeyValueStore, KeyValueStoreExt};
