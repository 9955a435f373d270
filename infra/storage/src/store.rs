use crate::error::{StorageError, StorageErrorExt};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;

/// A durable asynchronous key-value store.
///
/// Implementations must treat a missing key as `Ok(None)` and make `remove` idempotent.
/// Keys are validated as [`KeyName`](crate::KeyName) by every implementation.
pub trait KeyValueStore: Send + Sync {
    /// Returns the bytes stored under `key`, or `None` if the key was never written.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<Vec<u8>>, StorageError>> + Send;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Removes `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Removes every key.
    fn clear(&self) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// JSON helpers for any [`KeyValueStore`].
pub trait KeyValueStoreExt: KeyValueStore {
    /// Reads and decodes a JSON value.
    fn get_json<T>(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<T>, StorageError>> + Send
    where
        T: DeserializeOwned + Send,
    {
        async move {
            match self.get(key).await? {
                Some(bytes) => serde_json::from_slice(&bytes)
                    .map(Some)
                    .context(format!("Decoding value of '{key}'")),
                None => Ok(None),
            }
        }
    }

    /// Encodes `value` as JSON and stores it.
    fn set_json<T>(
        &self,
        key: &str,
        value: &T,
    ) -> impl Future<Output = Result<(), StorageError>> + Send
    where
        T: Serialize + ?Sized,
    {
        let encoded = serde_json::to_vec(value);
        async move {
            let bytes = encoded.context(format!("Encoding value of '{key}'"))?;
            self.set(key, &bytes).await
        }
    }
}

impl<S: KeyValueStore> KeyValueStoreExt for S {}
