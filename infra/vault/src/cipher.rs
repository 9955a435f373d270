//! # Envelope ciphers
//!
//! [`EnvelopeCipher`] is the seam between the pattern store and the vault: anything that
//! can turn bytes into an [`Envelope`] and back. [`EnvelopeCipherExt`] adds the typed
//! `encrypt` / `decrypt` used by callers, encoding values as JSON before encryption.

use crate::error::{VaultError, VaultErrorExt};
use crate::types::Envelope;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use zeroize::Zeroizing;

pub trait EnvelopeCipher: Send + Sync {
    /// Encrypts `plaintext` under a fresh nonce.
    fn encrypt_bytes(
        &self,
        plaintext: &[u8],
    ) -> impl Future<Output = Result<Envelope, VaultError>> + Send;

    /// Authenticates and decrypts `envelope`.
    fn decrypt_bytes(
        &self,
        envelope: &Envelope,
    ) -> impl Future<Output = Result<Vec<u8>, VaultError>> + Send;

    /// Drops any key held in memory. The next call re-imports or regenerates it.
    fn reset(&self) -> impl Future<Output = ()> + Send;
}

pub trait EnvelopeCipherExt: EnvelopeCipher {
    /// Serializes `value` to JSON and encrypts it.
    ///
    /// # Errors
    /// * [`VaultError::Serialization`] if `value` cannot be encoded.
    /// * Any error of [`EnvelopeCipher::encrypt_bytes`].
    fn encrypt<T>(&self, value: &T) -> impl Future<Output = Result<Envelope, VaultError>> + Send
    where
        T: Serialize + ?Sized,
    {
        let encoded = serde_json::to_vec(value).map(Zeroizing::new);
        async move {
            let plaintext = encoded.context("Encoding plaintext")?;
            self.encrypt_bytes(&plaintext).await
        }
    }

    /// Decrypts `envelope` and deserializes the JSON plaintext.
    ///
    /// # Errors
    /// * Any error of [`EnvelopeCipher::decrypt_bytes`].
    /// * [`VaultError::Serialization`] if the plaintext is not the expected JSON.
    fn decrypt<T>(&self, envelope: &Envelope) -> impl Future<Output = Result<T, VaultError>> + Send
    where
        T: DeserializeOwned + Send,
    {
        async move {
            let plaintext = Zeroizing::new(self.decrypt_bytes(envelope).await?);
            serde_json::from_slice(&plaintext).context("Decoding plaintext")
        }
    }
}

impl<E: EnvelopeCipher> EnvelopeCipherExt for E {}
