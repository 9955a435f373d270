use crate::cipher::EnvelopeCipher;
use crate::error::{VaultError, VaultErrorExt};
use crate::key::{ExportedKey, KeyMaterial};
use crate::types::{Aes, ChaCha, Envelope, NONCE_LEN, TAG_LEN, VaultCipher};
use aead::inout::InOutBuf;
use aead::{Nonce, Tag};
use sfa_storage::{KeyValueStore, KeyValueStoreExt};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Storage key of the exported encryption key.
pub const DEFAULT_KEY_SLOT: &str = "encKey";

struct VaultInner<S, C> {
    store: Arc<S>,
    key_slot: String,
    cipher: Mutex<Option<Arc<C>>>,
}

/// Owns the installation's single encryption key and encrypts values into [`Envelope`]s.
///
/// The key is created lazily: the first [`CryptoVault::init_key`], encryption or decryption
/// imports it from the key slot of the store, or generates, exports and persists a new one.
/// Concurrent first callers wait on the same initialization instead of racing to create
/// two keys.
///
/// Losing the stored key makes every envelope written under it unreadable. There is no
/// rotation or recovery.
///
/// ```rust
/// use sfa_storage::MemoryStore;
/// use sfa_vault::{Aes, CryptoVault, EnvelopeCipherExt, VaultError};
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), VaultError> {
/// let vault = CryptoVault::<_, Aes>::new(Arc::new(MemoryStore::new()));
///
/// let envelope = vault.encrypt(&vec!["a@x.com"]).await?;
/// let values: Vec<String> = vault.decrypt(&envelope).await?;
/// assert_eq!(values, ["a@x.com"]);
/// # Ok(())
/// # }
/// ```
pub struct CryptoVault<S, C = Aes> {
    inner: Arc<VaultInner<S, C>>,
}

impl<S, C> Clone for CryptoVault<S, C> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S, C: VaultCipher> std::fmt::Debug for CryptoVault<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoVault")
            .field("alg", &C::ALG)
            .field("key_slot", &self.inner.key_slot)
            .finish_non_exhaustive()
    }
}

impl<S, C> CryptoVault<S, C>
where
    S: KeyValueStore,
    C: VaultCipher,
{
    /// A vault keeping its key under [`DEFAULT_KEY_SLOT`].
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self::with_key_slot(store, DEFAULT_KEY_SLOT)
    }

    #[must_use]
    pub fn with_key_slot(store: Arc<S>, key_slot: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(VaultInner {
                store,
                key_slot: key_slot.into(),
                cipher: Mutex::new(None),
            }),
        }
    }

    #[must_use]
    pub fn key_slot(&self) -> &str {
        &self.inner.key_slot
    }

    /// Makes sure a key is held in memory. Idempotent.
    ///
    /// # Errors
    /// * [`VaultError::Storage`] if the key slot cannot be read or written.
    /// * [`VaultError::KeyMaterial`] if the stored key is unusable.
    /// * [`VaultError::Serialization`] if the stored key is not an exported key.
    pub async fn init_key(&self) -> Result<(), VaultError> {
        self.cipher().await.map(drop)
    }

    /// `true` once a key is held in memory.
    pub async fn is_ready(&self) -> bool {
        self.inner.cipher.lock().await.is_some()
    }

    /// Drops the in-memory key.
    pub async fn forget_key(&self) {
        if self.inner.cipher.lock().await.take().is_some() {
            debug!(slot = %self.inner.key_slot, "Forgot in-memory key");
        }
    }

    async fn cipher(&self) -> Result<Arc<C>, VaultError> {
        let mut slot = self.inner.cipher.lock().await;
        if let Some(cipher) = slot.as_ref() {
            return Ok(Arc::clone(cipher));
        }

        let cipher = Arc::new(self.load_or_generate().await?);
        *slot = Some(Arc::clone(&cipher));
        Ok(cipher)
    }

    async fn load_or_generate(&self) -> Result<C, VaultError> {
        let store = &self.inner.store;
        let slot = self.inner.key_slot.as_str();

        let stored: Option<ExportedKey> =
            store.get_json(slot).await.context("Reading key material")?;

        if let Some(exported) = stored {
            let cipher = KeyMaterial::import::<C>(&exported)?.cipher()?;
            debug!(slot, alg = C::ALG, "Imported encryption key");
            return Ok(cipher);
        }

        let material = KeyMaterial::generate()?;
        let cipher = material.cipher()?;
        store.set_json(slot, &material.export::<C>()).await.context("Persisting key material")?;
        info!(slot, alg = C::ALG, "Generated new encryption key");
        Ok(cipher)
    }
}

impl<S, C> EnvelopeCipher for CryptoVault<S, C>
where
    S: KeyValueStore,
    C: VaultCipher,
{
    async fn encrypt_bytes(&self, plaintext: &[u8]) -> Result<Envelope, VaultError> {
        let cipher = self.cipher().await?;
        seal(&*cipher, plaintext)
    }

    async fn decrypt_bytes(&self, envelope: &Envelope) -> Result<Vec<u8>, VaultError> {
        let cipher = self.cipher().await?;
        open(&*cipher, envelope)
    }

    async fn reset(&self) {
        self.forget_key().await;
    }
}

fn seal<C: VaultCipher>(cipher: &C, plaintext: &[u8]) -> Result<Envelope, VaultError> {
    let mut nonce = Nonce::<C>::default();
    getrandom::fill(&mut nonce).map_err(|e| VaultError::Encryption {
        message: e.to_string().into(),
        context: Some("System RNG unavailable for nonce generation".into()),
    })?;

    let mut data = Vec::with_capacity(plaintext.len() + TAG_LEN);
    data.extend_from_slice(plaintext);

    let tag = cipher.encrypt_inout_detached(&nonce, &[], InOutBuf::from(&mut data[..])).map_err(
        |_| VaultError::Encryption {
            message: "Encryption failed".into(),
            context: Some("AEAD encryption failed".into()),
        },
    )?;

    data.extend_from_slice(tag.as_slice());
    Ok(Envelope { data, iv: nonce.to_vec() })
}

fn open<C: VaultCipher>(cipher: &C, envelope: &Envelope) -> Result<Vec<u8>, VaultError> {
    if envelope.iv.len() != NONCE_LEN {
        return Err(VaultError::InvalidEnvelope {
            message: format!("nonce is {} bytes, expected {NONCE_LEN}", envelope.iv.len()).into(),
            context: None,
        });
    }

    if envelope.data.len() < TAG_LEN {
        return Err(VaultError::InvalidEnvelope {
            message: format!(
                "ciphertext is {} bytes, shorter than the {TAG_LEN}-byte tag",
                envelope.data.len()
            )
            .into(),
            context: None,
        });
    }

    let nonce = Nonce::<C>::try_from(envelope.iv.as_slice()).map_err(|_| {
        VaultError::InvalidEnvelope { message: "Invalid nonce length".into(), context: None }
    })?;

    let (ciphertext, tag_slice) = envelope.data.split_at(envelope.data.len() - TAG_LEN);
    let tag = Tag::<C>::try_from(tag_slice).map_err(|_| VaultError::InvalidEnvelope {
        message: "Invalid tag length".into(),
        context: None,
    })?;

    let mut buf = ciphertext.to_vec();
    cipher.decrypt_inout_detached(&nonce, &[], InOutBuf::from(&mut buf[..]), &tag).map_err(
        |_| VaultError::Decryption {
            message: "Decryption failed".into(),
            context: Some("AEAD authentication failed".into()),
        },
    )?;

    Ok(buf)
}

/// A vault whose cipher is picked at runtime, e.g. from configuration.
#[derive(Debug)]
pub enum AnyVault<S> {
    Aes(CryptoVault<S, Aes>),
    ChaCha(CryptoVault<S, ChaCha>),
}

impl<S> Clone for AnyVault<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Aes(v) => Self::Aes(v.clone()),
            Self::ChaCha(v) => Self::ChaCha(v.clone()),
        }
    }
}

impl<S: KeyValueStore> AnyVault<S> {
    /// # Errors
    /// See [`CryptoVault::init_key`].
    pub async fn init_key(&self) -> Result<(), VaultError> {
        match self {
            Self::Aes(v) => v.init_key().await,
            Self::ChaCha(v) => v.init_key().await,
        }
    }

    #[must_use]
    pub const fn algorithm(&self) -> &'static str {
        match self {
            Self::Aes(_) => Aes::ALG,
            Self::ChaCha(_) => ChaCha::ALG,
        }
    }
}

impl<S: KeyValueStore> EnvelopeCipher for AnyVault<S> {
    async fn encrypt_bytes(&self, plaintext: &[u8]) -> Result<Envelope, VaultError> {
        match self {
            Self::Aes(v) => v.encrypt_bytes(plaintext).await,
            Self::ChaCha(v) => v.encrypt_bytes(plaintext).await,
        }
    }

    async fn decrypt_bytes(&self, envelope: &Envelope) -> Result<Vec<u8>, VaultError> {
        match self {
            Self::Aes(v) => v.decrypt_bytes(envelope).await,
            Self::ChaCha(v) => v.decrypt_bytes(envelope).await,
        }
    }

    async fn reset(&self) {
        match self {
            Self::Aes(v) => v.forget_key().await,
            Self::ChaCha(v) => v.forget_key().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cipher() -> Aes {
        KeyMaterial::generate().unwrap().cipher::<Aes>().unwrap()
    }

    #[test]
    fn seal_appends_tag_and_uses_fresh_nonces() {
        let cipher = test_cipher();
        let a = seal(&cipher, b"hello").unwrap();
        let b = seal(&cipher, b"hello").unwrap();

        assert_eq!(a.data.len(), 5 + TAG_LEN);
        assert_eq!(a.iv.len(), NONCE_LEN);
        assert_ne!(a.iv, b.iv);
        assert_ne!(a.data, b.data);
    }

    #[test]
    fn open_rejects_truncated_nonce() {
        let cipher = test_cipher();
        let mut envelope = seal(&cipher, b"{}").unwrap();
        envelope.iv.pop();
        assert!(matches!(open(&cipher, &envelope), Err(VaultError::InvalidEnvelope { .. })));
    }

    #[test]
    fn open_rejects_flipped_bit() {
        let cipher = test_cipher();
        let mut envelope = seal(&cipher, b"{\"k\":1}").unwrap();
        envelope.data[0] ^= 0x01;
        assert!(matches!(open(&cipher, &envelope), Err(VaultError::Decryption { .. })));
    }

    #[test]
    fn open_rejects_data_shorter_than_tag() {
        let cipher = test_cipher();
        let envelope = Envelope { data: vec![0; TAG_LEN - 1], iv: vec![0; NONCE_LEN] };
        assert!(matches!(open(&cipher, &envelope), Err(VaultError::InvalidEnvelope { .. })));
    }

    #[test]
    fn empty_plaintext_round_trips() {
        let cipher = test_cipher();
        let envelope = seal(&cipher, b"").unwrap();
        assert_eq!(open(&cipher, &envelope).unwrap(), b"");
    }
}
