//! # Vault Errors
//!
//! [`VaultError::is_crypto`] separates failures caused by a stored envelope, which the
//! pattern store answers by starting empty, from problems with the key or the key store,
//! which must reach the caller.

use std::borrow::Cow;

#[sfa_derive::sfa_error]
pub enum VaultError {
    /// The AEAD primitive refused to encrypt or the system RNG was unavailable.
    #[error("Encryption error{}: {message}", format_context(.context))]
    Encryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Authentication failed: wrong key, tampered or corrupted ciphertext.
    #[error("Decryption error{}: {message}", format_context(.context))]
    Decryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The envelope is structurally unusable (nonce or ciphertext length).
    #[error("Invalid envelope{}: {message}", format_context(.context))]
    InvalidEnvelope { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The stored key cannot be imported.
    #[error("Invalid key material{}: {message}", format_context(.context))]
    KeyMaterial { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Plaintext could not be encoded to or decoded from JSON.
    #[error("Serialization error{}: {source}", format_context(.context))]
    Serialization { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// The key store failed; not a crypto failure.
    #[error("Key storage error{}: {source}", format_context(.context))]
    Storage { source: sfa_storage::StorageError, context: Option<Cow<'static, str>> },

    #[error("Internal vault error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl VaultError {
    /// `true` for failures caused by the stored envelope rather than by the key or the key
    /// store. An unimportable key is not one: discarding data over it would lose values that
    /// the right key still opens.
    #[must_use]
    pub const fn is_crypto(&self) -> bool {
        !matches!(self, Self::KeyMaterial { .. } | Self::Storage { .. } | Self::Internal { .. })
    }
}
