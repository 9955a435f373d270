//! Encryption at rest for the autofill pattern store.
//!
//! [`CryptoVault`] owns one symmetric key per installation. The key is generated on first
//! use, exported as a JWK-like [`ExportedKey`] and stored in plain form under a key slot of
//! a [`sfa_storage::KeyValueStore`]; later runs import it from there.
//!
//! ## Envelope format
//!
//! Every value is JSON-encoded, then sealed with AES-256-GCM (default) or
//! ChaCha20-Poly1305 under a **fresh random 96-bit nonce**:
//!
//! ```text
//! { "data": [ciphertext..., tag(16)], "iv": [nonce(12)] }
//! ```
//!
//! No associated data is bound and no compression is applied.
//!
//! ## Failure modes
//!
//! Decryption distinguishes a broken envelope ([`VaultError::InvalidEnvelope`]) from failed
//! authentication ([`VaultError::Decryption`]); both are reported as errors, never as an
//! absent value. Losing the key is permanent data loss.

mod cipher;
mod engine;
mod error;
mod key;
mod types;

pub use cipher::{EnvelopeCipher, EnvelopeCipherExt};
pub use engine::{AnyVault, CryptoVault, DEFAULT_KEY_SLOT};
pub use error::{VaultError, VaultErrorExt};
pub use key::ExportedKey;
pub use types::{Aes, ChaCha, Envelope, KEY_LEN, NONCE_LEN, TAG_LEN, VaultCipher};
