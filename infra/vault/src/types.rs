use aead::{AeadInOut, KeyInit};
use aes_gcm::Aes256Gcm;
use chacha20poly1305::ChaCha20Poly1305;
use serde::{Deserialize, Serialize};

pub type Aes = Aes256Gcm;
pub type ChaCha = ChaCha20Poly1305;

/// 256-bit keys for both supported ciphers.
pub const KEY_LEN: usize = 32;
/// 96-bit nonces.
pub const NONCE_LEN: usize = 12;
/// 128-bit authentication tags.
pub const TAG_LEN: usize = 16;

mod private {
    pub trait Sealed {}
    impl Sealed for super::Aes {}
    impl Sealed for super::ChaCha {}
}

/// An AEAD cipher the vault can hold.
///
/// `ALG` is written into the exported key so a key generated for one cipher is never
/// imported for the other.
pub trait VaultCipher: AeadInOut + KeyInit + Send + Sync + 'static + private::Sealed {
    const ALG: &'static str;
}

impl VaultCipher for Aes {
    const ALG: &'static str = "A256GCM";
}

impl VaultCipher for ChaCha {
    const ALG: &'static str = "C20P";
}

/// Encrypted form of one value, persisted as `{"data": [..], "iv": [..]}`.
///
/// `data` is the ciphertext followed by the 16-byte tag; `iv` is the 12-byte nonce drawn
/// fresh for every encryption.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub data: Vec<u8>,
    pub iv: Vec<u8>,
}

impl std::fmt::Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("data_len", &self.data.len())
            .field("iv_len", &self.iv.len())
            .finish()
    }
}
