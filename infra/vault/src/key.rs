use crate::error::VaultError;
use crate::types::{KEY_LEN, VaultCipher};
use aead::Key;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

const KEY_TYPE: &str = "oct";

/// Transportable form of the symmetric key, shaped like a JSON Web Key.
///
/// ```json
/// {"kty":"oct","alg":"A256GCM","k":"<base64url>","ext":true,"key_ops":["encrypt","decrypt"]}
/// ```
///
/// This value is stored unencrypted. Whoever can read it can read every learned value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct ExportedKey {
    pub kty: String,
    pub alg: String,
    pub k: String,
    #[serde(default = "default_ext")]
    pub ext: bool,
    #[serde(default)]
    pub key_ops: Vec<String>,
}

const fn default_ext() -> bool {
    true
}

impl std::fmt::Debug for ExportedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportedKey")
            .field("kty", &self.kty)
            .field("alg", &self.alg)
            .field("k", &"<redacted>")
            .field("key_ops", &self.key_ops)
            .finish_non_exhaustive()
    }
}

/// Raw key bytes, wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct KeyMaterial([u8; KEY_LEN]);

impl KeyMaterial {
    pub(crate) fn generate() -> Result<Self, VaultError> {
        let mut bytes = [0u8; KEY_LEN];
        getrandom::fill(&mut bytes).map_err(|e| VaultError::Encryption {
            message: e.to_string().into(),
            context: Some("System RNG unavailable for key generation".into()),
        })?;
        Ok(Self(bytes))
    }

    pub(crate) fn export<C: VaultCipher>(&self) -> ExportedKey {
        ExportedKey {
            kty: KEY_TYPE.to_owned(),
            alg: C::ALG.to_owned(),
            k: URL_SAFE_NO_PAD.encode(&self.0),
            ext: true,
            key_ops: vec!["encrypt".to_owned(), "decrypt".to_owned()],
        }
    }

    pub(crate) fn import<C: VaultCipher>(exported: &ExportedKey) -> Result<Self, VaultError> {
        if exported.kty != KEY_TYPE {
            return Err(VaultError::KeyMaterial {
                message: format!("unsupported key type '{}'", exported.kty).into(),
                context: None,
            });
        }

        if exported.alg != C::ALG {
            return Err(VaultError::KeyMaterial {
                message: format!("key is for '{}', vault uses '{}'", exported.alg, C::ALG).into(),
                context: None,
            });
        }

        let decoded =
            Zeroizing::new(URL_SAFE_NO_PAD.decode(exported.k.as_bytes()).map_err(|e| {
                VaultError::KeyMaterial {
                    message: e.to_string().into(),
                    context: Some("Key is not base64url".into()),
                }
            })?);

        let bytes: [u8; KEY_LEN] =
            decoded.as_slice().try_into().map_err(|_| VaultError::KeyMaterial {
                message: format!("Invalid key length {}, must be {KEY_LEN} bytes", decoded.len())
                    .into(),
                context: None,
            })?;

        Ok(Self(bytes))
    }

    pub(crate) fn cipher<C: VaultCipher>(&self) -> Result<C, VaultError> {
        let key = Key::<C>::try_from(&self.0[..]).map_err(|_| VaultError::KeyMaterial {
            message: format!("Invalid key length {}, must be {KEY_LEN} bytes", self.0.len())
                .into(),
            context: Some(C::ALG.into()),
        })?;
        Ok(C::new(&key))
    }
}
