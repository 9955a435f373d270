use crate::error::StorageError;
use std::fmt;

const MAX_KEY_LEN: usize = 128;

/// A validated storage key.
///
/// Keys are ASCII alphanumeric plus `_`, `-` and `.`, must not start with `.` and are
/// case-preserving, so `encKey` and `learnedPatterns` keep their historical spelling.
/// The restricted alphabet also makes every key a safe single file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyName(String);

impl KeyName {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for KeyName {
    type Error = StorageError;

    fn try_from(value: &str) -> Result<Self, StorageError> {
        if value.is_empty() {
            return Err(StorageError::InvalidKey {
                message: "EMPTY".into(),
                context: Some("Key cannot be empty".into()),
            });
        }

        if value.len() > MAX_KEY_LEN {
            return Err(StorageError::InvalidKey {
                message: format!("{} bytes", value.len()).into(),
                context: Some("Key is too long".into()),
            });
        }

        if value.starts_with('.')
            || !value.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(StorageError::InvalidKey {
                message: value.to_owned().into(),
                context: Some("Key contains illegal characters".into()),
            });
        }

        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for KeyName {
    type Error = StorageError;

    fn try_from(value: String) -> Result<Self, StorageError> {
        Self::try_from(value.as_str())
    }
}

impl AsRef<str> for KeyName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
