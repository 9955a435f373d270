//! Directory-backed [`KeyValueStore`] with atomic replacement of values.
//!
//! Every key maps to one file `<root>/<key>.kv`. Writes go to a unique temporary sibling
//! first, are synced to disk and then renamed over the target, so a crash never leaves a
//! half-written value behind.

use crate::builder::FileStoreBuilder;
use crate::error::{StorageError, StorageErrorExt};
use crate::key::KeyName;
use crate::maintenance;
use crate::store::KeyValueStore;
use std::io::ErrorKind;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

pub(crate) const VALUE_EXTENSION: &str = "kv";
pub(crate) const TMP_MARKER: &str = ".sfatmp.";

/// Prefix of every LZ4-encoded file. Plain values never start with a NUL byte.
const LZ4_MAGIC: &[u8; 4] = b"\0LZ4";

/// Encoding used for new writes.
///
/// Reads decode by the file's own prefix, so a root written under one mode stays readable
/// after switching to the other.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Compression {
    #[default]
    None,
    /// LZ4 block format behind a `\0LZ4` marker, with the uncompressed size prepended.
    Lz4,
}

impl Compression {
    fn compress(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::None => data.to_vec(),
            Self::Lz4 => {
                let mut out = LZ4_MAGIC.to_vec();
                out.extend(lz4_flex::compress_prepend_size(data));
                out
            },
        }
    }

    fn decompress(data: Vec<u8>) -> Result<Vec<u8>, StorageError> {
        match data.strip_prefix(LZ4_MAGIC) {
            Some(packed) => {
                lz4_flex::decompress_size_prepended(packed).context("Lz4 decompression failed")
            },
            None => Ok(data),
        }
    }
}

#[derive(Debug)]
pub struct FileStoreInner {
    pub(crate) root: PathBuf,
    pub(crate) compression: Compression,
    pub(crate) tmp_counter: AtomicU64,
}

/// A cheaply cloneable handle to a directory-backed key-value store.
///
/// ```rust
/// use sfa_storage::{FileStore, KeyValueStore, StorageError};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), StorageError> {
///     # let tmp = tempfile::tempdir().unwrap();
///     let store = FileStore::builder().root(tmp.path().join("data")).connect().await?;
///
///     store.set("enabled", b"true").await?;
///     assert_eq!(store.get("enabled").await?.as_deref(), Some(&b"true"[..]));
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    pub(crate) inner: Arc<FileStoreInner>,
}

impl Deref for FileStore {
    type Target = FileStoreInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FileStore {
    #[must_use = "The store is not opened until you call .connect()"]
    pub fn builder() -> FileStoreBuilder {
        FileStoreBuilder::new()
    }

    /// The canonical directory holding the values.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Physical path of the file that backs `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] if `key` is not a valid [`KeyName`].
    pub fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        let key = KeyName::try_from(key)?;
        Ok(self.root.join(format!("{key}.{VALUE_EXTENSION}")))
    }

    /// Keys currently stored, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the root directory cannot be listed.
    pub async fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        for path in self.value_files().await? {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_owned());
            }
        }
        keys.sort_unstable();
        Ok(keys)
    }

    /// Removes temporary files abandoned by interrupted writes.
    pub async fn purge_tmp(&self) {
        maintenance::purge_tmp(&self.root).await;
    }

    async fn value_files(&self) -> Result<Vec<PathBuf>, StorageError> {
        let mut entries = fs::read_dir(&self.root)
            .await
            .context(format!("Failed to list {}", self.root.display()))?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.context("Failed to read entry")? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some(VALUE_EXTENSION)
                && entry.file_type().await.is_ok_and(|t| t.is_file())
            {
                files.push(path);
            }
        }
        Ok(files)
    }

    async fn write_atomic(&self, target: &Path, data: &[u8]) -> Result<(), StorageError> {
        let temp = unique_tmp_path(target, &self.tmp_counter);
        let encoded = self.compression.compress(data);

        {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .await
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(&encoded).await.context("Write failed")?;
            file.sync_all().await.context("Hardware sync failed")?;
        }

        if let Err(err) = fs::rename(&temp, target).await {
            if err.kind() != ErrorKind::AlreadyExists {
                let _ = fs::remove_file(&temp).await;
                return Err(StorageError::Io {
                    source: err,
                    context: Some(
                        format!("Atomic swap failed: {} -> {}", temp.display(), target.display())
                            .into(),
                    ),
                });
            }
            fs::remove_file(target)
                .await
                .context(format!("Failed to replace existing file: {}", target.display()))?;
            fs::rename(&temp, target).await.context(format!(
                "Atomic swap failed: {} -> {}",
                temp.display(),
                target.display()
            ))?;
        }

        sync_dir(&self.root).await;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.resolve(key)?;
        match fs::read(&path).await {
            Ok(data) => Compression::decompress(data).map(Some),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io {
                source: err,
                context: Some(format!("Read failed: {}", path.display()).into()),
            }),
        }
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let path = self.resolve(key)?;
        self.write_atomic(&path, value).await?;
        debug!(key, bytes = value.len(), "Value stored");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.resolve(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "Value removed");
                Ok(())
            },
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io {
                source: err,
                context: Some(format!("Failed to delete: {}", path.display()).into()),
            }),
        }
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let files = self.value_files().await?;
        let removed = files.len();
        for path in files {
            match fs::remove_file(&path).await {
                Ok(()) => {},
                Err(err) if err.kind() == ErrorKind::NotFound => {},
                Err(err) => {
                    return Err(StorageError::Io {
                        source: err,
                        context: Some(format!("Failed to delete: {}", path.display()).into()),
                    });
                },
            }
        }
        sync_dir(&self.root).await;
        debug!(removed, root = %self.root.display(), "Store cleared");
        Ok(())
    }
}

async fn sync_dir(path: &Path) {
    match fs::File::open(path).await {
        Ok(dir) => {
            if let Err(err) = dir.sync_all().await {
                tracing::warn!(path = %path.display(), error = %err, "Directory sync failed");
            }
        },
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "Directory open failed");
        },
    }
}

fn unique_tmp_path(target: &Path, counter: &AtomicU64) -> PathBuf {
    let n = counter.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("value");
    target.with_file_name(format!("{file_name}{TMP_MARKER}{}.{n}", std::process::id()))
}
