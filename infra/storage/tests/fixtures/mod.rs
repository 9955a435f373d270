use sfa_storage::{Compression, FileStore};
use tempfile::TempDir;

pub async fn file_store(compression: Compression) -> (TempDir, FileStore) {
    let temp = TempDir::new().expect("temp dir");
    let store = FileStore::builder()
        .root(temp.path().join("store"))
        .compression(compression)
        .connect()
        .await
        .expect("store should open");
    (temp, store)
}
