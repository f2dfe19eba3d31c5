//! Local record store.
//!
//! A file-backed key-value store: each key is one JSON document inside a data
//! directory. It holds the equipment collection under [`EQUIPMENT_KEY`] and
//! the saved backend configuration under [`BACKEND_CONFIG_KEY`], standing in
//! for the remote database when none is configured or reachable.
//!
//! Writes are whole-document replacements staged through a temp file and a
//! rename, so each key write is atomic from the caller's perspective. The
//! store is scoped to a single server process; concurrent writers are not
//! serialized beyond that.

pub mod seed;

use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::AppResult;
use crate::models::Equipment;

/// Key holding the serialized equipment collection.
pub const EQUIPMENT_KEY: &str = "equipment_records";
/// Key holding the serialized backend configuration.
pub const BACKEND_CONFIG_KEY: &str = "backend_config";

/// File-backed key-value store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    /// Open (or create) the store at the given directory.
    pub fn open(dir: impl AsRef<Path>) -> AppResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        tracing::info!(path = %dir.display(), "opened record store");
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Read the document stored under `key`, or `None` if the key has never
    /// been written.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let path = self.path_for(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the document stored under `key`.
    pub async fn put<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        let bytes = serde_json::to_vec_pretty(value)?;
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Remove the document stored under `key`. Missing keys are ignored.
    pub async fn remove(&self, key: &str) -> AppResult<()> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// First-run initialization: install the built-in demo dataset iff the
    /// equipment key has never been written. Invoked once at startup so the
    /// read paths stay pure reads; never re-applied once any collection
    /// exists, even an empty one.
    pub async fn initialize(&self) -> AppResult<()> {
        if self.get::<Vec<Equipment>>(EQUIPMENT_KEY).await?.is_none() {
            tracing::info!("seeding record store with demo equipment");
            self.put(EQUIPMENT_KEY, &seed::demo_equipment()).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        let got: Option<Vec<Equipment>> = store.get("nothing").await.unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn test_put_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        store.put("k", &vec!["a".to_string()]).await.unwrap();
        let got: Option<Vec<String>> = store.get("k").await.unwrap();
        assert_eq!(got, Some(vec!["a".to_string()]));
    }

    #[tokio::test]
    async fn test_initialize_seeds_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();

        store.initialize().await.unwrap();
        let seeded: Vec<Equipment> = store.get(EQUIPMENT_KEY).await.unwrap().unwrap();
        assert!(!seeded.is_empty());

        // An explicitly emptied collection must survive re-initialization.
        store.put(EQUIPMENT_KEY, &Vec::<Equipment>::new()).await.unwrap();
        store.initialize().await.unwrap();
        let after: Vec<Equipment> = store.get(EQUIPMENT_KEY).await.unwrap().unwrap();
        assert!(after.is_empty());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        store.remove("ghost").await.unwrap();
    }
}
