use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use tracing::debug;

use crate::utils::paths::{self, write_atomic};

use super::{KeyValueStore, Result};

/// Key/value store persisted as a single JSON object file.
///
/// Every `set` rewrites the whole file through a temporary sibling, so a
/// crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store at `store.json` inside `base`.
    pub fn in_dir(base: &Path) -> Result<Self> {
        paths::ensure_dir(base)?;
        Ok(Self::new(paths::store_file_in(base)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&data)?)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.read_entries()?;
        Ok(entries.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&entries)?;
        write_atomic(&self.path, &json)?;
        debug!(key, path = %self.path.display(), "store entry written");
        Ok(())
    }
}
