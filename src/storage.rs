//! Origin-scoped persistent key-value store.
//!
//! Each origin gets one JSON object file, `<dir>/<sanitized origin>.json`.
//! Writes go through to disk immediately via a temp file and rename, so a
//! crash never leaves a half-written store behind.
//!
//! Stores are process-wide: every `open` of the same backing file returns
//! the same shared instance.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::RwLock;

use crate::error::{HostError, HostResult};
use crate::utils::path::{join_segments, sanitize_file_name};

/// Open stores keyed by their absolute backing file.
static STORES: LazyLock<DashMap<PathBuf, Arc<LocalStorage>>> = LazyLock::new(DashMap::new);

/// Persistent string map for one origin.
#[derive(Debug)]
pub struct LocalStorage {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl LocalStorage {
    /// Open the store for `origin` under `dir`. A missing file is an empty store.
    pub fn open(dir: &Path, origin: &str) -> HostResult<Arc<Self>> {
        let path = store_file(dir, origin)?;
        match STORES.entry(path) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let store = Arc::new(Self::load(entry.key().clone())?);
                entry.insert(Arc::clone(&store));
                Ok(store)
            }
        }
    }

    fn load(path: PathBuf) -> HostResult<Self> {
        let entries = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| HostError::Json(path.clone(), e))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(HostError::io(&path, e)),
        };

        crate::debug!("storage"; "{} ({} keys)", path.display(), entries.len());
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    pub fn set(&self, key: &str, value: &str) -> HostResult<()> {
        let mut entries = self.entries.write();
        let previous = entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist(&entries) {
            // Keep memory and disk in agreement
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    /// Returns whether the key existed.
    pub fn remove(&self, key: &str) -> HostResult<bool> {
        let mut entries = self.entries.write();
        let Some(old) = entries.remove(key) else {
            return Ok(false);
        };
        if let Err(e) = self.persist(&entries) {
            entries.insert(key.to_string(), old);
            return Err(e);
        }
        Ok(true)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> HostResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| HostError::io(parent, e))?;
        }

        let json = serde_json::to_vec_pretty(entries).map_err(|e| HostError::Json(self.path.clone(), e))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| HostError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| HostError::io(&self.path, e))
    }
}

/// Absolute, lexically normalized backing file for `origin`.
fn store_file(dir: &Path, origin: &str) -> HostResult<PathBuf> {
    let file = format!("{}.json", sanitize_file_name(origin));
    let dir = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir().map_err(|e| HostError::io(".", e))?.join(dir)
    };
    Ok(join_segments([dir, PathBuf::from(file)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let store = LocalStorage::open(dir.path(), "app://notes").unwrap();
        assert!(store.is_empty());
        store.set("theme", "dark").unwrap();
        store.set("font", "mono").unwrap();
        drop(store);

        let store = LocalStorage::open(dir.path(), "app://notes").unwrap();
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
        assert_eq!(store.keys(), ["font", "theme"]);

        let on_disk: BTreeMap<String, String> =
            serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(on_disk.get("font").map(String::as_str), Some("mono"));
    }

    #[test]
    fn test_handles_share_one_store() {
        let dir = TempDir::new().unwrap();
        let a = LocalStorage::open(dir.path(), "app://shared").unwrap();
        let b = LocalStorage::open(&dir.path().join("."), "app://shared").unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        a.set("theme", "dark").unwrap();
        b.set("font", "mono").unwrap();

        let reopened = LocalStorage::open(dir.path(), "app://shared").unwrap();
        assert_eq!(reopened.keys(), ["font", "theme"]);
        assert_eq!(reopened.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_origins_are_isolated() {
        let dir = TempDir::new().unwrap();
        let a = LocalStorage::open(dir.path(), "app://a").unwrap();
        let b = LocalStorage::open(dir.path(), "app://b").unwrap();
        a.set("k", "1").unwrap();

        assert_eq!(b.get("k"), None);
        assert_ne!(a.path(), b.path());
        assert_eq!(a.path().parent(), Some(dir.path()));
    }

    #[test]
    fn test_remove() {
        let dir = TempDir::new().unwrap();
        let store = LocalStorage::open(dir.path().join("nested").as_path(), "o").unwrap();
        store.set("k", "v").unwrap();
        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());

        let reopened = LocalStorage::open(dir.path().join("nested").as_path(), "o").unwrap();
        assert_eq!(reopened.len(), 0);
    }

    #[test]
    fn test_corrupt_file_malformed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("o.json"), "not json").unwrap();

        let err = LocalStorage::open(dir.path(), "o").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);

        // Failed opens are not cached
        fs::write(dir.path().join("o.json"), r#"{"k":"v"}"#).unwrap();
        let store = LocalStorage::open(dir.path(), "o").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }
}
