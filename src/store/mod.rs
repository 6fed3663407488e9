//! Key/value durability for the catalog, ledger, and session marker.
//!
//! The store is a cache, not a system of record: callers get their result
//! back before durability is guaranteed, and a failed write degrades to
//! "changes may not survive a restart" rather than aborting the operation.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Injected persistence capability. `save` is fire-and-forget: errors are
/// logged and swallowed so they can never corrupt in-memory state.
pub trait KeyValueStore: Send + Sync {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str);
}

/// One JSON file per key under a data directory. Writes go through a temp
/// file and a rename so a crash mid-write leaves the previous value intact.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(e) = fs::create_dir_all(&dir) {
            tracing::warn!(dir = %dir.display(), error = %e, "could not create data directory");
        }
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn write_atomic(&self, path: &Path, value: &str) -> io::Result<()> {
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, path)
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(key, path = %path.display(), error = %e, "failed to read persisted state");
                None
            }
        }
    }

    fn save(&self, key: &str, value: &str) {
        let path = self.path_for(key);
        if let Err(e) = self.write_atomic(&path, value) {
            tracing::warn!(key, path = %path.display(), error = %e, "persistence write failed; state kept in memory only");
        }
    }
}

/// HashMap-backed store for tests and ephemeral runs.
#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn save(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_a_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path());

        assert_eq!(store.load("ems_events"), None);
        store.save("ems_events", "[1,2,3]");
        assert_eq!(store.load("ems_events").as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn file_store_overwrites_in_place() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path());

        store.save("slot", "old");
        store.save("slot", "new");
        assert_eq!(store.load("slot").as_deref(), Some("new"));
    }

    #[test]
    fn file_store_save_failure_does_not_panic() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path().join("missing"));
        std::fs::remove_dir_all(dir.path().join("missing")).ok();

        // Directory is gone; the write fails and is swallowed.
        store.save("slot", "value");
        assert_eq!(store.load("slot"), None);
    }

    #[test]
    fn memory_store_round_trips_a_value() {
        let store = InMemoryStore::new();
        assert_eq!(store.load("k"), None);
        store.save("k", "v");
        assert_eq!(store.load("k").as_deref(), Some("v"));
    }
}
