//! Preference store adapters
//!
//! `JsonFilePreferences` keeps every key in one flat JSON object on disk:
//! ```json
//! { "jwt_token": "...", "remember_me": true, "user_name": "Ada" }
//! ```
//! Each update rewrites the file through a temp file + rename, holding an
//! exclusive lock on a sidecar `.lock` file for the whole read-modify-write.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use fs2::FileExt;
use serde_json::{Map, Value as JsonValue};
use tempfile::NamedTempFile;

use crate::domain::result::{Error, Result};
use crate::ports::KeyValueStore;

/// Default preference file name inside the data directory
pub const PREFS_FILENAME: &str = "budget_prefs.json";

/// File-backed preference store
#[derive(Debug)]
pub struct JsonFilePreferences {
    path: PathBuf,
    lock_path: PathBuf,
}

impl JsonFilePreferences {
    /// Open (or lazily create) the preference file in `dir`
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).map_err(|e| {
            Error::storage(format!("Failed to create data directory {:?}: {}", dir, e))
        })?;

        Ok(Self {
            path: dir.join(PREFS_FILENAME),
            lock_path: dir.join(format!("{}.lock", PREFS_FILENAME)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<File> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)
            .map_err(|e| Error::storage(format!("Failed to open preference lock: {}", e)))?;
        file.lock_exclusive()
            .map_err(|e| Error::storage(format!("Failed to lock preferences: {}", e)))?;
        Ok(file)
    }

    fn read_all(&self) -> Result<Map<String, JsonValue>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| Error::storage(format!("Failed to read preferences: {}", e)))?;

        match serde_json::from_str::<JsonValue>(&content) {
            Ok(JsonValue::Object(map)) => Ok(map),
            _ => {
                tracing::warn!(path = ?self.path, "preference file is not a JSON object, starting empty");
                Ok(Map::new())
            }
        }
    }

    fn write_all(&self, map: &Map<String, JsonValue>) -> Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let content = serde_json::to_vec_pretty(map)?;

        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(|e| Error::storage(format!("Failed to create temp file: {}", e)))?;
        tmp.write_all(&content)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| Error::storage(format!("Failed to write preferences: {}", e)))?;
        tmp.persist(&self.path)
            .map_err(|e| Error::storage(format!("Failed to replace preferences: {}", e.error)))?;
        Ok(())
    }
}

impl KeyValueStore for JsonFilePreferences {
    fn get(&self, key: &str) -> Result<Option<JsonValue>> {
        let _guard = self.lock()?;
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, entries: &[(&str, JsonValue)]) -> Result<()> {
        let _guard = self.lock()?;
        let mut map = self.read_all()?;
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        self.write_all(&map)
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.lock()?;
        self.write_all(&Map::new())
    }
}

/// Process-local preference store
///
/// Used by tests and by callers that don't want anything written to disk.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<HashMap<String, JsonValue>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, JsonValue>>> {
        self.values
            .lock()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))
    }

    pub fn len(&self) -> usize {
        self.values().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<JsonValue>> {
        Ok(self.values()?.get(key).cloned())
    }

    fn set(&self, entries: &[(&str, JsonValue)]) -> Result<()> {
        let mut values = self.values()?;
        for (key, value) in entries {
            values.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.values()?.clear();
        Ok(())
    }
}
