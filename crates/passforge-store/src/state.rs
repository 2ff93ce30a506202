//! Persistent key-value state.
//!
//! [`PersistentState`] is the collaborator the history and options stores
//! are written against. Two backends ship here:
//! - [`MemoryState`] — both locations in process memory
//! - [`JsonFileState`] — disk location as one JSON file per scope, memory
//!   location in process

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::StoreError;

// ── Storage options ────────────────────────────────────────────────

/// Where a value lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageLocation {
    /// Survives restarts. Only ever holds encrypted secrets.
    Disk,
    /// Process lifetime only. Holds decrypted caches.
    Memory,
}

/// Scope and location of a state access.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageOptions {
    /// Account or profile the value belongs to.
    pub scope: String,
    /// Disk or memory.
    pub location: StorageLocation,
}

impl StorageOptions {
    /// Disk location in `scope`.
    #[must_use]
    pub fn disk(scope: &str) -> Self {
        Self {
            scope: scope.to_string(),
            location: StorageLocation::Disk,
        }
    }

    /// Memory location in `scope`.
    #[must_use]
    pub fn memory(scope: &str) -> Self {
        Self {
            scope: scope.to_string(),
            location: StorageLocation::Memory,
        }
    }
}

// ── Collaborator trait ─────────────────────────────────────────────

/// Scoped JSON key-value storage.
pub trait PersistentState {
    /// Read `key`; `None` when it was never set or has been removed.
    ///
    /// # Errors
    ///
    /// Backend-specific; see the implementation.
    fn get(&self, key: &str, options: &StorageOptions) -> Result<Option<Value>, StoreError>;

    /// Write `key`. Setting `None` removes it.
    ///
    /// # Errors
    ///
    /// Backend-specific; see the implementation.
    fn set(
        &mut self,
        key: &str,
        value: Option<Value>,
        options: &StorageOptions,
    ) -> Result<(), StoreError>;
}

impl<T: PersistentState + ?Sized> PersistentState for &mut T {
    fn get(&self, key: &str, options: &StorageOptions) -> Result<Option<Value>, StoreError> {
        (**self).get(key, options)
    }

    fn set(
        &mut self,
        key: &str,
        value: Option<Value>,
        options: &StorageOptions,
    ) -> Result<(), StoreError> {
        (**self).set(key, value, options)
    }
}

// ── In-memory backend ──────────────────────────────────────────────

/// [`PersistentState`] kept entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryState {
    buckets: HashMap<StorageOptions, HashMap<String, Value>>,
}

impl MemoryState {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistentState for MemoryState {
    fn get(&self, key: &str, options: &StorageOptions) -> Result<Option<Value>, StoreError> {
        Ok(self
            .buckets
            .get(options)
            .and_then(|bucket| bucket.get(key))
            .cloned())
    }

    fn set(
        &mut self,
        key: &str,
        value: Option<Value>,
        options: &StorageOptions,
    ) -> Result<(), StoreError> {
        match value {
            Some(value) => {
                self.buckets
                    .entry(options.clone())
                    .or_default()
                    .insert(key.to_string(), value);
            }
            None => {
                if let Some(bucket) = self.buckets.get_mut(options) {
                    bucket.remove(key);
                }
            }
        }
        Ok(())
    }
}

// ── JSON file backend ──────────────────────────────────────────────

/// [`PersistentState`] whose disk location is `{data_dir}/{scope}.json`.
///
/// Each scope file is a pretty-printed JSON object of key to value. A
/// missing file reads as empty; an unreadable one is an error for both
/// reads and writes and stays on disk untouched. Writes are atomic (write to
/// `.tmp`, restrict to owner-only on Unix, rename). Memory-location values
/// never touch the filesystem.
#[derive(Debug)]
pub struct JsonFileState {
    data_dir: PathBuf,
    memory: MemoryState,
}

impl JsonFileState {
    /// Store files under `data_dir`, which must already exist.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            memory: MemoryState::new(),
        }
    }

    /// Path of the file backing `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if `scope` is empty, starts with a
    /// dot, or contains characters outside `[A-Za-z0-9_.-]`.
    pub fn scope_path(&self, scope: &str) -> Result<PathBuf, StoreError> {
        let valid = !scope.is_empty()
            && !scope.starts_with('.')
            && scope
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(StoreError::Storage(format!("invalid scope name: {scope:?}")));
        }
        Ok(self.data_dir.join(format!("{scope}.json")))
    }

    fn load_scope(&self, scope: &str) -> Result<BTreeMap<String, Value>, StoreError> {
        let path = self.scope_path(scope)?;
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err.into()),
        };
        // The scope file also carries the encrypted history; it is never
        // rewritten from a partial read.
        serde_json::from_str(&contents).map_err(|err| {
            tracing::warn!(path = %path.display(), error = %err, "unreadable state file left in place");
            StoreError::Serialization(err)
        })
    }

    fn save_scope(&self, scope: &str, values: &BTreeMap<String, Value>) -> Result<(), StoreError> {
        let path = self.scope_path(scope)?;
        let tmp = self.data_dir.join(format!(".{scope}.json.tmp"));

        let json = serde_json::to_string_pretty(values)?;
        fs::write(&tmp, &json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

impl PersistentState for JsonFileState {
    fn get(&self, key: &str, options: &StorageOptions) -> Result<Option<Value>, StoreError> {
        match options.location {
            StorageLocation::Memory => self.memory.get(key, options),
            StorageLocation::Disk => Ok(self.load_scope(&options.scope)?.remove(key)),
        }
    }

    fn set(
        &mut self,
        key: &str,
        value: Option<Value>,
        options: &StorageOptions,
    ) -> Result<(), StoreError> {
        if options.location == StorageLocation::Memory {
            return self.memory.set(key, value, options);
        }

        let mut values = self.load_scope(&options.scope)?;
        let changed = match value {
            Some(value) => {
                values.insert(key.to_string(), value);
                true
            }
            None => values.remove(key).is_some(),
        };
        if changed {
            self.save_scope(&options.scope, &values)?;
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────
