//! Preference Store: client-side persistent key/value storage.
//!
//! Two backends: an in-memory map (which can also simulate storage that
//! refuses access, as in private browsing) and a SQLite table.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rusqlite::{params, OptionalExtension};
use tracing::{debug, warn};

use crate::database::Database;
use crate::platform;
use crate::types::errors::StorageError;

/// Trait defining the storage interface used by the theme controller.
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl PreferenceStore for Box<dyn PreferenceStore> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// In-memory store. Counts writes so callers can assert on storage traffic.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    available: bool,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            available: true,
            writes: 0,
        }
    }

    /// A store whose every read and write fails.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Seeds a value without counting it as a write.
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable("storage access denied".to_string()));
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable("storage access denied".to_string()));
        }
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// SQLite-backed store using the `preferences` table.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        Ok(Self {
            db: Database::open(path)?,
        })
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self {
            db: Database::open_in_memory()?,
        })
    }
}

impl PreferenceStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .db
            .connection()
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let now = chrono::Utc::now().timestamp();
        self.db.connection().execute(
            "INSERT INTO preferences (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    }
}

/// Opens the store named on the command line: `memory`, a SQLite file path,
/// or the platform default when `None`. Falls back to a session-only memory
/// store when the database cannot be opened.
pub fn open_configured_store(location: Option<&str>) -> Box<dyn PreferenceStore> {
    let path = match location {
        Some("memory") => return Box::new(MemoryStore::new()),
        Some(path) => PathBuf::from(path),
        None => platform::default_store_path(),
    };
    match open_sqlite_at(&path) {
        Ok(store) => {
            debug!(path = %path.display(), "preference store opened");
            Box::new(store)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "preference store unavailable, preferences last for this session only");
            Box::new(MemoryStore::new())
        }
    }
}

fn open_sqlite_at(path: &Path) -> Result<SqliteStore, StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StorageError::Unavailable(e.to_string()))?;
    }
    SqliteStore::open(path)
}
