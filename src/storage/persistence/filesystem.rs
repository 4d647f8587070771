//! JSON-file document store.
//!
//! All tables live in one pretty-printed JSON object:
//!
//! ```json
//! {
//!     "players": {
//!         "1": { "id": 1, "firstname": "Judit", ... }
//!     },
//!     "tournaments": {}
//! }
//! ```
//!
//! The whole file is loaded on open and rewritten after every upsert.

use super::{Tables, list_table, lock_tables};
use crate::models::EntityId;
use crate::storage::traits::DocumentStore;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Maximum size of the document file (64MB).
const MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Document store backed by a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    /// Location of the document file.
    path: PathBuf,
    /// Loaded tables.
    tables: Mutex<Tables>,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading existing tables.
    ///
    /// A missing or empty file is an empty store; the file and its parent
    /// directories are created on the first write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a
    /// valid document file.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let tables = Self::load(&path)?;
        tracing::debug!(
            path = %path.display(),
            tables = tables.len(),
            "Opened document store"
        );
        Ok(Self {
            path,
            tables: Mutex::new(tables),
        })
    }

    /// Returns the path of the document file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<Tables> {
        if !path.exists() {
            return Ok(Tables::new());
        }

        let metadata = fs::metadata(path).map_err(|e| Error::OperationFailed {
            operation: "read_store_metadata".to_string(),
            cause: e.to_string(),
        })?;

        if metadata.len() > MAX_FILE_SIZE {
            return Err(Error::OperationFailed {
                operation: "read_store".to_string(),
                cause: format!(
                    "{} exceeds maximum size of {MAX_FILE_SIZE} bytes",
                    path.display()
                ),
            });
        }

        let contents = fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_store".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        if contents.trim().is_empty() {
            return Ok(Tables::new());
        }

        serde_json::from_str(&contents).map_err(|e| Error::OperationFailed {
            operation: "parse_store".to_string(),
            cause: format!("{}: {e}", path.display()),
        })
    }

    fn persist(&self, tables: &Tables) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::OperationFailed {
                operation: "create_store_dir".to_string(),
                cause: e.to_string(),
            })?;
        }

        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        tables
            .serialize(&mut serializer)
            .map_err(|e| Error::OperationFailed {
                operation: "serialize_store".to_string(),
                cause: e.to_string(),
            })?;

        fs::write(&self.path, buf).map_err(|e| Error::OperationFailed {
            operation: "write_store".to_string(),
            cause: format!("{}: {e}", self.path.display()),
        })
    }
}

impl DocumentStore for JsonFileStore {
    fn all(&self, table: &str) -> Result<Vec<(EntityId, Value)>> {
        let tables = lock_tables(&self.tables)?;
        Ok(list_table(&tables, table))
    }

    fn upsert(&self, table: &str, id: EntityId, document: Value) -> Result<()> {
        let mut tables = lock_tables(&self.tables)?;
        // Only a written document becomes visible.
        let mut updated = tables.clone();
        updated.entry(table.to_string()).or_default().insert(id, document);
        self.persist(&updated)?;
        *tables = updated;
        tracing::debug!(table, %id, path = %self.path.display(), "Upserted document");
        Ok(())
    }

    fn last_id(&self, table: &str) -> Result<Option<EntityId>> {
        let tables = lock_tables(&self.tables)?;
        Ok(tables
            .get(table)
            .and_then(|docs| docs.keys().next_back().copied()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("db.json")).unwrap();
        assert!(store.all("players").unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_open_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, "").unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.count("players").unwrap(), 0);
    }

    #[test]
    fn test_open_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(err, Error::OperationFailed { ref operation, .. } if operation == "parse_store"));
    }

    #[test]
    fn test_upsert_writes_through_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("db.json");
        let store = JsonFileStore::open(&path).unwrap();

        store
            .upsert("players", EntityId::new(1), json!({"id": 1, "lastname": "Polgar"}))
            .unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        let docs = reopened.all("players").unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].0, EntityId::new(1));
        assert_eq!(docs[0].1["lastname"], json!("Polgar"));
    }

    #[test]
    fn test_file_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        let store = JsonFileStore::open(&path).unwrap();
        store.upsert("players", EntityId::new(2), json!({"id": 2})).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\n    \"players\": {"));
        assert!(raw.contains("\"2\": {"));
    }

    #[test]
    fn test_upsert_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        let store = JsonFileStore::open(&path).unwrap();
        store
            .upsert("players", EntityId::new(1), json!({"id": 1, "rank": 9}))
            .unwrap();
        store
            .upsert("players", EntityId::new(1), json!({"id": 1, "rank": 3}))
            .unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.count("players").unwrap(), 1);
        assert_eq!(
            reopened.get("players", EntityId::new(1)).unwrap(),
            Some(json!({"id": 1, "rank": 3}))
        );
        assert_eq!(reopened.last_id("players").unwrap(), Some(EntityId::new(1)));
    }

    #[test]
    fn test_failed_write_leaves_store_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        let store = JsonFileStore::open(&path).unwrap();
        store.upsert("players", EntityId::new(1), json!({"id": 1})).unwrap();

        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        let err = store
            .upsert("players", EntityId::new(2), json!({"id": 2}))
            .unwrap_err();
        assert!(matches!(err, Error::OperationFailed { ref operation, .. } if operation == "write_store"));
        assert_eq!(store.last_id("players").unwrap(), Some(EntityId::new(1)));
        assert_eq!(store.count("players").unwrap(), 1);
        assert!(store.all("tournaments").unwrap().is_empty());
    }
}
