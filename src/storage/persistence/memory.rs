//! In-process document store.

use super::{Tables, list_table, lock_tables};
use crate::Result;
use crate::models::EntityId;
use crate::storage::traits::DocumentStore;
use serde_json::Value;
use std::sync::Mutex;

/// Document store that keeps everything in memory.
///
/// Used by tests and by `--db :memory:` sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn all(&self, table: &str) -> Result<Vec<(EntityId, Value)>> {
        let tables = lock_tables(&self.tables)?;
        Ok(list_table(&tables, table))
    }

    fn upsert(&self, table: &str, id: EntityId, document: Value) -> Result<()> {
        let mut tables = lock_tables(&self.tables)?;
        tables.entry(table.to_string()).or_default().insert(id, document);
        Ok(())
    }

    fn last_id(&self, table: &str) -> Result<Option<EntityId>> {
        let tables = lock_tables(&self.tables)?;
        Ok(tables
            .get(table)
            .and_then(|docs| docs.keys().next_back().copied()))
    }
}
