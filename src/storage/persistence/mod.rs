//! Document store implementations.

mod filesystem;
mod memory;

pub use filesystem::JsonFileStore;
pub use memory::MemoryStore;

use crate::models::EntityId;
use crate::{Error, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Table name to documents keyed by id.
///
/// `BTreeMap` keeps both levels sorted, which gives ordered enumeration and
/// a stable on-disk layout.
pub(crate) type Tables = BTreeMap<String, BTreeMap<EntityId, Value>>;

/// Locks the shared tables, mapping a poisoned lock to an error.
pub(crate) fn lock_tables(tables: &Mutex<Tables>) -> Result<MutexGuard<'_, Tables>> {
    tables.lock().map_err(|e| Error::OperationFailed {
        operation: "lock_store".to_string(),
        cause: e.to_string(),
    })
}

/// Lists a table as ordered `(id, document)` pairs.
pub(crate) fn list_table(tables: &Tables, table: &str) -> Vec<(EntityId, Value)> {
    tables
        .get(table)
        .map(|docs| docs.iter().map(|(id, doc)| (*id, doc.clone())).collect())
        .unwrap_or_default()
}
