//! Document store trait.

use crate::Result;
use crate::models::EntityId;
use serde_json::Value;

/// Trait for persistent document stores.
///
/// A store holds named tables of JSON documents keyed by integer document
/// id. It is the authoritative copy of every saved entity; repositories
/// read it once at startup and write to it only on explicit save.
pub trait DocumentStore: Send + Sync {
    /// Returns every document of `table`, ordered by ascending id.
    ///
    /// A table that was never written is empty.
    fn all(&self, table: &str) -> Result<Vec<(EntityId, Value)>>;

    /// Inserts or fully replaces the document stored under `id`.
    fn upsert(&self, table: &str, id: EntityId, document: Value) -> Result<()>;

    /// Returns the id of the last document of `table`.
    fn last_id(&self, table: &str) -> Result<Option<EntityId>> {
        Ok(self.all(table)?.last().map(|(id, _)| *id))
    }

    /// Retrieves one document.
    fn get(&self, table: &str, id: EntityId) -> Result<Option<Value>> {
        Ok(self
            .all(table)?
            .into_iter()
            .find_map(|(doc_id, doc)| (doc_id == id).then_some(doc)))
    }

    /// Returns the number of documents in `table`.
    fn count(&self, table: &str) -> Result<usize> {
        Ok(self.all(table)?.len())
    }
}
