//! Generic entity repository.
//!
//! A [`Repository`] owns every entity of one type. It keeps them in an
//! in-memory cache and writes them back to its [`DocumentStore`] table only
//! when asked to (`save_item`, or `create` with `save = true`).
//!
//! Ids are allocated from the store, not from the cache: `next_id` returns
//! the last *persisted* id plus one. An entity created without saving keeps
//! its id in the cache, but the next allocation hands out the same id again.

use crate::models::{Entity, EntityId, Fields};
use crate::storage::traits::DocumentStore;
use crate::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Cache of one entity type, backed by a document table.
pub struct Repository<T: Entity> {
    /// Cached entities by id.
    items: HashMap<EntityId, T>,
    /// Ids in the order they first entered the cache.
    order: Vec<EntityId>,
    /// Backing store, shared with the other repositories.
    store: Arc<dyn DocumentStore>,
    /// Table holding this entity type.
    table: String,
}

impl<T: Entity> Repository<T> {
    /// Opens the repository and loads every persisted document.
    ///
    /// Each document is rebuilt with the id it was stored under.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or a stored document
    /// cannot be rebuilt into an entity.
    pub fn open(store: Arc<dyn DocumentStore>) -> Result<Self> {
        let table = T::table();
        let mut repository = Self {
            items: HashMap::new(),
            order: Vec::new(),
            store,
            table,
        };

        for (doc_id, document) in repository.store.all(&repository.table)? {
            let Value::Object(mut fields) = document else {
                return Err(Error::InvalidEntity {
                    kind: T::KIND,
                    cause: format!("document {doc_id} is not an object"),
                });
            };
            fields.entry("id").or_insert_with(|| doc_id.into());
            repository.create(fields, false)?;
        }

        tracing::debug!(
            table = %repository.table,
            count = repository.items.len(),
            "Loaded repository"
        );
        Ok(repository)
    }

    /// Builds an entity from `fields` and caches it.
    ///
    /// Without an `id` field, the next id is allocated (see
    /// [`next_id`](Self::next_id)). An existing id replaces the cached
    /// entity. With `save`, the entity is persisted immediately.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEntity`] if the fields do not build an entity
    /// or the id is zero, or a store error if saving fails.
    pub fn create(&mut self, mut fields: Fields, save: bool) -> Result<&T> {
        if !fields.contains_key("id") {
            fields.insert("id".to_string(), self.next_id()?.into());
        }

        let item = T::from_fields(fields)?;
        let id = item.id();
        if id.get() == 0 {
            return Err(Error::InvalidEntity {
                kind: T::KIND,
                cause: "id must be a positive integer".to_string(),
            });
        }

        if self.items.insert(id, item).is_none() {
            self.order.push(id);
        }
        tracing::debug!(table = %self.table, %id, save, "Cached entity");

        if save {
            self.save_item(id)?;
        }
        self.search_by_id(id)
    }

    /// Returns the id following the last persisted document, or 1.
    ///
    /// The in-memory cache is not consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read, or
    /// [`Error::InvalidEntity`] if the last id is `u64::MAX`.
    pub fn next_id(&self) -> Result<EntityId> {
        match self.store.last_id(&self.table)? {
            None => Ok(EntityId::FIRST),
            Some(last) => last.next().ok_or_else(|| Error::InvalidEntity {
                kind: T::KIND,
                cause: format!("no id left after {last}"),
            }),
        }
    }

    /// Returns cached entities matching `filter`, sorted by `sort_key`.
    ///
    /// `repository.search(|_| true, Entity::id)` lists everything by id.
    /// The store is never read.
    pub fn search<P, K, F>(&self, filter: P, sort_key: F) -> Vec<T>
    where
        P: Fn(&T) -> bool,
        K: Ord,
        F: FnMut(&T) -> K,
    {
        let mut found: Vec<T> = self.items.values().filter(|item| filter(*item)).cloned().collect();
        found.sort_by_key(sort_key);
        found
    }

    /// Returns the cached entity with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `id` is not cached.
    pub fn search_by_id(&self, id: EntityId) -> Result<&T> {
        self.items.get(&id).ok_or_else(|| Error::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        })
    }

    /// Returns a copy of every cached entity, in cache insertion order.
    #[must_use]
    pub fn all(&self) -> Vec<T> {
        self.order
            .iter()
            .filter_map(|id| self.items.get(id))
            .cloned()
            .collect()
    }

    /// Writes the cached entity with `id` to the store, replacing any
    /// document previously stored under that id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `id` is not cached, or a store error.
    pub fn save_item(&self, id: EntityId) -> Result<()> {
        let fields = self.search_by_id(id)?.to_fields()?;
        self.store.upsert(&self.table, id, Value::Object(fields))?;
        tracing::info!(table = %self.table, %id, "Saved entity");
        Ok(())
    }

    /// Number of cached entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Name of the backing table.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }
}
