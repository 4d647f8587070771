//! Entity identity and the field-mapping contract.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Named fields of an entity, as produced by forms and stored as documents.
pub type Fields = serde_json::Map<String, Value>;

/// Integer identifier of an entity within its repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// The first id handed out by an empty store.
    pub const FIRST: Self = Self(1);

    /// Creates an entity id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw integer.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the id that follows this one, or `None` at `u64::MAX`.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<EntityId> for Value {
    fn from(id: EntityId) -> Self {
        Self::from(id.0)
    }
}

/// A domain object a repository can manage.
///
/// The contract is structural: an integer id, construction from named
/// fields and serialization back into those same fields. Both directions
/// go through serde, so `T::from_fields(e.to_fields()?)? == e`.
pub trait Entity: Serialize + DeserializeOwned + Clone {
    /// Type name, used in errors and to derive the table name.
    const KIND: &'static str;

    /// Returns the entity id.
    fn id(&self) -> EntityId;

    /// Name of the document table: the pluralized lowercase type name.
    #[must_use]
    fn table() -> String {
        format!("{}s", Self::KIND.to_lowercase())
    }

    /// Serializes the entity into its field mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEntity`] if the entity does not serialize to
    /// a JSON object.
    fn to_fields(&self) -> Result<Fields> {
        match serde_json::to_value(self) {
            Ok(Value::Object(fields)) => Ok(fields),
            Ok(other) => Err(Error::InvalidEntity {
                kind: Self::KIND,
                cause: format!("expected an object, got {other}"),
            }),
            Err(e) => Err(Error::InvalidEntity {
                kind: Self::KIND,
                cause: e.to_string(),
            }),
        }
    }

    /// Builds an entity from named fields.
    ///
    /// Unknown fields are ignored, so raw form data can be passed through.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEntity`] if a field is missing or malformed.
    fn from_fields(fields: Fields) -> Result<Self> {
        serde_json::from_value(Value::Object(fields)).map_err(|e| Error::InvalidEntity {
            kind: Self::KIND,
            cause: e.to_string(),
        })
    }
}
