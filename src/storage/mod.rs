//! Storage layer.
//!
//! Two layers:
//! - **Store**: a [`DocumentStore`] holds one table of JSON documents per
//!   entity type (`JsonFileStore` on disk, `MemoryStore` in process).
//! - **Repository**: a [`Repository`] caches one entity type and writes it
//!   back to its table on demand.
//!
//! The store handle is opened by the caller and shared between repositories.

pub mod persistence;
mod repository;
pub mod traits;

pub use persistence::{JsonFileStore, MemoryStore};
pub use repository::Repository;
pub use traits::DocumentStore;
