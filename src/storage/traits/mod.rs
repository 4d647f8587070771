//! Storage traits.

mod persistence;

pub use persistence::DocumentStore;
