//! # Chessmaker
//!
//! A terminal tracker for chess-tournament bookkeeping.
//!
//! Chessmaker keeps a roster of players, creates tournaments, walks them
//! round by round and prints rank reports. It is built from two pieces:
//!
//! - A generic entity [`Repository`](storage::Repository) that caches every
//!   entity of one type in memory and writes it back to a document store on
//!   demand.
//! - An interactive [`Menu`](ui::Menu) / [`Form`](ui::Form) layer that keeps
//!   prompting until the operator supplies valid input.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use chessmaker::models::Player;
//! use chessmaker::storage::{MemoryStore, Repository};
//!
//! let store = Arc::new(MemoryStore::new());
//! let mut players = Repository::<Player>::open(store)?;
//! let player = players.create(fields, true)?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use thiserror::Error as ThisError;

pub mod cli;
pub mod config;
pub mod models;
pub mod observability;
pub mod storage;
pub mod ui;

pub use config::ChessmakerConfig;
pub use models::{Entity, EntityId, Fields, Gender, Match, Player, Round, Tournament, TournamentType};
pub use storage::{DocumentStore, JsonFileStore, MemoryStore, Repository};
pub use ui::{Console, Form, Menu, View};

/// Error type for chessmaker operations.
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Form data cannot be turned into a value (impossible date, too few players) |
/// | `NotFound` | An id is absent from a repository cache, or a route is unknown |
/// | `InvalidEntity` | An entity cannot be built from, or turned into, a field mapping |
/// | `OperationFailed` | I/O, JSON, configuration or logging setup fails |
/// | `InputClosed` | The console input stream reached its end |
///
/// Invalid keystrokes inside a menu or a form never surface here: they are
/// absorbed by the prompt loop that received them.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Collected input could not be turned into a domain value.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A lookup found nothing.
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// What was looked up (`Player`, `route`, ...).
        kind: &'static str,
        /// The missing key.
        id: String,
    },

    /// An entity could not be constructed from its fields, or serialized.
    ///
    /// Raised when:
    /// - A required field is missing or has the wrong shape
    /// - A stored document is not a JSON object
    /// - The entity id is zero
    #[error("invalid {kind}: {cause}")]
    InvalidEntity {
        /// Entity kind.
        kind: &'static str,
        /// The underlying cause.
        cause: String,
    },

    /// An operation failed.
    ///
    /// Raised when:
    /// - The document file cannot be read, parsed or written
    /// - The configuration file cannot be read or parsed
    /// - Logging is initialized twice
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// The console has no more input to give.
    #[error("console input closed")]
    InputClosed,
}

/// Result type alias for chessmaker operations.
pub type Result<T> = std::result::Result<T, Error>;
