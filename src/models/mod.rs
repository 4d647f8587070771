//! Data models for chessmaker.
//!
//! Every type stored by a [`Repository`](crate::storage::Repository)
//! implements [`Entity`]. Rounds and matches live inside their tournament
//! document and are plain values.

mod entity;
mod kinds;
mod player;
mod tournament;

pub use entity::{Entity, EntityId, Fields};
pub use kinds::{Gender, TournamentType};
pub use player::Player;
pub use tournament::{DRAW, LOSS, Match, Round, Tournament, WIN};
