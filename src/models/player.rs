//! Player entity.

use super::{Entity, EntityId, Gender};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered chess player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier.
    pub id: EntityId,
    /// First name.
    pub firstname: String,
    /// Last name.
    pub lastname: String,
    /// Ranking position, lower is better.
    pub rank: u32,
    /// Date of birth.
    pub birthdate: NaiveDate,
    /// Gender.
    pub sexe: Gender,
}

impl Player {
    /// Returns "firstname lastname".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

impl Entity for Player {
    const KIND: &'static str = "Player";

    fn id(&self) -> EntityId {
        self.id
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} (rank {})", self.firstname, self.lastname, self.rank)
    }
}
