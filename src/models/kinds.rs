//! Enumerated player and tournament attributes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Player gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Male player.
    Male,
    /// Female player.
    Female,
}

impl Gender {
    /// Returns all variants in menu order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Male, Self::Female]
    }

    /// Returns the variant name, which is also its stored form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Time control of a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TournamentType {
    /// One to three minutes per player.
    Bullet,
    /// Three to ten minutes per player.
    Blitz,
    /// Ten to sixty minutes per player.
    Rapid,
}

impl TournamentType {
    /// Returns all variants in menu order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Bullet, Self::Blitz, Self::Rapid]
    }

    /// Returns the variant name, which is also its stored form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bullet => "Bullet",
            Self::Blitz => "Blitz",
            Self::Rapid => "Rapid",
        }
    }
}

impl fmt::Display for TournamentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
