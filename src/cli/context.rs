//! State shared by every handler.

use crate::Result;
use crate::models::{Player, Tournament};
use crate::storage::{DocumentStore, Repository};
use crate::ui::Console;
use chrono::{Local, NaiveDateTime, SubsecRound};
use std::sync::Arc;

/// Repositories and console of a running session.
pub struct AppContext<C: Console> {
    /// Player roster.
    pub players: Repository<Player>,
    /// Tournaments.
    pub tournaments: Repository<Tournament>,
    /// Operator console.
    pub console: C,
    clock: fn() -> NaiveDateTime,
}

impl<C: Console> AppContext<C> {
    /// Opens both repositories on `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if a repository cannot be loaded.
    pub fn open(store: Arc<dyn DocumentStore>, console: C) -> Result<Self> {
        Ok(Self {
            players: Repository::open(Arc::clone(&store))?,
            tournaments: Repository::open(store)?,
            console,
            clock: local_now,
        })
    }

    /// Replaces the clock used to date rounds and tournaments.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// Current local time, to the second.
    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}
