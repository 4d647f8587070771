//! Tournament entity with its nested rounds and matches.

use super::{Entity, EntityId, TournamentType};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score credited to a match winner.
pub const WIN: f64 = 1.0;
/// Score credited to each side of a drawn match.
pub const DRAW: f64 = 0.5;
/// Score credited to a match loser.
pub const LOSS: f64 = 0.0;

/// A tournament and everything played in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    /// Unique identifier.
    pub id: EntityId,
    /// Tournament name.
    pub name: String,
    /// Where it is played.
    pub location: String,
    /// Time control.
    pub tournament_type: TournamentType,
    /// Number of players enrolled at creation.
    pub number_of_players: u32,
    /// Number of rounds planned at creation.
    pub number_of_rounds: u32,
    /// Enrolled player ids, in roster order.
    #[serde(default)]
    pub players: Vec<EntityId>,
    /// Rounds, in play order.
    #[serde(default)]
    pub rounds: Vec<Round>,
    /// When the tournament was opened.
    #[serde(default)]
    pub begin_date: Option<NaiveDateTime>,
    /// When the tournament was closed; unset while it is pending.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl Tournament {
    /// Returns true until an end date has been recorded.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.end_date.is_none()
    }

    /// Index of the first round that has not ended.
    #[must_use]
    pub fn current_round_index(&self) -> Option<usize> {
        self.rounds.iter().position(|round| !round.is_finished())
    }

    /// The first round that has not ended.
    pub fn current_round_mut(&mut self) -> Option<&mut Round> {
        self.rounds.iter_mut().find(|round| !round.is_finished())
    }

    /// Begins the current round and pairs it if it has no matches yet.
    ///
    /// Returns `false` when every round has already ended.
    pub fn open_current_round(&mut self, now: NaiveDateTime) -> bool {
        let roster = self.players.clone();
        let Some(round) = self.current_round_mut() else {
            return false;
        };
        round.start(now);
        if round.matchs.is_empty() {
            round.pair_in_order(&roster);
        }
        true
    }

    /// Ends the current round and begins the next one.
    ///
    /// Returns `true` while rounds remain to be played.
    pub fn advance(&mut self, now: NaiveDateTime) -> bool {
        let Some(index) = self.current_round_index() else {
            return false;
        };
        self.rounds[index].finish(now);
        match self.rounds.get_mut(index + 1) {
            Some(next) => {
                next.start(now);
                true
            },
            None => false,
        }
    }

    /// Total score per enrolled player, best first.
    ///
    /// Ties keep roster order.
    #[must_use]
    pub fn scores(&self) -> Vec<(EntityId, f64)> {
        let mut scores: Vec<(EntityId, f64)> = self
            .players
            .iter()
            .map(|&player| {
                let total = self
                    .rounds
                    .iter()
                    .flat_map(|round| &round.matchs)
                    .filter_map(|m| m.score_of(player))
                    .sum();
                (player, total)
            })
            .collect();
        scores.sort_by(|a, b| b.1.total_cmp(&a.1));
        scores
    }
}

impl Entity for Tournament {
    const KIND: &'static str = "Tournament";

    fn id(&self) -> EntityId {
        self.id
    }
}

impl fmt::Display for Tournament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}) - {} joueurs, {} rounds",
            self.name, self.location, self.tournament_type, self.number_of_players, self.number_of_rounds
        )
    }
}

/// One round of a tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// Round name (`Round1`, `Round2`, ...).
    pub name: String,
    /// When the round began; unset until it is played.
    #[serde(default)]
    pub begin_date: Option<NaiveDateTime>,
    /// When the round ended.
    #[serde(default)]
    pub end_date: Option<NaiveDateTime>,
    /// Matches of the round.
    #[serde(default)]
    pub matchs: Vec<Match>,
}

impl Round {
    /// Creates an unplayed round.
    #[must_use]
    pub fn new(name: impl Into<String>, begin_date: Option<NaiveDateTime>) -> Self {
        Self {
            name: name.into(),
            begin_date,
            end_date: None,
            matchs: Vec::new(),
        }
    }

    /// Returns true once an end date is set.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.end_date.is_some()
    }

    /// Sets the begin date unless already set.
    pub fn start(&mut self, now: NaiveDateTime) {
        self.begin_date.get_or_insert(now);
    }

    /// Sets the end date.
    pub const fn finish(&mut self, now: NaiveDateTime) {
        self.end_date = Some(now);
    }

    /// Pairs players two by two in roster order; an odd player out sits.
    pub fn pair_in_order(&mut self, roster: &[EntityId]) {
        self.matchs = roster
            .chunks_exact(2)
            .map(|pair| Match::new(pair[0], pair[1]))
            .collect();
    }
}

/// A single game between two players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// First player id.
    pub player_1: EntityId,
    /// Second player id.
    pub player_2: EntityId,
    /// Score of the first player.
    #[serde(default)]
    pub score_1: f64,
    /// Score of the second player.
    #[serde(default)]
    pub score_2: f64,
}

impl Match {
    /// Creates an unscored match.
    #[must_use]
    pub const fn new(player_1: EntityId, player_2: EntityId) -> Self {
        Self {
            player_1,
            player_2,
            score_1: LOSS,
            score_2: LOSS,
        }
    }

    /// Records the result from the first player's score.
    pub fn record(&mut self, score_1: f64) {
        self.score_1 = score_1;
        self.score_2 = WIN - score_1;
    }

    /// Score of `player` in this match, if they played it.
    #[must_use]
    pub fn score_of(&self, player: EntityId) -> Option<f64> {
        if player == self.player_1 {
            Some(self.score_1)
        } else if player == self.player_2 {
            Some(self.score_2)
        } else {
            None
        }
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vs {} : {} - {}",
            self.player_1, self.player_2, self.score_1, self.score_2
        )
    }
}
