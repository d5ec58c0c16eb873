//! Activity: a schedulable boardgame with player-count bounds and an ideal group size.

use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an activity (used to key matcher groups and round lookups).
pub type ActivityId = Uuid;

/// A boardgame that rounds can be scheduled for.
///
/// Bounds are validated at construction and immutable afterwards: the catalog
/// loader computes final values before building the activity, so there is no
/// window where `min > max` or a bound below 2 can be observed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    id: ActivityId,
    name: String,
    min_players: u8,
    max_players: u8,
    /// Explicit ideal group size; when absent the midpoint of the bounds is used.
    target_override: Option<u8>,
}

impl Activity {
    /// Create an activity with the given player-count bounds.
    /// Bounds of 1 or 0 are rejected, as is `min > max`.
    pub fn new(
        name: impl Into<String>,
        min_players: u8,
        max_players: u8,
    ) -> Result<Self, TournamentError> {
        Self::build(name.into(), min_players, max_players, None)
    }

    /// Create an activity with an explicit ideal group size.
    /// The override is clamped to `[min, max]` when read, so catalog data with
    /// an out-of-range hint still yields a usable activity.
    pub fn with_target(
        name: impl Into<String>,
        min_players: u8,
        max_players: u8,
        target: u8,
    ) -> Result<Self, TournamentError> {
        Self::build(name.into(), min_players, max_players, Some(target))
    }

    fn build(
        name: String,
        min_players: u8,
        max_players: u8,
        target_override: Option<u8>,
    ) -> Result<Self, TournamentError> {
        if min_players <= 1 {
            return Err(TournamentError::InvalidPlayerCount(min_players));
        }
        if max_players <= 1 {
            return Err(TournamentError::InvalidPlayerCount(max_players));
        }
        if min_players > max_players {
            return Err(TournamentError::InvalidPlayerRange {
                min: min_players,
                max: max_players,
            });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            min_players,
            max_players,
            target_override,
        })
    }

    pub fn id(&self) -> ActivityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_players(&self) -> u8 {
        self.min_players
    }

    pub fn max_players(&self) -> u8 {
        self.max_players
    }

    /// Ideal group size: the explicit override (clamped into the bounds), or
    /// `min + ceil((max - min) / 2)`. Always within `[min, max]`.
    pub fn target_players(&self) -> u8 {
        match self.target_override {
            Some(t) => t.clamp(self.min_players, self.max_players),
            None => self.min_players + (self.max_players - self.min_players).div_ceil(2),
        }
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" ({}-{})", self.name, self.min_players, self.max_players)
    }
}
