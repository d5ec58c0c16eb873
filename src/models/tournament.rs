//! Tournament, Variant and TournamentError.

use crate::models::activity::Activity;
use crate::models::participant::Participant;
use crate::models::round::Round;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// A player-count bound of 1 or 0 was given for an activity.
    InvalidPlayerCount(u8),
    /// Activity bounds with `min > max`.
    InvalidPlayerRange { min: u8, max: u8 },
    /// A per-round group limit of 1 was requested.
    InvalidGroupLimit(u8),
    /// The variant dictates a group limit and a different explicit one was given.
    GroupLimitMismatch { expected: u8, given: u8 },
    /// A participant name is empty after trimming.
    EmptyPlayerName,
    /// A participant with this name is already on the roster (case-insensitive).
    DuplicatePlayer(String),
    /// The activity is already in the catalog.
    DuplicateActivity(String),
    /// A tournament with this name is already registered.
    DuplicateTournament(String),
    /// No registered tournament has this name.
    TournamentNotFound(String),
    /// The tournament has already been started.
    AlreadyStarted,
    /// The tournament has not been started yet.
    NotStarted,
    /// The round was already completed; scores are never overwritten.
    RoundAlreadyCompleted(String),
    /// The 1-based round number does not reference an existing round.
    InvalidRoundNumber(usize),
    /// The score-fill collaborator left an assigned participant without a score.
    MissingScore { activity: String, player: String },
    /// No catalog activity matches the tournament parameters.
    NoMatchingActivity,
    /// Every matching activity is still occupied by an incomplete round.
    NoFreeActivity,
    /// The roster exceeds the combined capacity of the eligible activities.
    RosterTooLarge { players: usize, capacity: usize },
    /// No participants have been added to the tournament.
    NoPlayers,
    /// Every participant is locked into an incomplete round (or eliminated).
    NoFreePlayers,
    /// The matcher could not select an activity for the remaining pool.
    NoSuitableActivity,
    /// The matcher could not gather enough participants for the activity.
    NotEnoughPlayersFor(String),
    /// The score-fill collaborator cancelled the operation.
    Cancelled,
    /// The catalog source failed to deliver a collection.
    CatalogLoad(String),
    /// A catalog record has no usable title.
    MissingTitle(String),
    /// A catalog record has no alias to fetch game details by.
    MissingAlias(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidPlayerCount(v) => {
                write!(f, "Player count {v} is invalid: must be at least 2")
            }
            TournamentError::InvalidPlayerRange { min, max } => {
                write!(f, "Player range {min}-{max} is invalid: min exceeds max")
            }
            TournamentError::InvalidGroupLimit(v) => {
                write!(f, "Group limit {v} is invalid for any game")
            }
            TournamentError::GroupLimitMismatch { expected, given } => {
                write!(f, "Group limit {given} does not match the required {expected}")
            }
            TournamentError::EmptyPlayerName => write!(f, "Participant name is empty"),
            TournamentError::DuplicatePlayer(name) => {
                write!(f, "Participant \"{name}\" is already on the roster")
            }
            TournamentError::DuplicateActivity(name) => {
                write!(f, "Game \"{name}\" is already in the catalog")
            }
            TournamentError::DuplicateTournament(name) => {
                write!(f, "Tournament name \"{name}\" is already in use")
            }
            TournamentError::TournamentNotFound(name) => {
                write!(f, "No tournament named \"{name}\"")
            }
            TournamentError::AlreadyStarted => write!(f, "Tournament was already started"),
            TournamentError::NotStarted => write!(f, "Tournament has not been started"),
            TournamentError::RoundAlreadyCompleted(activity) => {
                write!(f, "Round of {activity} was already completed")
            }
            TournamentError::InvalidRoundNumber(n) => {
                write!(f, "\"{n}\" is not a valid round number")
            }
            TournamentError::MissingScore { activity, player } => {
                write!(f, "Cannot complete round of {activity}: no score for \"{player}\"")
            }
            TournamentError::NoMatchingActivity => {
                write!(f, "No game matches the tournament parameters")
            }
            TournamentError::NoFreeActivity => {
                write!(f, "No free game matches the tournament parameters")
            }
            TournamentError::RosterTooLarge { players, capacity } => {
                write!(
                    f,
                    "Roster size ({players}) exceeds the combined game capacity ({capacity})"
                )
            }
            TournamentError::NoPlayers => write!(f, "No participants have been added"),
            TournamentError::NoFreePlayers => write!(f, "No free participants are available"),
            TournamentError::NoSuitableActivity => {
                write!(f, "No suitable game could be found for the remaining participants")
            }
            TournamentError::NotEnoughPlayersFor(activity) => {
                write!(f, "Could not find enough participants for {activity}")
            }
            TournamentError::Cancelled => write!(f, "Operation was cancelled"),
            TournamentError::CatalogLoad(msg) => write!(f, "Failed to load game collection: {msg}"),
            TournamentError::MissingTitle(game) => write!(f, "Game {game} has no title"),
            TournamentError::MissingAlias(game) => write!(f, "Game {game} has no alias"),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Behavioral policy of a tournament: controls next-round eligibility and
/// per-round group-size defaults. Fixed at creation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Every free participant plays every round; no group-size default.
    #[default]
    FreeForAll,
    /// One participant is dropped from the pool per round played, lowest
    /// current total first; rounds span the whole remaining pool.
    Elimination,
    /// Rounds are always head-to-head pairs.
    Duel,
}

fn entropy_rng() -> StdRng {
    StdRng::from_entropy()
}

/// A tournament: roster, game catalog and append-only round history.
///
/// The random source is owned by the tournament rather than shared process
/// state, so tests can pin it with [`Tournament::with_seed`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    variant: Variant,
    pub(crate) players: Vec<Participant>,
    pub(crate) activities: Vec<Activity>,
    pub(crate) rounds: Vec<Round>,
    #[serde(skip, default = "entropy_rng")]
    pub(crate) rng: StdRng,
}

impl Tournament {
    /// Create an empty tournament of the given variant.
    pub fn new(variant: Variant) -> Self {
        Self::with_rng(variant, entropy_rng())
    }

    /// Create an empty tournament with a fixed random seed, for reproducible
    /// round generation.
    pub fn with_seed(variant: Variant, seed: u64) -> Self {
        Self::with_rng(variant, StdRng::seed_from_u64(seed))
    }

    fn with_rng(variant: Variant, rng: StdRng) -> Self {
        Self {
            id: Uuid::new_v4(),
            variant,
            players: Vec::new(),
            activities: Vec::new(),
            rounds: Vec::new(),
            rng,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Roster in insertion order.
    pub fn players(&self) -> &[Participant] {
        &self.players
    }

    /// Game catalog in insertion order.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Round history, oldest first. Empty exactly when the tournament has not
    /// been started.
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn is_started(&self) -> bool {
        !self.rounds.is_empty()
    }

    /// Add a participant to the roster. Names are trimmed and must be unique
    /// (case-insensitive).
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<(), TournamentError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TournamentError::EmptyPlayerName);
        }
        if self
            .players
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(trimmed))
        {
            return Err(TournamentError::DuplicatePlayer(trimmed.to_string()));
        }
        self.players.push(Participant::new(trimmed));
        Ok(())
    }

    /// Add an activity to the catalog. The same activity cannot be added twice;
    /// distinct activities sharing a display name are allowed.
    pub fn add_activity(&mut self, activity: Activity) -> Result<(), TournamentError> {
        if self.activities.iter().any(|a| a.id() == activity.id()) {
            return Err(TournamentError::DuplicateActivity(
                activity.name().to_string(),
            ));
        }
        self.activities.push(activity);
        Ok(())
    }

    /// Look up a round by its 1-based number.
    pub fn round(&self, number: usize) -> Result<&Round, TournamentError> {
        if number == 0 || number > self.rounds.len() {
            return Err(TournamentError::InvalidRoundNumber(number));
        }
        Ok(&self.rounds[number - 1])
    }

    /// Multi-line summary of one round by its 1-based number.
    pub fn describe_round(&self, number: usize) -> Result<String, TournamentError> {
        if self.rounds.is_empty() {
            return Err(TournamentError::NotStarted);
        }
        Ok(self.round(number)?.describe())
    }

    /// Multi-line summary of every round, numbered from 1.
    pub fn describe_rounds(&self) -> Result<String, TournamentError> {
        if self.rounds.is_empty() {
            return Err(TournamentError::NotStarted);
        }
        let mut out = String::new();
        for (i, round) in self.rounds.iter().enumerate() {
            let _ = write!(out, "  #{} {}", i + 1, round.describe());
        }
        Ok(out)
    }
}

impl std::fmt::Display for Tournament {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Participants: {}; Games: {}",
            self.players.len(),
            self.activities.len()
        )
    }
}
