//! Boardgame tournament organizer: library with models and matching logic.

pub mod catalog;
pub mod logic;
pub mod models;
pub mod registry;

pub use catalog::{build_activities, load_activities, parse_collection, CatalogSource, GameRecord};
pub use logic::{
    complete_round, format_standings, generate_rounds, get_score, next_players, restart, start,
    start_next,
};
pub use models::{
    Activity, ActivityId, Participant, ParticipantId, Round, Tournament, TournamentError,
    TournamentId, Variant,
};
pub use registry::TournamentRegistry;
