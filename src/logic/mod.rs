//! Tournament business logic: matching, lifecycle, scoring.

mod lifecycle;
mod matcher;
mod scoring;

pub use lifecycle::{complete_round, next_players, restart, start, start_next};
pub use matcher::generate_rounds;
pub use scoring::{format_standings, get_score};
