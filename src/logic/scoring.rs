//! Cumulative scoring and standings.

use crate::models::{Participant, Tournament, TournamentError};
use std::fmt::Write as _;

/// Current standings: each roster participant with the sum of their scores
/// across every round (0 for rounds they were not part of), highest first.
/// Equal totals keep roster insertion order. Fails with `NotStarted` before
/// the first start.
pub fn get_score(tournament: &Tournament) -> Result<Vec<(Participant, u32)>, TournamentError> {
    if tournament.rounds().is_empty() {
        return Err(TournamentError::NotStarted);
    }
    Ok(score_table(tournament))
}

pub(crate) fn score_table(tournament: &Tournament) -> Vec<(Participant, u32)> {
    let mut rows: Vec<(Participant, u32)> = tournament
        .players
        .iter()
        .map(|p| {
            let total = tournament.rounds.iter().map(|r| r.points_of(p.id)).sum();
            (p.clone(), total)
        })
        .collect();
    // Stable sort: ties keep roster insertion order.
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows
}

/// Render standings one line per participant; equal totals share a rank.
pub fn format_standings(rows: &[(Participant, u32)]) -> String {
    let mut out = String::new();
    let mut rank = 0usize;
    let mut previous: Option<u32> = None;
    for (player, total) in rows {
        if previous != Some(*total) {
            rank += 1;
        }
        let _ = writeln!(out, "{rank}) {} - {}", player.name, total);
        previous = Some(*total);
    }
    out
}
