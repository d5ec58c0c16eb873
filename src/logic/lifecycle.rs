//! Tournament lifecycle: starting, continuing, and completing rounds.

use crate::logic::matcher::generate_rounds;
use crate::logic::scoring::score_table;
use crate::models::{
    Activity, Participant, ParticipantId, Round, Tournament, TournamentError, Variant,
};
use std::collections::HashMap;

/// Start the tournament: match every participant into a first set of rounds.
///
/// `group_limit` of 0 leaves round sizes to the activities' bounds. Elimination
/// tournaments force the limit to the roster size and Duel tournaments to 2;
/// an explicit differing limit is rejected. Fails with `AlreadyStarted` once
/// rounds exist. On failure the history is left untouched.
pub fn start(tournament: &mut Tournament, group_limit: u8) -> Result<(), TournamentError> {
    let limit = match tournament.variant() {
        Variant::Elimination => {
            let roster = tournament.players.len() as u8;
            if group_limit != 0 && group_limit != roster {
                return Err(TournamentError::GroupLimitMismatch {
                    expected: roster,
                    given: group_limit,
                });
            }
            roster
        }
        Variant::Duel => {
            if group_limit != 0 && group_limit != 2 {
                return Err(TournamentError::GroupLimitMismatch {
                    expected: 2,
                    given: group_limit,
                });
            }
            2
        }
        Variant::FreeForAll => group_limit,
    };

    let rounds = next_rounds(tournament, limit, false)?;
    log::info!("started tournament with {} round(s)", rounds.len());
    tournament.rounds.extend(rounds);
    Ok(())
}

/// Clear the round history and start over. Fails with `NotStarted` if the
/// tournament was never started.
pub fn restart(tournament: &mut Tournament, group_limit: u8) -> Result<(), TournamentError> {
    if tournament.rounds.is_empty() {
        return Err(TournamentError::NotStarted);
    }
    tournament.rounds.clear();
    start(tournament, group_limit)
}

/// Match the currently free participants into a further set of rounds and
/// append them to the history. Returns the 1-based numbers of the new rounds.
///
/// Elimination tournaments force the limit to the roster size minus the
/// number of rounds already played, ignoring the argument.
pub fn start_next(
    tournament: &mut Tournament,
    group_limit: u8,
) -> Result<Vec<usize>, TournamentError> {
    let limit = match tournament.variant() {
        Variant::Elimination => {
            tournament.players.len().saturating_sub(tournament.rounds.len()) as u8
        }
        Variant::FreeForAll | Variant::Duel => group_limit,
    };

    let rounds = next_rounds(tournament, limit, true)?;
    let first = tournament.rounds.len() + 1;
    tournament.rounds.extend(rounds);
    log::info!(
        "continued tournament with round(s) #{}-#{}",
        first,
        tournament.rounds.len()
    );
    Ok((first..=tournament.rounds.len()).collect())
}

/// Complete the round with the given 1-based number.
///
/// Builds a zero-initialized score map for exactly the round's participants
/// and hands it to `fill` (the score-supplying collaborator). An error from
/// `fill` — including [`TournamentError::Cancelled`] — aborts the call with
/// the round still incomplete; afterwards the map is re-validated by
/// [`Round::complete`].
pub fn complete_round<F>(
    tournament: &mut Tournament,
    number: usize,
    fill: F,
) -> Result<(), TournamentError>
where
    F: FnOnce(&mut HashMap<ParticipantId, u32>) -> Result<(), TournamentError>,
{
    if tournament.rounds.is_empty() {
        return Err(TournamentError::NotStarted);
    }
    if number == 0 || number > tournament.rounds.len() {
        return Err(TournamentError::InvalidRoundNumber(number));
    }
    let index = number - 1;
    let mut points: HashMap<ParticipantId, u32> = tournament
        .players
        .iter()
        .filter(|p| tournament.rounds[index].has_player(p.id))
        .map(|p| (p.id, 0))
        .collect();
    fill(&mut points)?;
    tournament.rounds[index].complete(&points)?;
    log::info!("completed round #{number}");
    Ok(())
}

/// Participants eligible for the next set of rounds.
///
/// Base policy: the full roster before the first start; afterwards everyone
/// not locked into a still-incomplete round. Elimination additionally drops
/// the bottom entries of the current standings, one per round in the history,
/// recomputed fresh on every call.
pub fn next_players(tournament: &Tournament) -> Vec<Participant> {
    let mut pool: Vec<Participant> = if tournament.rounds.is_empty() {
        tournament.players.clone()
    } else {
        tournament
            .players
            .iter()
            .filter(|p| {
                !tournament
                    .rounds
                    .iter()
                    .any(|r| !r.is_completed() && r.has_player(p.id))
            })
            .cloned()
            .collect()
    };

    if tournament.variant() == Variant::Elimination && !tournament.rounds.is_empty() {
        let standings = score_table(tournament);
        for (dropped, _) in standings.iter().rev().take(tournament.rounds.len()) {
            pool.retain(|p| p.id != dropped.id);
        }
    }

    pool
}

fn next_rounds(
    tournament: &mut Tournament,
    group_limit: u8,
    started: bool,
) -> Result<Vec<Round>, TournamentError> {
    if !tournament.rounds.is_empty() && !started {
        return Err(TournamentError::AlreadyStarted);
    }
    if tournament.rounds.is_empty() && started {
        return Err(TournamentError::NotStarted);
    }
    if group_limit == 1 {
        return Err(TournamentError::InvalidGroupLimit(1));
    }

    let eligible = eligible_activities(tournament, group_limit)?;

    if !started {
        let capacity: usize = eligible.iter().map(|a| a.max_players() as usize).sum();
        if capacity < tournament.players.len() {
            return Err(TournamentError::RosterTooLarge {
                players: tournament.players.len(),
                capacity,
            });
        }
    }

    let pool = next_players(tournament);
    if pool.is_empty() {
        return Err(if started {
            TournamentError::NoFreePlayers
        } else {
            TournamentError::NoPlayers
        });
    }

    generate_rounds(group_limit, &eligible, &pool, &mut tournament.rng)
}

/// Catalog activities usable for the next set of rounds: those whose bounds
/// admit the group limit, excluding — on a first pass — every activity that
/// already has a round. When that leaves nothing, the restriction relaxes to
/// "no incomplete round" so already-played activities come back into play.
fn eligible_activities(
    tournament: &Tournament,
    group_limit: u8,
) -> Result<Vec<Activity>, TournamentError> {
    let pass = |ignore_played: bool| -> Vec<Activity> {
        tournament
            .activities
            .iter()
            .filter(|a| {
                (group_limit == 0
                    || (a.min_players() <= group_limit && group_limit <= a.max_players()))
                    && (tournament.rounds.is_empty()
                        || !tournament.rounds.iter().any(|r| {
                            r.activity().id() == a.id() && (!r.is_completed() || ignore_played)
                        }))
            })
            .cloned()
            .collect()
    };

    let mut eligible = pass(true);
    if eligible.is_empty() {
        eligible = pass(false);
    }
    if eligible.is_empty() {
        return Err(if tournament.rounds.is_empty() {
            TournamentError::NoMatchingActivity
        } else {
            TournamentError::NoFreeActivity
        });
    }
    Ok(eligible)
}
