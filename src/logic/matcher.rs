//! Round matching: partition a pool of free participants into activity groups.

use crate::models::{Activity, Participant, Round, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// A group under construction: an activity (index into the candidate list)
/// and the participants placed in it so far.
struct OpenGroup {
    activity: usize,
    members: Vec<Participant>,
}

/// Partition `players` into groups over `activities`, one [`Round`] per group.
///
/// `group_limit` of 0 means unconstrained; otherwise every produced round has
/// exactly `group_limit` participants.
///
/// 1. Sweep `delta` upward from 0, drawing activities uniformly at random
///    without replacement among those without a group yet. An activity
///    qualifies when the pool can seed `low = max(min, target - delta)`
///    participants and the limit (if any) equals `low` or
///    `high = min(max, target + delta)`. The first qualifying activity opens
///    a group of `low`.
/// 2. When no fresh activity qualifies, extend the open group with spare
///    capacity whose size is closest to its activity's ideal (first
///    encountered wins ties, in group-opening order) by one participant.
/// 3. When no group can be extended either, run the sweep once more over
///    every activity, so an already-used activity may host a second group
///    (e.g. a 4-player pool over a single 2-player game yields two rounds).
///
/// Participants are drawn uniformly at random without replacement. The sweep
/// widens tolerance around each activity's ideal size only as far as needed,
/// and every step either places at least one participant or fails, so the
/// procedure terminates with the pool fully placed or a diagnosable error.
pub fn generate_rounds<R: Rng>(
    group_limit: u8,
    activities: &[Activity],
    players: &[Participant],
    rng: &mut R,
) -> Result<Vec<Round>, TournamentError> {
    if players.is_empty() {
        return Err(TournamentError::NoFreePlayers);
    }

    let mut groups: Vec<OpenGroup> = Vec::new();
    let mut free: Vec<Participant> = players.to_vec();

    while !free.is_empty() {
        let opened: HashSet<usize> = groups.iter().map(|g| g.activity).collect();
        let untouched: Vec<usize> = (0..activities.len())
            .filter(|i| !opened.contains(i))
            .collect();

        let (group_index, to_add) =
            match sweep(activities, &untouched, free.len(), group_limit, rng) {
                Some((activity, initial)) => {
                    log::debug!(
                        "opening {} with {} seats",
                        activities[activity],
                        initial
                    );
                    groups.push(OpenGroup {
                        activity,
                        members: Vec::new(),
                    });
                    (groups.len() - 1, initial as usize)
                }
                None => match extendable_group(&groups, activities, group_limit) {
                    Some(index) => {
                        log::debug!("extending {} by one seat", activities[groups[index].activity]);
                        (index, 1)
                    }
                    None => {
                        let all: Vec<usize> = (0..activities.len()).collect();
                        match sweep(activities, &all, free.len(), group_limit, rng) {
                            Some((activity, initial)) => {
                                log::debug!(
                                    "reopening {} with {} seats",
                                    activities[activity],
                                    initial
                                );
                                groups.push(OpenGroup {
                                    activity,
                                    members: Vec::new(),
                                });
                                (groups.len() - 1, initial as usize)
                            }
                            None => return Err(TournamentError::NoSuitableActivity),
                        }
                    }
                },
            };

        if free.len() < to_add {
            return Err(TournamentError::NotEnoughPlayersFor(
                activities[groups[group_index].activity].to_string(),
            ));
        }
        free.shuffle(rng);
        let drawn = free.split_off(free.len() - to_add);
        groups[group_index].members.extend(drawn);
    }

    // With a limit, a group may have been seeded below it and never filled up
    // before the pool ran dry; such a packing is not a valid result.
    if group_limit != 0 {
        if let Some(short) = groups
            .iter()
            .find(|g| g.members.len() != group_limit as usize)
        {
            return Err(TournamentError::NotEnoughPlayersFor(
                activities[short.activity].to_string(),
            ));
        }
    }

    Ok(groups
        .into_iter()
        .map(|g| Round::new(activities[g.activity].clone(), g.members))
        .collect())
}

/// Delta-sweep: find an activity among `candidates` that can seed a group
/// from a pool of `free_count`, preferring sizes closest to each activity's
/// ideal. Returns the activity index and the seed size.
fn sweep<R: Rng>(
    activities: &[Activity],
    candidates: &[usize],
    free_count: usize,
    group_limit: u8,
    rng: &mut R,
) -> Option<(usize, u8)> {
    let max_delta = candidates
        .iter()
        .map(|&i| {
            let a = &activities[i];
            (a.target_players() - a.min_players()).max(a.max_players() - a.target_players())
        })
        .max()?;

    let mut order = candidates.to_vec();
    for delta in 0..=max_delta {
        // Shuffle-then-scan draws uniformly without replacement per sweep.
        order.shuffle(rng);
        for &i in &order {
            let a = &activities[i];
            let low = a.min_players().max(a.target_players().saturating_sub(delta));
            let high = a.max_players().min(a.target_players().saturating_add(delta));
            if free_count >= low as usize
                && (group_limit == 0 || group_limit == low || group_limit == high)
            {
                return Some((i, low));
            }
        }
    }
    None
}

/// The open group with spare capacity (and room under the limit, if any)
/// whose current size is closest to its activity's ideal. Ties keep the
/// earliest-opened group.
fn extendable_group(
    groups: &[OpenGroup],
    activities: &[Activity],
    group_limit: u8,
) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (index, group) in groups.iter().enumerate() {
        let a = &activities[group.activity];
        let size = group.members.len();
        if size >= a.max_players() as usize {
            continue;
        }
        if group_limit != 0 && size >= group_limit as usize {
            continue;
        }
        let gap = (a.target_players() as usize).abs_diff(size);
        if best.map_or(true, |(_, smallest)| gap < smallest) {
            best = Some((index, gap));
        }
    }
    best.map(|(index, _)| index)
}
