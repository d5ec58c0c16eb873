//! Round: one scheduled activity session with its assigned participants and scores.

use crate::models::activity::Activity;
use crate::models::participant::{Participant, ParticipantId};
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write as _;

/// One instantiated session of an activity. The participant set is fixed at
/// construction (the matcher decides membership once); scores are recorded by
/// a single successful `complete` call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    activity: Activity,
    players: Vec<Participant>,
    completed: bool,
    /// Empty until the round is completed; then one entry per assigned participant.
    scores: HashMap<ParticipantId, u32>,
}

impl Round {
    /// Create a round for the given activity and participant group.
    pub fn new(activity: Activity, players: Vec<Participant>) -> Self {
        Self {
            activity,
            players,
            completed: false,
            scores: HashMap::new(),
        }
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn players(&self) -> &[Participant] {
        &self.players
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn has_player(&self, id: ParticipantId) -> bool {
        self.players.iter().any(|p| p.id == id)
    }

    /// Score recorded for the participant, or 0 if they were not assigned to
    /// this round or the round is not yet completed. Lets a participant absent
    /// from a round contribute nothing to cumulative scoring.
    pub fn points_of(&self, id: ParticipantId) -> u32 {
        self.scores.get(&id).copied().unwrap_or(0)
    }

    /// Record final scores and mark the round completed.
    ///
    /// Fails with `RoundAlreadyCompleted` on a second call (scores are never
    /// overwritten) and with `MissingScore` if any assigned participant lacks
    /// an entry in `points`. On failure the round is left untouched.
    pub fn complete(
        &mut self,
        points: &HashMap<ParticipantId, u32>,
    ) -> Result<(), TournamentError> {
        if self.completed {
            return Err(TournamentError::RoundAlreadyCompleted(
                self.activity.to_string(),
            ));
        }
        for player in &self.players {
            if !points.contains_key(&player.id) {
                return Err(TournamentError::MissingScore {
                    activity: self.activity.to_string(),
                    player: player.name.clone(),
                });
            }
        }
        for player in &self.players {
            self.scores.insert(player.id, points[&player.id]);
        }
        self.completed = true;
        Ok(())
    }

    /// Human-readable summary: the activity, then participant names, or one
    /// `name - points` line per participant once completed.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        if self.completed {
            let _ = writeln!(out, "{}:", self.activity);
            for player in &self.players {
                let _ = writeln!(out, "  {} - {}", player.name, self.points_of(player.id));
            }
        } else {
            let _ = write!(out, "{}:", self.activity);
            let names: Vec<&str> = self.players.iter().map(|p| p.name.as_str()).collect();
            let _ = writeln!(out, " {}", names.join(", "));
        }
        out
    }
}
