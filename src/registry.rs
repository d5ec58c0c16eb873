//! Named tournament registry: many tournaments held in memory by unique name.

use crate::models::{Tournament, TournamentError};

/// In-memory collection of tournaments keyed by unique name, listed in
/// insertion order.
#[derive(Clone, Debug, Default)]
pub struct TournamentRegistry {
    entries: Vec<(String, Tournament)>,
}

impl TournamentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tournament under `name`. The name must not be in use.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        tournament: Tournament,
    ) -> Result<(), TournamentError> {
        let name = name.into();
        if self.entries.iter().any(|(n, _)| *n == name) {
            return Err(TournamentError::DuplicateTournament(name));
        }
        self.entries.push((name, tournament));
        Ok(())
    }

    /// Remove and return the tournament registered under `name`.
    pub fn remove(&mut self, name: &str) -> Result<Tournament, TournamentError> {
        let index = self
            .entries
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| TournamentError::TournamentNotFound(name.to_string()))?;
        Ok(self.entries.remove(index).1)
    }

    pub fn get(&self, name: &str) -> Result<&Tournament, TournamentError> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t)
            .ok_or_else(|| TournamentError::TournamentNotFound(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Tournament, TournamentError> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t)
            .ok_or_else(|| TournamentError::TournamentNotFound(name.to_string()))
    }

    /// Registered names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
