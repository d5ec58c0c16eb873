//! Game catalog loading: collection records, sanitization, and the source seam.

use crate::models::{Activity, TournamentError};
use serde::Deserialize;

/// Raw entry of a game collection, as delivered by a catalog source.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GameRecord {
    /// Catalog-side numeric id, used for display when the title is missing.
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    /// URL alias the source fetches game details by.
    #[serde(default)]
    pub alias: Option<String>,
    /// Absolute player bounds.
    #[serde(default)]
    pub players_min: u8,
    #[serde(default)]
    pub players_max: u8,
    /// Recommended player bounds; 0 or 1 mean "not provided".
    #[serde(default)]
    pub players_min_recommend: u8,
    #[serde(default)]
    pub players_max_recommend: u8,
    /// Free-form collection comment; a bare number is an ideal group size.
    #[serde(default)]
    pub comment: Option<String>,
}

impl GameRecord {
    fn display_name(&self) -> String {
        match &self.title {
            Some(title) if !title.trim().is_empty() => title.clone(),
            _ => format!("with ID {}", self.id),
        }
    }
}

/// Supplies game collections, e.g. a remote catalog service client.
/// Transport failures surface as [`TournamentError::CatalogLoad`].
pub trait CatalogSource {
    fn load_collection(&self, collection_id: u32) -> Result<Vec<GameRecord>, TournamentError>;
}

/// Load a collection through `source` and build activities from it.
pub fn load_activities(
    source: &impl CatalogSource,
    collection_id: u32,
) -> Result<Vec<Activity>, TournamentError> {
    let activities = build_activities(&source.load_collection(collection_id)?)?;
    log::info!(
        "loaded {} game(s) from collection {collection_id}",
        activities.len()
    );
    Ok(activities)
}

/// Parse a JSON array of game records (the shape a catalog service returns).
pub fn parse_collection(json: &str) -> Result<Vec<GameRecord>, TournamentError> {
    serde_json::from_str(json).map_err(|e| TournamentError::CatalogLoad(e.to_string()))
}

/// Build activities from raw records. Atomic: one unusable record fails the
/// whole batch, so a tournament never sees a partially loaded catalog.
///
/// Recommended bounds win over absolute ones unless they are missing (≤ 1);
/// an absolute minimum of 1 is bumped to 2, since a round needs at least two
/// participants. A numeric comment becomes the ideal group size.
pub fn build_activities(records: &[GameRecord]) -> Result<Vec<Activity>, TournamentError> {
    let mut activities = Vec::with_capacity(records.len());
    for record in records {
        let display = record.display_name();
        if !record.alias.as_deref().is_some_and(|a| !a.trim().is_empty()) {
            return Err(TournamentError::MissingAlias(display));
        }
        let title = match &record.title {
            Some(title) if !title.trim().is_empty() => title.clone(),
            _ => return Err(TournamentError::MissingTitle(display)),
        };

        let min = if record.players_min_recommend <= 1 {
            if record.players_min == 1 {
                2
            } else {
                record.players_min
            }
        } else {
            record.players_min_recommend
        };
        let max = if record.players_max_recommend <= 1 {
            record.players_max
        } else {
            record.players_max_recommend
        };

        let target = record
            .comment
            .as_deref()
            .and_then(|c| c.trim().parse::<u8>().ok());

        let activity = match target {
            Some(t) => Activity::with_target(title, min, max, t)?,
            None => Activity::new(title, min, max)?,
        };
        activities.push(activity);
    }
    Ok(activities)
}
