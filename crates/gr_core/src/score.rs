//! Match scores and leaderboard ranking.

use serde::{Deserialize, Serialize};

/// Number of entries kept on the leaderboard.
pub const LEADERBOARD_SIZE: usize = 3;

/// Outcome of one match.
///
/// Serialized with the camelCase field names used by the score files:
/// `{"dateTime": "...", "finalScore": 12.5, "destroyedAsteroids": 3}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    /// UTC completion time; empty until the match is persisted.
    pub date_time: String,
    /// Accumulated value of every destroyed asteroid.
    pub final_score: f64,
    /// Number of asteroid hits.
    pub destroyed_asteroids: u32,
}

impl Score {
    /// Fresh score for a new match.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one destroyed asteroid worth `value` points.
    pub fn record_destroyed(&mut self, value: f64) {
        self.destroyed_asteroids += 1;
        self.final_score += value;
    }

    /// Copy of this score stamped with a completion time.
    #[must_use]
    pub fn stamped(&self, date_time: impl Into<String>) -> Self {
        Self {
            date_time: date_time.into(),
            ..self.clone()
        }
    }
}

/// The `limit` best scores, highest first.
///
/// The sort is stable, so equal scores keep their history order.
#[must_use]
pub fn top_scores(history: &[Score], limit: usize) -> Vec<Score> {
    let mut ranked = history.to_vec();
    ranked.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
    ranked.truncate(limit);
    ranked
}
