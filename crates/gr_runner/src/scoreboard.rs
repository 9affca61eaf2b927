//! Score history and leaderboard files.
//!
//! Both files hold a single JSON array of scores:
//!
//! ```json
//! [
//!   { "dateTime": "2024-05-01T18:22:03Z", "finalScore": 1502.5, "destroyedAsteroids": 2 }
//! ]
//! ```
//!
//! Every operation reads the whole file, modifies it in memory and writes it
//! back in full. Two processes persisting at the same time race: the last
//! write wins and the other match is lost.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use gr_core::score::{top_scores, Score, LEADERBOARD_SIZE};

use crate::config::ScorePaths;
use crate::error::{Result, RunnerError};
use crate::timestamp::utc_now;

/// Reads and writes the score history and the leaderboard.
#[derive(Debug, Clone)]
pub struct ScoreBoard {
    history_path: PathBuf,
    leaderboard_path: PathBuf,
}

impl ScoreBoard {
    /// Score board backed by the given files.
    pub fn new(history_path: impl Into<PathBuf>, leaderboard_path: impl Into<PathBuf>) -> Self {
        Self {
            history_path: history_path.into(),
            leaderboard_path: leaderboard_path.into(),
        }
    }

    /// Score board at the configured locations.
    pub fn from_paths(paths: &ScorePaths) -> Self {
        Self::new(&paths.history, &paths.leaderboard)
    }

    /// History file location.
    pub fn history_path(&self) -> &Path {
        &self.history_path
    }

    /// Leaderboard file location.
    pub fn leaderboard_path(&self) -> &Path {
        &self.leaderboard_path
    }

    /// Every recorded match, oldest first. A missing or empty file is an
    /// empty history.
    pub fn load_history(&self) -> Result<Vec<Score>> {
        read_scores(&self.history_path)
    }

    /// Current leaderboard, best first.
    pub fn load_leaderboard(&self) -> Result<Vec<Score>> {
        read_scores(&self.leaderboard_path)
    }

    /// Append `score` to the history as is.
    pub fn record_match(&self, score: &Score) -> Result<()> {
        let mut history = self.load_history()?;
        history.push(score.clone());
        write_scores(&self.history_path, &history)?;
        tracing::info!(
            path = %self.history_path.display(),
            matches = history.len(),
            final_score = score.final_score,
            "Match recorded"
        );
        Ok(())
    }

    /// Rewrite the leaderboard from the history. Returns what was written.
    pub fn refresh_leaderboard(&self) -> Result<Vec<Score>> {
        let history = self.load_history()?;
        let leaderboard = top_scores(&history, LEADERBOARD_SIZE);
        write_scores(&self.leaderboard_path, &leaderboard)?;
        tracing::info!(
            path = %self.leaderboard_path.display(),
            entries = leaderboard.len(),
            "Leaderboard refreshed"
        );
        Ok(leaderboard)
    }

    /// Stamp a finished match with the current UTC time, append it to the
    /// history and refresh the leaderboard.
    pub fn persist_match(&self, score: &Score) -> Result<Score> {
        let stamped = score.stamped(utc_now());
        self.record_match(&stamped)?;
        self.refresh_leaderboard()?;
        Ok(stamped)
    }
}

fn read_scores(path: &Path) -> Result<Vec<Score>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(RunnerError::io(path, e)),
    };

    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&contents).map_err(|e| RunnerError::json(path, e))
}

fn write_scores(path: &Path, scores: &[Score]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| RunnerError::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(scores).map_err(|e| RunnerError::json(path, e))?;
    std::fs::write(path, json).map_err(|e| RunnerError::io(path, e))
}
