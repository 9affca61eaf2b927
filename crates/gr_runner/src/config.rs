//! Runner configuration.
//!
//! Settings are layered: built-in defaults, then an optional RON file, then
//! environment variables. Environment keys share the
//! `GR__CORE__GAME__` prefix.

use std::path::{Path, PathBuf};

use gr_core::config::GameConfig;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RunnerError};

/// Prefix of every engine setting in the environment.
pub const ENGINE_ENV_PREFIX: &str = "GR__CORE__GAME__GAME_ENGINE__";

/// Prefix of every score-file setting in the environment.
pub const SCORE_ENV_PREFIX: &str = "GR__CORE__GAME__SCORE__";

/// Default location of the score history.
pub const DEFAULT_HISTORY_PATH: &str = "score/Scoreboard.json";

/// Default location of the leaderboard.
pub const DEFAULT_LEADERBOARD_PATH: &str = "score/Leaderboard.json";

/// Where the score files live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorePaths {
    /// Append-only history of every finished match.
    pub history: PathBuf,
    /// Top scores, best first.
    pub leaderboard: PathBuf,
}

impl Default for ScorePaths {
    fn default() -> Self {
        Self {
            history: PathBuf::from(DEFAULT_HISTORY_PATH),
            leaderboard: PathBuf::from(DEFAULT_LEADERBOARD_PATH),
        }
    }
}

/// Everything the runner needs to start a match.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Engine tunables.
    pub game: GameConfig,
    /// Score file locations.
    pub score: ScorePaths,
}

impl RunnerConfig {
    /// Defaults, overlaid with `file` when given, overlaid with the process
    /// environment.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let base = match file {
            Some(path) => Self::from_ron_file(path)?,
            None => Self::default(),
        };
        base.with_env(|key| std::env::var(key).ok())
    }

    /// Load a RON file. Missing sections keep their defaults.
    pub fn from_ron_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| RunnerError::io(path, e))?;
        ron::from_str(&contents).map_err(|source| RunnerError::Ron {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay settings found through `lookup` onto this configuration.
    ///
    /// `lookup` receives full variable names; tests pass a map instead of the
    /// real environment.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let engine = |name: &str| {
            let key = format!("{ENGINE_ENV_PREFIX}{name}");
            lookup(&key).map(|value| (key, value))
        };

        if let Some(value) = parse_env(engine("FRAME_RATE"))? {
            self.game.frame_rate = value;
        }
        if let Some(value) = parse_env(engine("SPACEFIELD_WIDTH"))? {
            self.game.space_field_width = value;
        }
        if let Some(value) = parse_env(engine("SPACEFIELD_HEIGHT"))? {
            self.game.space_field_height = value;
        }
        if let Some(value) = parse_env(engine("ASTEROID_PROBABILITY"))? {
            self.game.asteroid_probability = value;
        }
        if let Some(value) = parse_env(engine("COEFFICIENT_RESTITUTION"))? {
            self.game.coefficient_restitution = value;
        }

        if let Some(path) = lookup(&format!("{SCORE_ENV_PREFIX}HISTORY_PATH")) {
            self.score.history = PathBuf::from(path);
        }
        if let Some(path) = lookup(&format!("{SCORE_ENV_PREFIX}LEADERBOARD_PATH")) {
            self.score.leaderboard = PathBuf::from(path);
        }

        Ok(self)
    }
}

fn parse_env<T: std::str::FromStr>(entry: Option<(String, String)>) -> Result<Option<T>> {
    let Some((key, value)) = entry else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| RunnerError::InvalidEnv { key, value })
}
