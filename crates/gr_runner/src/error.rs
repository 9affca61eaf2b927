//! Error types for the runner.

use std::path::PathBuf;

use gr_core::error::GameError;
use thiserror::Error;

/// Failures outside the simulation: files, configuration and the engine setup.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// A score or configuration file could not be read or written.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A score file holds malformed JSON, or a score could not be encoded.
    #[error("Malformed score file '{}': {source}", path.display())]
    Json {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The RON configuration file failed to parse.
    #[error("Failed to parse config '{}': {source}", path.display())]
    Ron {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: ron::error::SpannedError,
    },

    /// An environment variable held a value of the wrong type.
    #[error("Invalid value '{value}' for {key}")]
    InvalidEnv {
        /// Variable name.
        key: String,
        /// Raw value found.
        value: String,
    },

    /// The engine rejected its configuration.
    #[error(transparent)]
    Game(#[from] GameError),
}

impl RunnerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

/// Result type for runner operations.
pub type Result<T> = std::result::Result<T, RunnerError>;
