//! Error types for the space-field simulation.

use thiserror::Error;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Top-level error type for all simulation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// A configuration value is outside its accepted range.
    #[error("Invalid configuration value for '{field}': {message}")]
    InvalidConfig {
        /// Name of the offending setting.
        field: &'static str,
        /// Why the value was rejected.
        message: String,
    },

    /// Explosions must live for at least one frame.
    #[error("Explosion life time must be positive, got {0}")]
    InvalidLifeTime(i32),

    /// A space object was built with a negative radius or mass.
    #[error("Invalid space object: {0}")]
    InvalidObject(String),
}
