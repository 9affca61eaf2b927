//! Engine configuration.
//!
//! A [`GameConfig`] is built once by the caller (from defaults, a RON file or
//! the environment) and handed to the engine at construction.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::math::Fixed;

/// Milliseconds in one second, used to derive the frame budget.
pub const MILLISECONDS_PER_SECOND: u64 = 1000;

/// Largest accepted field side, keeping squared distances inside fixed-point range.
pub const MAX_FIELD_DIMENSION: u32 = 10_000;

/// Tunables for the frame loop, field size and collision response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Ticks per second in continuous mode.
    pub frame_rate: u32,
    /// Width of the playing field in world units.
    pub space_field_width: u32,
    /// Height of the playing field in world units.
    pub space_field_height: u32,
    /// A new asteroid spawns when the per-tick draw is at or below this value.
    pub asteroid_probability: f64,
    /// Energy kept by a collision (1.0 = perfectly elastic).
    pub coefficient_restitution: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            frame_rate: 20,
            space_field_width: 12,
            space_field_height: 18,
            asteroid_probability: 0.2,
            coefficient_restitution: 0.8,
        }
    }
}

impl GameConfig {
    /// Check every value against its accepted range.
    pub fn validate(&self) -> Result<()> {
        if self.frame_rate == 0 {
            return Err(invalid("frame_rate", "must be at least 1"));
        }
        if self.space_field_width == 0 || self.space_field_width > MAX_FIELD_DIMENSION {
            return Err(invalid(
                "space_field_width",
                format!("must be between 1 and {MAX_FIELD_DIMENSION}"),
            ));
        }
        if self.space_field_height == 0 || self.space_field_height > MAX_FIELD_DIMENSION {
            return Err(invalid(
                "space_field_height",
                format!("must be between 1 and {MAX_FIELD_DIMENSION}"),
            ));
        }
        if !(0.0..=1.0).contains(&self.asteroid_probability) {
            return Err(invalid(
                "asteroid_probability",
                format!("{} is outside [0, 1]", self.asteroid_probability),
            ));
        }
        if !(0.0..=1.0).contains(&self.coefficient_restitution) {
            return Err(invalid(
                "coefficient_restitution",
                format!("{} is outside [0, 1]", self.coefficient_restitution),
            ));
        }
        Ok(())
    }

    /// Per-frame budget in milliseconds (integer division, as the frame
    /// rate is a whole number of ticks per second).
    #[must_use]
    pub fn ms_per_frame(&self) -> u64 {
        MILLISECONDS_PER_SECOND / u64::from(self.frame_rate.max(1))
    }

    /// Restitution coefficient in simulation units.
    #[must_use]
    pub fn restitution(&self) -> Fixed {
        Fixed::from_num(self.coefficient_restitution)
    }
}

fn invalid(field: &'static str, message: impl Into<String>) -> GameError {
    GameError::InvalidConfig {
        field,
        message: message.into(),
    }
}
