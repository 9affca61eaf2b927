//! Boundaries between the simulation and the outside world.
//!
//! The engine pulls player input from a [`Controller`], pushes frames to a
//! [`Visualizer`] and draws spawn parameters from a [`RandomGenerator`].
//! Implementations live outside this crate.

use serde::{Deserialize, Serialize};

use crate::field::SpaceField;

/// A single player instruction, consumed at most once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerCommand {
    /// Boost the ship upwards.
    MoveShipUp,
    /// Boost the ship downwards.
    MoveShipDown,
    /// Boost the ship to the left.
    MoveShipLeft,
    /// Boost the ship to the right.
    MoveShipRight,
    /// Fire a missile from the ship.
    LaunchMissile,
    /// Toggle between playing and paused.
    PauseGame,
}

/// Per-frame information handed to the visualizer alongside the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStatus {
    /// Number of ticks completed, including the one being rendered.
    pub tick: u64,
    /// Whether the simulation was paused during this tick.
    pub paused: bool,
}

/// Source of player commands.
pub trait Controller {
    /// Next pending command, if any.
    fn next_player_command(&mut self) -> Option<PlayerCommand>;
}

/// Sink for rendered frames.
pub trait Visualizer {
    /// Draw the field as it stands at the end of a tick.
    fn render_space_field(&mut self, field: &SpaceField, status: FrameStatus);
}

/// Random draws used for spawning.
pub trait RandomGenerator {
    /// Uniform draw in `[0, 1)`.
    fn generate_probability(&mut self) -> f64;

    /// Uniform draw in `[min, max]`.
    fn generate_double(&mut self, min: f64, max: f64) -> f64;
}

impl<T: Controller + ?Sized> Controller for &mut T {
    fn next_player_command(&mut self) -> Option<PlayerCommand> {
        (**self).next_player_command()
    }
}

impl<T: Visualizer + ?Sized> Visualizer for &mut T {
    fn render_space_field(&mut self, field: &SpaceField, status: FrameStatus) {
        (**self).render_space_field(field, status);
    }
}

impl<T: RandomGenerator + ?Sized> RandomGenerator for &mut T {
    fn generate_probability(&mut self) -> f64 {
        (**self).generate_probability()
    }

    fn generate_double(&mut self, min: f64, max: f64) -> f64 {
        (**self).generate_double(min, max)
    }
}

impl<T: Controller + ?Sized> Controller for Box<T> {
    fn next_player_command(&mut self) -> Option<PlayerCommand> {
        (**self).next_player_command()
    }
}

impl<T: Visualizer + ?Sized> Visualizer for Box<T> {
    fn render_space_field(&mut self, field: &SpaceField, status: FrameStatus) {
        (**self).render_space_field(field, status);
    }
}

impl<T: RandomGenerator + ?Sized> RandomGenerator for Box<T> {
    fn generate_probability(&mut self) -> f64 {
        (**self).generate_probability()
    }

    fn generate_double(&mut self, min: f64, max: f64) -> f64 {
        (**self).generate_double(min, max)
    }
}
