//! # Galaxy Raiders Core
//!
//! Simulation core for Galaxy Raiders, a small 2D arcade shooter.
//!
//! This crate contains **only** game logic:
//! - No rendering
//! - No IO
//! - No system randomness (spawn draws come through [`ports::RandomGenerator`])
//! - Fixed-point geometry
//!
//! Frame pacing, score files, the terminal renderer and keyboard input live in
//! `gr_runner`.
//!
//! ## Crate Structure
//!
//! - [`engine`] - Tick sequence (input, simulation, render)
//! - [`collision`] - Pairwise collision resolution and scoring
//! - [`field`] - Live objects with spawn, move and trim operations
//! - [`explosion`] - Explosion countdown
//! - [`objects`] - Ship, asteroid, missile and explosion bodies
//! - [`score`] - Match score and leaderboard ranking
//! - [`ports`] - Controller, visualizer and random generator traits
//! - [`math`] - Fixed-point math utilities

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod collision;
pub mod config;
pub mod engine;
pub mod error;
pub mod explosion;
pub mod field;
pub mod math;
pub mod objects;
pub mod pairs;
pub mod ports;
pub mod score;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::collision::{resolve_collisions, CollisionReport};
    pub use crate::config::GameConfig;
    pub use crate::engine::{GameEngine, TickEvents};
    pub use crate::error::{GameError, Result};
    pub use crate::explosion::{Explosion, EXPLOSION_LIFE_TIME};
    pub use crate::field::{Direction, SpaceField};
    pub use crate::math::{Fixed, Vec2Fixed};
    pub use crate::objects::{ObjectKind, SpaceObject};
    pub use crate::ports::{Controller, FrameStatus, PlayerCommand, RandomGenerator, Visualizer};
    pub use crate::score::{top_scores, Score, LEADERBOARD_SIZE};
}
