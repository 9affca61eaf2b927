//! Test fixtures and helpers.
//!
//! Scripted stand-ins for the engine's ports, plus object builders for
//! setting up field scenarios.

use std::collections::VecDeque;

use fixed::types::I32F32;
use gr_core::config::GameConfig;
use gr_core::field::SpaceField;
use gr_core::math::Vec2Fixed;
use gr_core::objects::{ObjectKind, SpaceObject};
use gr_core::ports::{Controller, FrameStatus, PlayerCommand, RandomGenerator, Visualizer};

/// Create a fixed-point number from an integer.
#[must_use]
pub fn fixed(n: i32) -> I32F32 {
    I32F32::from_num(n)
}

/// Create a fixed-point number from a float (for tests only).
#[must_use]
pub fn fixed_f(n: f64) -> I32F32 {
    I32F32::from_num(n)
}

/// Default configuration with asteroid spawning disabled.
#[must_use]
pub fn quiet_config() -> GameConfig {
    GameConfig {
        asteroid_probability: 0.0,
        ..GameConfig::default()
    }
}

/// An asteroid with explicit geometry.
///
/// # Panics
///
/// Panics if `radius` or `mass` is negative.
#[must_use]
pub fn asteroid(position: (f64, f64), velocity: (f64, f64), radius: f64, mass: f64) -> SpaceObject {
    body(ObjectKind::Asteroid, position, velocity, radius, mass)
}

/// A missile with the standard radius and mass.
///
/// # Panics
///
/// Panics if the standard missile parameters are rejected.
#[must_use]
pub fn missile(position: (f64, f64), velocity: (f64, f64)) -> SpaceObject {
    body(
        ObjectKind::Missile,
        position,
        velocity,
        gr_core::field::MISSILE_RADIUS,
        gr_core::field::MISSILE_MASS,
    )
}

fn body(
    kind: ObjectKind,
    (x, y): (f64, f64),
    (vx, vy): (f64, f64),
    radius: f64,
    mass: f64,
) -> SpaceObject {
    SpaceObject::new(
        kind,
        Vec2Fixed::from_f64(x, y),
        Vec2Fixed::from_f64(vx, vy),
        fixed_f(radius),
        fixed_f(mass),
    )
    .expect("fixture object parameters must be non-negative")
}

/// Controller that replays a fixed list of per-tick inputs.
///
/// Each tick pops one entry; `None` entries are idle ticks. Once the script
/// runs out, every tick is idle.
#[derive(Debug, Clone, Default)]
pub struct ScriptedController {
    script: VecDeque<Option<PlayerCommand>>,
    consumed: usize,
}

impl ScriptedController {
    /// Controller that never issues a command.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// Controller replaying `script`, one entry per tick.
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = Option<PlayerCommand>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Number of polls answered so far.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.consumed
    }
}

impl Controller for ScriptedController {
    fn next_player_command(&mut self) -> Option<PlayerCommand> {
        self.consumed += 1;
        self.script.pop_front().flatten()
    }
}

/// A snapshot of one rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    /// Status the engine passed alongside the field.
    pub status: FrameStatus,
    /// Ship position at render time.
    pub ship_position: Vec2Fixed,
    /// Live asteroid count.
    pub asteroids: usize,
    /// Live missile count.
    pub missiles: usize,
    /// Live explosion count.
    pub explosions: usize,
    /// Field hash at render time.
    pub state_hash: u64,
}

/// Visualizer that records a summary of every frame it is given.
#[derive(Debug, Clone, Default)]
pub struct RecordingVisualizer {
    frames: Vec<RenderedFrame>,
}

impl RecordingVisualizer {
    /// Empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every frame rendered so far, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[RenderedFrame] {
        &self.frames
    }
}

impl Visualizer for RecordingVisualizer {
    fn render_space_field(&mut self, field: &SpaceField, status: FrameStatus) {
        self.frames.push(RenderedFrame {
            status,
            ship_position: field.ship().position,
            asteroids: field.asteroids().len(),
            missiles: field.missiles().len(),
            explosions: field.explosions().len(),
            state_hash: field.state_hash(),
        });
    }
}

/// Random generator with scripted spawn draws.
///
/// Probability draws are popped from a queue and fall back to `1.0` (never
/// spawn) once it is empty. Range draws return the midpoint of the range.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGenerator {
    probabilities: VecDeque<f64>,
}

impl ScriptedGenerator {
    /// Generator that never spawns.
    #[must_use]
    pub fn never() -> Self {
        Self::default()
    }

    /// Generator replaying `probabilities`, one per spawn draw.
    #[must_use]
    pub fn new(probabilities: impl IntoIterator<Item = f64>) -> Self {
        Self {
            probabilities: probabilities.into_iter().collect(),
        }
    }
}

impl RandomGenerator for ScriptedGenerator {
    fn generate_probability(&mut self) -> f64 {
        self.probabilities.pop_front().unwrap_or(1.0)
    }

    fn generate_double(&mut self, min: f64, max: f64) -> f64 {
        (min + max) / 2.0
    }
}

/// Small linear congruential generator for reproducible noisy scenarios.
///
/// Deterministic for a given seed and independent of any external crate's
/// algorithm, so determinism tests in the core do not depend on the runner.
#[derive(Debug, Clone)]
pub struct LcgGenerator {
    state: u64,
}

impl LcgGenerator {
    /// Generator seeded with `seed`.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_unit(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.state >> 11) as f64 / (1u64 << 53) as f64
    }
}

impl RandomGenerator for LcgGenerator {
    fn generate_probability(&mut self) -> f64 {
        self.next_unit()
    }

    fn generate_double(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_unit()
    }
}
