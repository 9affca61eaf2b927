//! One frame of the game.
//!
//! [`GameEngine`] owns the field and the three ports, and advances the match
//! one tick at a time. Pacing and persistence belong to the caller.
//!
//! # Tick order
//!
//! 1. **Input** - consume and apply at most one player command, paused or not
//! 2. **Simulation** (skipped while paused)
//!    - collision resolution
//!    - explosion countdown
//!    - movement
//!    - trimming
//!    - asteroid spawn draw
//! 3. **Render** - hand the field to the visualizer
//!
//! # Example
//!
//! ```
//! use gr_core::config::GameConfig;
//! use gr_core::engine::GameEngine;
//! use gr_core::field::SpaceField;
//! use gr_core::ports::{Controller, FrameStatus, PlayerCommand, RandomGenerator, Visualizer};
//!
//! struct Idle;
//! impl Controller for Idle {
//!     fn next_player_command(&mut self) -> Option<PlayerCommand> {
//!         None
//!     }
//! }
//! impl Visualizer for Idle {
//!     fn render_space_field(&mut self, _: &SpaceField, _: FrameStatus) {}
//! }
//! impl RandomGenerator for Idle {
//!     fn generate_probability(&mut self) -> f64 {
//!         1.0
//!     }
//!     fn generate_double(&mut self, min: f64, _: f64) -> f64 {
//!         min
//!     }
//! }
//!
//! let mut engine = GameEngine::new(GameConfig::default(), Idle, Idle, Idle).unwrap();
//! engine.execute_ticks(3);
//! assert_eq!(engine.tick_count(), 3);
//! assert!(engine.field().asteroids().is_empty());
//! ```

use crate::collision::{resolve_collisions, CollisionReport};
use crate::config::GameConfig;
use crate::error::Result;
use crate::field::{Direction, SpaceField};
use crate::math::Fixed;
use crate::ports::{Controller, FrameStatus, PlayerCommand, RandomGenerator, Visualizer};
use crate::score::Score;

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickEvents {
    /// Tick number, starting at 1 for the first tick.
    pub tick: u64,
    /// Command consumed this tick, if any.
    pub command: Option<PlayerCommand>,
    /// Whether the simulation step ran (false while paused).
    pub simulated: bool,
    /// Collision pass results.
    pub collisions: CollisionReport,
    /// Whether the spawn draw produced a new asteroid.
    pub asteroid_spawned: bool,
    /// Asteroids, missiles and explosions removed by trimming.
    pub objects_trimmed: usize,
}

/// Drives a match: input, simulation and rendering for each tick.
pub struct GameEngine<G, C, V> {
    config: GameConfig,
    restitution: Fixed,
    generator: G,
    controller: C,
    visualizer: V,
    field: SpaceField,
    playing: bool,
    tick: u64,
}

impl<G, C, V> GameEngine<G, C, V>
where
    G: RandomGenerator,
    C: Controller,
    V: Visualizer,
{
    /// Build an engine on a fresh field.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`](crate::error::GameError::InvalidConfig)
    /// if `config` fails validation.
    pub fn new(config: GameConfig, generator: G, controller: C, visualizer: V) -> Result<Self> {
        config.validate()?;
        let field = SpaceField::new(&config);
        Ok(Self {
            restitution: config.restitution(),
            config,
            generator,
            controller,
            visualizer,
            field,
            playing: true,
            tick: 0,
        })
    }

    /// Advance the match by one tick.
    pub fn tick(&mut self) -> TickEvents {
        self.tick += 1;
        let mut events = TickEvents {
            tick: self.tick,
            ..TickEvents::default()
        };

        events.command = self.process_player_input();

        if self.playing {
            self.update_space_objects(&mut events);
        }

        self.visualizer.render_space_field(
            &self.field,
            FrameStatus {
                tick: self.tick,
                paused: !self.playing,
            },
        );

        tracing::debug!(
            tick = self.tick,
            simulated = events.simulated,
            collisions = events.collisions.collisions,
            destroyed = events.collisions.asteroids_destroyed,
            "Tick complete"
        );

        #[cfg(debug_assertions)]
        {
            let hash = self.field.state_hash();
            tracing::trace!(tick = self.tick, state_hash = hash, "Field state hash");
        }

        events
    }

    /// Run `ticks` ticks back to back, without pacing.
    pub fn execute_ticks(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Consume and apply at most one pending player command.
    pub fn process_player_input(&mut self) -> Option<PlayerCommand> {
        let command = self.controller.next_player_command()?;

        match command {
            PlayerCommand::PauseGame => {
                self.playing = !self.playing;
                tracing::info!(playing = self.playing, "Pause toggled");
            }
            PlayerCommand::MoveShipUp => self.field.boost_ship(Direction::Up),
            PlayerCommand::MoveShipDown => self.field.boost_ship(Direction::Down),
            PlayerCommand::MoveShipLeft => self.field.boost_ship(Direction::Left),
            PlayerCommand::MoveShipRight => self.field.boost_ship(Direction::Right),
            PlayerCommand::LaunchMissile => self.field.generate_missile(),
        }

        Some(command)
    }

    fn update_space_objects(&mut self, events: &mut TickEvents) {
        events.simulated = true;

        events.collisions = resolve_collisions(&mut self.field, self.restitution);

        self.field.update_explosions();

        self.field.move_ship();
        self.field.move_asteroids();
        self.field.move_missiles();

        events.objects_trimmed = self.field.trim_asteroids()
            + self.field.trim_missiles()
            + self.field.trim_explosions();

        if self.generator.generate_probability() <= self.config.asteroid_probability {
            self.field.generate_asteroid(&mut self.generator);
            events.asteroid_spawned = true;
        }
    }

    /// Ticks executed so far.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Whether the simulation is running (not paused).
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    /// Engine configuration.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The playing field.
    #[must_use]
    pub const fn field(&self) -> &SpaceField {
        &self.field
    }

    /// Mutable access to the field, for scenario setup.
    pub fn field_mut(&mut self) -> &mut SpaceField {
        &mut self.field
    }

    /// Score of the match in progress.
    #[must_use]
    pub const fn score(&self) -> &Score {
        self.field.score()
    }

    /// The input port.
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// The render port.
    pub fn visualizer(&self) -> &V {
        &self.visualizer
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::math::Vec2Fixed;
    use crate::objects::{ObjectKind, SpaceObject};

    #[derive(Default)]
    struct Script(VecDeque<Option<PlayerCommand>>);

    impl Controller for Script {
        fn next_player_command(&mut self) -> Option<PlayerCommand> {
            self.0.pop_front().flatten()
        }
    }

    #[derive(Default)]
    struct Frames(Vec<FrameStatus>);

    impl Visualizer for Frames {
        fn render_space_field(&mut self, _field: &SpaceField, status: FrameStatus) {
            self.0.push(status);
        }
    }

    /// Never spawns; spawn parameters are the range midpoints.
    struct NoSpawn;

    impl RandomGenerator for NoSpawn {
        fn generate_probability(&mut self) -> f64 {
            1.0
        }

        fn generate_double(&mut self, min: f64, max: f64) -> f64 {
            (min + max) / 2.0
        }
    }

    struct AlwaysSpawn;

    impl RandomGenerator for AlwaysSpawn {
        fn generate_probability(&mut self) -> f64 {
            0.0
        }

        fn generate_double(&mut self, min: f64, max: f64) -> f64 {
            (min + max) / 2.0
        }
    }

    fn engine(
        commands: Vec<Option<PlayerCommand>>,
    ) -> GameEngine<NoSpawn, Script, Frames> {
        GameEngine::new(
            GameConfig::default(),
            NoSpawn,
            Script(commands.into()),
            Frames::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = GameConfig {
            frame_rate: 0,
            ..Default::default()
        };
        assert!(GameEngine::new(config, NoSpawn, Script::default(), Frames::default()).is_err());
    }

    #[test]
    fn test_idle_ticks_render_every_frame() {
        let mut engine = engine(vec![]);
        engine.execute_ticks(5);
        let frames = &engine.visualizer().0;
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[4].tick, 5);
        assert!(frames.iter().all(|f| !f.paused));
    }

    #[test]
    fn test_launch_missile_moves_it_same_tick() {
        let mut engine = engine(vec![Some(PlayerCommand::LaunchMissile)]);
        let mut reference = SpaceField::new(&GameConfig::default());
        reference.generate_missile();
        reference.move_missiles();

        let events = engine.tick();

        assert_eq!(events.command, Some(PlayerCommand::LaunchMissile));
        assert_eq!(engine.field().missiles().len(), 1);
        assert_eq!(
            engine.field().missiles()[0].position,
            reference.missiles()[0].position
        );
    }

    #[test]
    fn test_one_command_per_tick() {
        let mut engine = engine(vec![
            Some(PlayerCommand::LaunchMissile),
            Some(PlayerCommand::LaunchMissile),
        ]);
        engine.tick();
        assert_eq!(engine.field().missiles().len(), 1);
        engine.tick();
        assert_eq!(engine.field().missiles().len(), 2);
    }

    #[test]
    fn test_pause_freezes_simulation_but_renders() {
        let mut engine = engine(vec![
            None,
            Some(PlayerCommand::PauseGame),
            None,
            Some(PlayerCommand::PauseGame),
            None,
        ]);
        engine
            .field_mut()
            .place_asteroid(
                SpaceObject::new(
                    ObjectKind::Asteroid,
                    Vec2Fixed::from_f64(2.0, 15.0),
                    Vec2Fixed::from_f64(0.0, -1.0),
                    Fixed::from_num(1),
                    Fixed::from_num(10),
                )
                .unwrap(),
            )
            .unwrap();

        let mut heights = Vec::new();
        for _ in 0..5 {
            let events = engine.tick();
            heights.push((events.simulated, engine.field().asteroids()[0].position.y));
        }

        let expected = [
            (true, Fixed::from_num(14)),
            (false, Fixed::from_num(14)),
            (false, Fixed::from_num(14)),
            (true, Fixed::from_num(13)),
            (true, Fixed::from_num(12)),
        ];
        assert_eq!(heights, expected);
        let paused: Vec<bool> = engine.visualizer().0.iter().map(|f| f.paused).collect();
        assert_eq!(paused, vec![false, true, true, false, false]);
    }

    #[test]
    fn test_commands_apply_while_paused_but_objects_stay_frozen() {
        let mut engine = engine(vec![
            Some(PlayerCommand::PauseGame),
            Some(PlayerCommand::LaunchMissile),
            Some(PlayerCommand::MoveShipRight),
            None,
            Some(PlayerCommand::PauseGame),
        ]);
        let mut launched = SpaceField::new(&GameConfig::default());
        launched.generate_missile();
        let launch_position = launched.missiles()[0].position;
        let ship_position = engine.field().ship().position;

        engine.execute_ticks(4);

        assert!(!engine.is_playing());
        assert_eq!(engine.field().missiles().len(), 1);
        assert_eq!(engine.field().missiles()[0].position, launch_position);
        assert_eq!(
            engine.field().ship().velocity,
            Vec2Fixed::from_f64(1.0, 0.0)
        );
        assert_eq!(engine.field().ship().position, ship_position);

        let events = engine.tick();

        assert!(events.simulated);
        assert!(engine.field().missiles()[0].position.y > launch_position.y);
        assert!(engine.field().ship().position.x > ship_position.x);
    }

    #[test]
    fn test_spawn_draw_at_threshold_spawns() {
        let mut engine = GameEngine::new(
            GameConfig::default(),
            AlwaysSpawn,
            Script::default(),
            Frames::default(),
        )
        .unwrap();
        let events = engine.tick();
        assert!(events.asteroid_spawned);
        assert_eq!(engine.field().asteroids().len(), 1);
    }

    #[test]
    fn test_explosion_expires_after_life_time() {
        let mut engine = engine(vec![]);
        engine
            .field_mut()
            .generate_explosion(Vec2Fixed::from_f64(3.0, 3.0), Fixed::from_num(1));
        engine.execute_ticks(9);
        assert_eq!(engine.field().explosions().len(), 1);
        engine.tick();
        assert!(engine.field().explosions().is_empty());
    }
}
