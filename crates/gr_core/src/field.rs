//! The playing field and its live objects.
//!
//! [`SpaceField`] owns the ship, the asteroid, missile and explosion
//! collections, and the running [`Score`] of the current match. It knows how
//! to spawn, move and trim objects; deciding *when* to do so is the engine's
//! job.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::explosion::Explosion;
use crate::math::{Fixed, Vec2Fixed};
use crate::objects::{ObjectKind, SpaceObject};
use crate::ports::RandomGenerator;
use crate::score::Score;

/// Ship collision radius.
pub const SHIP_RADIUS: f64 = 1.0;
/// Ship mass.
pub const SHIP_MASS: f64 = 10.0;
/// Velocity change applied by one boost command.
pub const SHIP_BOOST: f64 = 1.0;

/// Missile collision radius.
pub const MISSILE_RADIUS: f64 = 0.2;
/// Missile mass.
pub const MISSILE_MASS: f64 = 1.0;
/// Upward speed of a freshly launched missile.
pub const MISSILE_SPEED: f64 = 1.0;
/// Clearance between the ship hull and a new missile.
const MISSILE_LAUNCH_GAP: f64 = 0.1;

/// Range of asteroid radii drawn at spawn.
pub const ASTEROID_RADIUS_RANGE: (f64, f64) = (0.5, 2.0);
/// Range of asteroid masses drawn at spawn.
pub const ASTEROID_MASS_RANGE: (f64, f64) = (500.0, 1000.0);
/// Range of horizontal asteroid drift.
pub const ASTEROID_DRIFT_RANGE: (f64, f64) = (-0.5, 0.5);
/// Range of downward asteroid speed.
pub const ASTEROID_SPEED_RANGE: (f64, f64) = (0.5, 1.5);

/// Direction of a ship boost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the top edge.
    Up,
    /// Towards the bottom edge.
    Down,
    /// Towards the left edge.
    Left,
    /// Towards the right edge.
    Right,
}

impl Direction {
    fn unit(self) -> Vec2Fixed {
        match self {
            Direction::Up => Vec2Fixed::from_f64(0.0, 1.0),
            Direction::Down => Vec2Fixed::from_f64(0.0, -1.0),
            Direction::Left => Vec2Fixed::from_f64(-1.0, 0.0),
            Direction::Right => Vec2Fixed::from_f64(1.0, 0.0),
        }
    }
}

/// Bounded 2D playing area with its live objects.
///
/// Coordinates run from `(0, 0)` at the bottom-left corner to
/// `(width, height)` at the top-right one.
#[derive(Debug, Clone)]
pub struct SpaceField {
    width: Fixed,
    height: Fixed,
    ship: SpaceObject,
    asteroids: Vec<SpaceObject>,
    missiles: Vec<SpaceObject>,
    explosions: Vec<Explosion>,
    score: Score,
}

impl SpaceField {
    /// Create an empty field with the ship at the bottom centre.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let width = Fixed::from_num(config.space_field_width);
        let height = Fixed::from_num(config.space_field_height);
        let ship = SpaceObject::from_parts(
            ObjectKind::Ship,
            Vec2Fixed::new(width / Fixed::from_num(2), Fixed::from_num(SHIP_RADIUS)),
            Vec2Fixed::ZERO,
            Fixed::from_num(SHIP_RADIUS),
            Fixed::from_num(SHIP_MASS),
        );

        Self {
            width,
            height,
            ship,
            asteroids: Vec::new(),
            missiles: Vec::new(),
            explosions: Vec::new(),
            score: Score::new(),
        }
    }

    /// Field width.
    #[must_use]
    pub const fn width(&self) -> Fixed {
        self.width
    }

    /// Field height.
    #[must_use]
    pub const fn height(&self) -> Fixed {
        self.height
    }

    /// The player ship.
    #[must_use]
    pub const fn ship(&self) -> &SpaceObject {
        &self.ship
    }

    /// Mutable access to the ship, for scenario setup.
    pub fn ship_mut(&mut self) -> &mut SpaceObject {
        &mut self.ship
    }

    /// Live asteroids.
    #[must_use]
    pub fn asteroids(&self) -> &[SpaceObject] {
        &self.asteroids
    }

    /// Live missiles.
    #[must_use]
    pub fn missiles(&self) -> &[SpaceObject] {
        &self.missiles
    }

    /// Live explosions.
    #[must_use]
    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    /// Score of the match in progress.
    #[must_use]
    pub const fn score(&self) -> &Score {
        &self.score
    }

    pub(crate) fn score_mut(&mut self) -> &mut Score {
        &mut self.score
    }

    /// Every object on the field, explosions included, in drawing order.
    pub fn space_objects(&self) -> impl Iterator<Item = &SpaceObject> {
        std::iter::once(&self.ship)
            .chain(self.asteroids.iter())
            .chain(self.missiles.iter())
            .chain(self.explosions.iter().map(Explosion::object))
    }

    /// Objects that take part in collisions: ship, asteroids, missiles.
    pub(crate) fn colliding_objects_mut(&mut self) -> Vec<&mut SpaceObject> {
        std::iter::once(&mut self.ship)
            .chain(self.asteroids.iter_mut())
            .chain(self.missiles.iter_mut())
            .collect()
    }

    // ------------------------------------------------------------------
    // Spawning
    // ------------------------------------------------------------------

    /// Apply a boost to the ship.
    pub fn boost_ship(&mut self, direction: Direction) {
        let delta = direction.unit().scale(Fixed::from_num(SHIP_BOOST));
        self.ship.boost(delta);
    }

    /// Launch a missile just above the ship, heading up.
    pub fn generate_missile(&mut self) {
        let offset = self.ship.radius()
            + Fixed::from_num(MISSILE_RADIUS)
            + Fixed::from_num(MISSILE_LAUNCH_GAP);
        let missile = SpaceObject::from_parts(
            ObjectKind::Missile,
            self.ship.position + Vec2Fixed::new(Fixed::ZERO, offset),
            Vec2Fixed::from_f64(0.0, MISSILE_SPEED),
            Fixed::from_num(MISSILE_RADIUS),
            Fixed::from_num(MISSILE_MASS),
        );
        tracing::trace!(position = %missile.position, "Missile launched");
        self.missiles.push(missile);
    }

    /// Spawn an asteroid on the top edge with randomly drawn parameters.
    pub fn generate_asteroid(&mut self, generator: &mut dyn RandomGenerator) {
        let x = generator.generate_double(0.0, self.width.to_num::<f64>());
        let drift = generator.generate_double(ASTEROID_DRIFT_RANGE.0, ASTEROID_DRIFT_RANGE.1);
        let speed = generator.generate_double(ASTEROID_SPEED_RANGE.0, ASTEROID_SPEED_RANGE.1);
        let radius = generator.generate_double(ASTEROID_RADIUS_RANGE.0, ASTEROID_RADIUS_RANGE.1);
        let mass = generator.generate_double(ASTEROID_MASS_RANGE.0, ASTEROID_MASS_RANGE.1);

        let asteroid = SpaceObject::from_parts(
            ObjectKind::Asteroid,
            Vec2Fixed::new(Fixed::from_num(x), self.height),
            Vec2Fixed::from_f64(drift, -speed),
            Fixed::from_num(radius.max(0.0)),
            Fixed::from_num(mass.max(0.0)),
        );
        tracing::trace!(position = %asteroid.position, "Asteroid spawned");
        self.asteroids.push(asteroid);
    }

    /// Leave an explosion where an asteroid was hit.
    pub fn generate_explosion(&mut self, position: Vec2Fixed, radius: Fixed) {
        self.explosions.push(Explosion::from_impact(position, radius));
    }

    /// Put a prepared asteroid on the field.
    pub fn place_asteroid(&mut self, asteroid: SpaceObject) -> Result<()> {
        expect_kind(&asteroid, ObjectKind::Asteroid)?;
        self.asteroids.push(asteroid);
        Ok(())
    }

    /// Put a prepared missile on the field.
    pub fn place_missile(&mut self, missile: SpaceObject) -> Result<()> {
        expect_kind(&missile, ObjectKind::Missile)?;
        self.missiles.push(missile);
        Ok(())
    }

    /// Put a prepared explosion on the field.
    pub fn place_explosion(&mut self, explosion: Explosion) {
        self.explosions.push(explosion);
    }

    // ------------------------------------------------------------------
    // Movement
    // ------------------------------------------------------------------

    /// Move the ship, keeping it inside the field.
    pub fn move_ship(&mut self) {
        self.ship.advance();
        self.ship.position = self.ship.position.clamp_to(self.width, self.height);
    }

    /// Move every asteroid by its velocity.
    pub fn move_asteroids(&mut self) {
        self.asteroids.iter_mut().for_each(SpaceObject::advance);
    }

    /// Move every missile by its velocity.
    pub fn move_missiles(&mut self) {
        self.missiles.iter_mut().for_each(SpaceObject::advance);
    }

    // ------------------------------------------------------------------
    // Lifecycle and trimming
    // ------------------------------------------------------------------

    /// Advance every explosion countdown by one frame.
    pub fn update_explosions(&mut self) {
        self.explosions.iter_mut().for_each(Explosion::update);
    }

    /// Drop asteroids that left the field. Returns how many were removed.
    pub fn trim_asteroids(&mut self) -> usize {
        let (width, height) = (self.width, self.height);
        let before = self.asteroids.len();
        self.asteroids.retain(|a| inside(a.position, width, height));
        before - self.asteroids.len()
    }

    /// Drop missiles that left the field. Returns how many were removed.
    pub fn trim_missiles(&mut self) -> usize {
        let (width, height) = (self.width, self.height);
        let before = self.missiles.len();
        self.missiles.retain(|m| inside(m.position, width, height));
        before - self.missiles.len()
    }

    /// Drop triggered explosions. Returns how many were removed.
    pub fn trim_explosions(&mut self) -> usize {
        let before = self.explosions.len();
        self.explosions.retain(|e| !e.is_triggered());
        before - self.explosions.len()
    }

    /// Hash of every object and the running score.
    ///
    /// Two fields fed identical inputs produce identical hashes.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();

        for object in self.space_objects() {
            object.kind().hash(&mut hasher);
            object.position.hash(&mut hasher);
            object.velocity.hash(&mut hasher);
            object.radius().hash(&mut hasher);
            object.mass().hash(&mut hasher);
        }
        for explosion in &self.explosions {
            explosion.timer().hash(&mut hasher);
        }

        self.score.final_score.to_bits().hash(&mut hasher);
        self.score.destroyed_asteroids.hash(&mut hasher);

        hasher.finish()
    }
}

fn inside(position: Vec2Fixed, width: Fixed, height: Fixed) -> bool {
    (Fixed::ZERO..=width).contains(&position.x) && (Fixed::ZERO..=height).contains(&position.y)
}

fn expect_kind(object: &SpaceObject, kind: ObjectKind) -> Result<()> {
    if object.kind() == kind {
        Ok(())
    } else {
        Err(GameError::InvalidObject(format!(
            "expected {}, got {}",
            kind.name(),
            object.type_name()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MidpointGenerator;

    impl RandomGenerator for MidpointGenerator {
        fn generate_probability(&mut self) -> f64 {
            0.5
        }

        fn generate_double(&mut self, min: f64, max: f64) -> f64 {
            (min + max) / 2.0
        }
    }

    fn field() -> SpaceField {
        SpaceField::new(&GameConfig::default())
    }

    fn asteroid_at(x: f64, y: f64, vx: f64, vy: f64) -> SpaceObject {
        SpaceObject::new(
            ObjectKind::Asteroid,
            Vec2Fixed::from_f64(x, y),
            Vec2Fixed::from_f64(vx, vy),
            Fixed::from_num(1),
            Fixed::from_num(10),
        )
        .unwrap()
    }

    #[test]
    fn test_new_field_has_only_ship() {
        let f = field();
        assert_eq!(f.space_objects().count(), 1);
        assert_eq!(f.ship().kind(), ObjectKind::Ship);
        assert_eq!(f.ship().position, Vec2Fixed::from_f64(6.0, SHIP_RADIUS));
        assert_eq!(*f.score(), Score::new());
    }

    #[test]
    fn test_boost_ship_changes_velocity() {
        let mut f = field();
        f.boost_ship(Direction::Up);
        f.boost_ship(Direction::Right);
        assert_eq!(f.ship().velocity, Vec2Fixed::from_f64(1.0, 1.0));
    }

    #[test]
    fn test_ship_stays_inside_field() {
        let mut f = field();
        f.boost_ship(Direction::Down);
        f.boost_ship(Direction::Down);
        f.move_ship();
        assert_eq!(f.ship().position.y, Fixed::ZERO);
    }

    #[test]
    fn test_missile_spawns_clear_of_ship() {
        let mut f = field();
        f.generate_missile();
        let missile = &f.missiles()[0];
        assert_eq!(missile.kind(), ObjectKind::Missile);
        assert!(missile.position.y > f.ship().position.y);
        assert!(!missile.impacts(f.ship()));
    }

    #[test]
    fn test_asteroid_spawns_on_top_edge() {
        let mut f = field();
        f.generate_asteroid(&mut MidpointGenerator);
        let asteroid = &f.asteroids()[0];
        assert_eq!(asteroid.position.y, f.height());
        assert_eq!(asteroid.position.x, Fixed::from_num(6));
        assert!(asteroid.velocity.y < Fixed::ZERO);
    }

    #[test]
    fn test_explosions_do_not_move() {
        let mut f = field();
        f.generate_explosion(Vec2Fixed::from_f64(3.0, 3.0), Fixed::from_num(1));
        f.move_asteroids();
        f.move_missiles();
        f.move_ship();
        assert_eq!(f.explosions()[0].position(), Vec2Fixed::from_f64(3.0, 3.0));
    }

    #[test]
    fn test_trim_removes_objects_outside() {
        let mut f = field();
        f.place_asteroid(asteroid_at(5.0, 1.0, 0.0, -2.0)).unwrap();
        f.place_asteroid(asteroid_at(5.0, 10.0, 0.0, -1.0)).unwrap();
        f.move_asteroids();
        assert_eq!(f.trim_asteroids(), 1);
        assert_eq!(f.asteroids().len(), 1);
    }

    #[test]
    fn test_trim_removes_only_triggered_explosions() {
        let mut f = field();
        f.place_explosion(
            Explosion::new(1, Vec2Fixed::ZERO, Fixed::from_num(1), Fixed::ZERO).unwrap(),
        );
        f.place_explosion(
            Explosion::new(5, Vec2Fixed::ZERO, Fixed::from_num(1), Fixed::ZERO).unwrap(),
        );
        f.update_explosions();
        assert_eq!(f.trim_explosions(), 1);
        assert!(f.explosions().iter().all(|e| !e.is_triggered()));
    }

    #[test]
    fn test_place_rejects_wrong_kind() {
        let mut f = field();
        let result = f.place_missile(asteroid_at(1.0, 1.0, 0.0, 0.0));
        assert!(matches!(result, Err(GameError::InvalidObject(_))));
    }

    #[test]
    fn test_state_hash_tracks_changes() {
        let a = field();
        let mut b = field();
        assert_eq!(a.state_hash(), b.state_hash());
        b.generate_missile();
        assert_ne!(a.state_hash(), b.state_hash());
    }
}
