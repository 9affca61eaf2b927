//! Space objects living on the field.
//!
//! Every object shares the same physical data (position, velocity, radius,
//! mass) and carries an [`ObjectKind`] tag. Behaviour that depends on the
//! kind of object, such as scoring an asteroid hit, branches on that tag.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::math::{Fixed, Vec2Fixed};

/// The closed set of object kinds on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// The player ship.
    Ship,
    /// A drifting asteroid.
    Asteroid,
    /// A missile launched by the ship.
    Missile,
    /// A short-lived explosion left by an asteroid hit.
    Explosion,
}

impl ObjectKind {
    /// Human-readable type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ObjectKind::Ship => "SpaceShip",
            ObjectKind::Asteroid => "Asteroid",
            ObjectKind::Missile => "Missile",
            ObjectKind::Explosion => "Explosion",
        }
    }

    /// Single character used when drawing the field.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            ObjectKind::Ship => '@',
            ObjectKind::Asteroid => '.',
            ObjectKind::Missile => '^',
            ObjectKind::Explosion => '*',
        }
    }
}

/// A physical object on the field.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceObject {
    kind: ObjectKind,
    /// Centre of the object.
    pub position: Vec2Fixed,
    /// Displacement applied on every move.
    pub velocity: Vec2Fixed,
    radius: Fixed,
    mass: Fixed,
}

impl SpaceObject {
    /// Create an object, rejecting a negative radius or mass.
    pub fn new(
        kind: ObjectKind,
        position: Vec2Fixed,
        velocity: Vec2Fixed,
        radius: Fixed,
        mass: Fixed,
    ) -> Result<Self> {
        if radius < Fixed::ZERO {
            return Err(GameError::InvalidObject(format!(
                "{} radius must not be negative, got {}",
                kind.name(),
                radius
            )));
        }
        if mass < Fixed::ZERO {
            return Err(GameError::InvalidObject(format!(
                "{} mass must not be negative, got {}",
                kind.name(),
                mass
            )));
        }

        Ok(Self {
            kind,
            position,
            velocity,
            radius,
            mass,
        })
    }

    /// Build an object from values already known to be non-negative.
    pub(crate) fn from_parts(
        kind: ObjectKind,
        position: Vec2Fixed,
        velocity: Vec2Fixed,
        radius: Fixed,
        mass: Fixed,
    ) -> Self {
        debug_assert!(radius >= Fixed::ZERO && mass >= Fixed::ZERO);
        Self {
            kind,
            position,
            velocity,
            radius,
            mass,
        }
    }

    /// Kind tag.
    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Type name, e.g. `"Asteroid"`.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Display symbol.
    #[must_use]
    pub const fn symbol(&self) -> char {
        self.kind.symbol()
    }

    /// Collision radius.
    #[must_use]
    pub const fn radius(&self) -> Fixed {
        self.radius
    }

    /// Mass used by the collision response.
    #[must_use]
    pub const fn mass(&self) -> Fixed {
        self.mass
    }

    /// Advance the position by one step of velocity.
    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    /// Add to the current velocity.
    pub fn boost(&mut self, delta: Vec2Fixed) {
        self.velocity += delta;
    }

    /// Whether the two circles touch or overlap.
    #[must_use]
    pub fn impacts(&self, other: &SpaceObject) -> bool {
        let reach = self.radius + other.radius;
        self.position.distance_squared(other.position) <= reach * reach
    }

    /// Apply an impulse-based collision response along the line of centres.
    ///
    /// Both velocities are updated in place. Momentum is conserved and the
    /// normal component of the relative velocity is scaled by `-restitution`.
    /// Coincident centres have no collision normal and are left untouched, as
    /// is a pair whose combined mass is zero.
    pub fn collide_with(&mut self, other: &mut SpaceObject, restitution: Fixed) {
        let total_mass = self.mass + other.mass;
        if total_mass <= Fixed::ZERO {
            return;
        }

        let normal = (other.position - self.position).normalize();
        if normal == Vec2Fixed::ZERO {
            return;
        }

        let closing_speed = (self.velocity - other.velocity).dot(normal);
        let impulse = (Fixed::from_num(1) + restitution) * closing_speed;

        self.velocity = self.velocity - normal.scale(impulse * other.mass / total_mass);
        other.velocity = other.velocity + normal.scale(impulse * self.mass / total_mass);
    }
}

impl fmt::Display for SpaceObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} with velocity {}",
            self.type_name(),
            self.position,
            self.velocity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(kind: ObjectKind, x: f64, vx: f64, radius: f64, mass: f64) -> SpaceObject {
        SpaceObject::new(
            kind,
            Vec2Fixed::from_f64(x, 0.0),
            Vec2Fixed::from_f64(vx, 0.0),
            Fixed::from_num(radius),
            Fixed::from_num(mass),
        )
        .unwrap()
    }

    #[test]
    fn test_kind_names_and_symbols() {
        assert_eq!(ObjectKind::Explosion.name(), "Explosion");
        assert_eq!(ObjectKind::Explosion.symbol(), '*');
        assert_eq!(ObjectKind::Ship.symbol(), '@');
        assert_eq!(ObjectKind::Asteroid.symbol(), '.');
        assert_eq!(ObjectKind::Missile.symbol(), '^');
    }

    #[test]
    fn test_rejects_negative_radius() {
        let result = SpaceObject::new(
            ObjectKind::Asteroid,
            Vec2Fixed::ZERO,
            Vec2Fixed::ZERO,
            Fixed::from_num(-1),
            Fixed::from_num(1),
        );
        assert!(matches!(result, Err(GameError::InvalidObject(_))));
    }

    #[test]
    fn test_impacts_touching_circles() {
        let a = body(ObjectKind::Asteroid, 0.0, 0.0, 1.0, 1.0);
        let b = body(ObjectKind::Missile, 2.0, 0.0, 1.0, 1.0);
        let c = body(ObjectKind::Missile, 2.5, 0.0, 1.0, 1.0);
        assert!(a.impacts(&b));
        assert!(!a.impacts(&c));
    }

    #[test]
    fn test_perfectly_elastic_equal_masses_swap_velocities() {
        let mut a = body(ObjectKind::Asteroid, 0.0, 1.0, 1.0, 1.0);
        let mut b = body(ObjectKind::Asteroid, 1.5, 0.0, 1.0, 1.0);

        a.collide_with(&mut b, Fixed::from_num(1));

        let epsilon = Fixed::from_num(1) / Fixed::from_num(1000);
        assert!(a.velocity.x.abs() < epsilon);
        assert!((b.velocity.x - Fixed::from_num(1)).abs() < epsilon);
    }

    #[test]
    fn test_inelastic_collision_conserves_momentum() {
        let mut a = body(ObjectKind::Asteroid, 0.0, 2.0, 1.0, 3.0);
        let mut b = body(ObjectKind::Missile, 1.0, -1.0, 1.0, 1.0);
        let before = a.velocity.x * a.mass() + b.velocity.x * b.mass();

        a.collide_with(&mut b, Fixed::from_num(0.5));

        let after = a.velocity.x * a.mass() + b.velocity.x * b.mass();
        let epsilon = Fixed::from_num(1) / Fixed::from_num(1000);
        assert!((before - after).abs() < epsilon);

        // Relative normal speed is scaled by the restitution coefficient.
        let separation = b.velocity.x - a.velocity.x;
        assert!((separation - Fixed::from_num(1.5)).abs() < epsilon);
    }

    #[test]
    fn test_coincident_centres_are_left_alone() {
        let mut a = body(ObjectKind::Asteroid, 0.0, 1.0, 1.0, 1.0);
        let mut b = body(ObjectKind::Asteroid, 0.0, -1.0, 1.0, 1.0);
        a.collide_with(&mut b, Fixed::from_num(1));
        assert_eq!(a.velocity, Vec2Fixed::from_f64(1.0, 0.0));
        assert_eq!(b.velocity, Vec2Fixed::from_f64(-1.0, 0.0));
    }

    #[test]
    fn test_display_mentions_type() {
        let a = body(ObjectKind::Missile, 1.0, 0.0, 0.5, 1.0);
        assert!(a.to_string().contains("Missile"));
    }
}
