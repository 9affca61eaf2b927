//! Pairwise collision resolution.
//!
//! Every unordered pair of colliding objects (ship, asteroids, missiles) is
//! tested once per tick. Touching pairs get an elastic response; an
//! asteroid/missile pair additionally scores the asteroid and leaves an
//! explosion at its centre. Explosions are not part of the scan.

use crate::field::SpaceField;
use crate::math::{Fixed, Vec2Fixed};
use crate::objects::{ObjectKind, SpaceObject};
use crate::pairs::for_each_pair_mut;

/// What one resolution pass did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionReport {
    /// Pairs that touched and received a collision response.
    pub collisions: u32,
    /// Asteroid/missile hits, each of which spawned one explosion.
    pub asteroids_destroyed: u32,
    /// Points added to the match score.
    pub score_gained: f64,
}

/// An asteroid hit recorded during the scan, applied once the scan is done.
#[derive(Debug, Clone, Copy)]
struct AsteroidHit {
    position: Vec2Fixed,
    radius: Fixed,
    value: f64,
}

/// Points awarded for destroying an asteroid: `mass + radius / 2`.
#[must_use]
pub fn explosion_score(asteroid: &SpaceObject) -> f64 {
    (asteroid.mass() + asteroid.radius() * Fixed::from_num(0.5)).to_num::<f64>()
}

/// The asteroid of an asteroid/missile pair, in either order.
fn asteroid_of_hit<'a>(first: &'a SpaceObject, second: &'a SpaceObject) -> Option<&'a SpaceObject> {
    match (first.kind(), second.kind()) {
        (ObjectKind::Asteroid, ObjectKind::Missile) => Some(first),
        (ObjectKind::Missile, ObjectKind::Asteroid) => Some(second),
        _ => None,
    }
}

/// Resolve every colliding pair on the field once.
pub fn resolve_collisions(field: &mut SpaceField, restitution: Fixed) -> CollisionReport {
    let mut report = CollisionReport::default();
    let mut hits = Vec::new();

    {
        let mut objects = field.colliding_objects_mut();
        for_each_pair_mut(&mut objects, |first, second| {
            if !first.impacts(second) {
                return;
            }

            first.collide_with(second, restitution);
            report.collisions += 1;

            if let Some(asteroid) = asteroid_of_hit(first, second) {
                hits.push(AsteroidHit {
                    position: asteroid.position,
                    radius: asteroid.radius(),
                    value: explosion_score(asteroid),
                });
            }
        });
    }

    for hit in hits {
        field.generate_explosion(hit.position, hit.radius);
        field.score_mut().record_destroyed(hit.value);
        report.asteroids_destroyed += 1;
        report.score_gained += hit.value;
        tracing::debug!(
            position = %hit.position,
            value = hit.value,
            "Asteroid destroyed"
        );
    }

    report
}
