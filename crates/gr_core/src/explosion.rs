//! Explosion lifecycle.
//!
//! An explosion is a stationary object that counts down from its life time.
//! Once the countdown reaches zero it becomes *triggered*, which is terminal:
//! the field removes triggered explosions on its next trim pass.

use std::fmt;

use crate::error::{GameError, Result};
use crate::math::{Fixed, Vec2Fixed};
use crate::objects::{ObjectKind, SpaceObject};

/// Frames an explosion left by an asteroid hit stays on the field.
pub const EXPLOSION_LIFE_TIME: i32 = 10;

/// A countdown object left behind by a destroyed asteroid.
#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    object: SpaceObject,
    life_time: i32,
    timer: i32,
    is_triggered: bool,
}

impl Explosion {
    /// Create an explosion that triggers after `life_time` updates.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidLifeTime`] when `life_time <= 0`, and
    /// [`GameError::InvalidObject`] for a negative radius or mass.
    pub fn new(life_time: i32, position: Vec2Fixed, radius: Fixed, mass: Fixed) -> Result<Self> {
        if life_time <= 0 {
            return Err(GameError::InvalidLifeTime(life_time));
        }
        let object = SpaceObject::new(
            ObjectKind::Explosion,
            position,
            Vec2Fixed::ZERO,
            radius,
            mass,
        )?;

        Ok(Self {
            object,
            life_time,
            timer: life_time,
            is_triggered: false,
        })
    }

    /// Explosion for an asteroid hit: default life time, no mass.
    pub(crate) fn from_impact(position: Vec2Fixed, radius: Fixed) -> Self {
        Self {
            object: SpaceObject::from_parts(
                ObjectKind::Explosion,
                position,
                Vec2Fixed::ZERO,
                radius.max(Fixed::ZERO),
                Fixed::ZERO,
            ),
            life_time: EXPLOSION_LIFE_TIME,
            timer: EXPLOSION_LIFE_TIME,
            is_triggered: false,
        }
    }

    /// Advance the countdown by one frame.
    pub fn update(&mut self) {
        self.timer = self.timer.saturating_sub(1);
        if self.timer <= 0 {
            self.is_triggered = true;
        }
    }

    /// Frames the explosion was created with.
    #[must_use]
    pub const fn life_time(&self) -> i32 {
        self.life_time
    }

    /// Frames left before triggering (may go negative after triggering).
    #[must_use]
    pub const fn timer(&self) -> i32 {
        self.timer
    }

    /// Whether the countdown has finished.
    #[must_use]
    pub const fn is_triggered(&self) -> bool {
        self.is_triggered
    }

    /// Underlying physical object.
    #[must_use]
    pub const fn object(&self) -> &SpaceObject {
        &self.object
    }

    /// Centre of the explosion.
    #[must_use]
    pub const fn position(&self) -> Vec2Fixed {
        self.object.position
    }
}

impl fmt::Display for Explosion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (timer {})", self.object, self.timer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn explosion(life_time: i32) -> Explosion {
        Explosion::new(
            life_time,
            Vec2Fixed::from_f64(1.0, 1.0),
            Fixed::from_num(1),
            Fixed::from_num(0),
        )
        .unwrap()
    }

    #[test]
    fn test_has_explosion_type_and_symbol() {
        let e = explosion(EXPLOSION_LIFE_TIME);
        assert_eq!(e.object().type_name(), "Explosion");
        assert_eq!(e.object().symbol(), '*');
        assert!(e.to_string().contains("Explosion"));
    }

    #[test]
    fn test_is_stationary() {
        assert_eq!(explosion(3).object().velocity, Vec2Fixed::ZERO);
    }

    #[test]
    fn test_triggered_after_life_time_frames() {
        let mut e = explosion(EXPLOSION_LIFE_TIME);
        for _ in 0..EXPLOSION_LIFE_TIME {
            e.update();
        }
        assert!(e.is_triggered());
    }

    #[test]
    fn test_rejects_non_positive_life_time() {
        let zero = Explosion::new(0, Vec2Fixed::ZERO, Fixed::from_num(1), Fixed::ZERO);
        let negative = Explosion::new(-3, Vec2Fixed::ZERO, Fixed::from_num(1), Fixed::ZERO);
        assert_eq!(zero, Err(GameError::InvalidLifeTime(0)));
        assert_eq!(negative, Err(GameError::InvalidLifeTime(-3)));
    }

    #[test]
    fn test_impact_explosion_uses_default_life_time() {
        let e = Explosion::from_impact(Vec2Fixed::from_f64(2.0, 3.0), Fixed::from_num(2));
        assert_eq!(e.life_time(), EXPLOSION_LIFE_TIME);
        assert_eq!(e.timer(), EXPLOSION_LIFE_TIME);
        assert_eq!(e.object().mass(), Fixed::ZERO);
        assert!(!e.is_triggered());
    }

    proptest! {
        #[test]
        fn prop_triggers_after_exactly_life_time_updates(
            life_time in 1i32..200,
            extra in 0u32..50,
        ) {
            let mut e = explosion(life_time);
            for _ in 0..life_time - 1 {
                e.update();
                prop_assert!(!e.is_triggered());
            }

            e.update();
            prop_assert!(e.is_triggered());

            for _ in 0..extra {
                e.update();
                prop_assert!(e.is_triggered());
            }
        }
    }
}
