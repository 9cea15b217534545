//! Force fields applied to every body before integration.
//!
//! Accumulators are cleared by the integrator after each tick, so anything
//! that should act continuously (gravity being the obvious case) is re-applied
//! at the start of every tick through a [`ForceField`].

use glam::DVec3;

use crate::types::{constants, RigidBody};

/// A source of force (and optionally torque) evaluated once per body per tick.
pub trait ForceField {
    /// Force on `body` for this tick, in Newtons.
    fn force(&self, body: &RigidBody) -> DVec3;

    /// Torque on `body` for this tick. Default: none.
    fn torque(&self, _body: &RigidBody) -> DVec3 {
        DVec3::ZERO
    }

    /// Push this field's contribution into the body's accumulators.
    ///
    /// Static bodies are skipped; they would discard the force anyway.
    fn apply(&self, body: &mut RigidBody) {
        if body.is_static() {
            return;
        }
        let force = self.force(body);
        let torque = self.torque(body);
        body.apply_force(force);
        body.apply_torque(torque);
    }
}

/// Uniform gravitational acceleration, applied as the force `m·g`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity(pub DVec3);

impl Default for Gravity {
    fn default() -> Self {
        Self(DVec3::new(0.0, -constants::GRAVITY, 0.0))
    }
}

impl ForceField for Gravity {
    fn force(&self, body: &RigidBody) -> DVec3 {
        if body.is_static() {
            DVec3::ZERO
        } else {
            self.0 / body.inverse_mass
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrator::SemiImplicitEuler;

    #[test]
    fn test_gravity_scales_with_mass() {
        let gravity = Gravity::default();
        let light = RigidBody::dynamic(DVec3::ZERO, 0.5, 1.0);
        let heavy = RigidBody::dynamic(DVec3::ZERO, 0.5, 4.0);

        let f_light = gravity.force(&light);
        let f_heavy = gravity.force(&heavy);

        assert!((f_light.y + constants::GRAVITY).abs() < 1e-12);
        assert!((f_heavy.y + 4.0 * constants::GRAVITY).abs() < 1e-12);
        assert_eq!(f_light.x, 0.0);
        assert_eq!(f_light.z, 0.0);
    }

    #[test]
    fn test_gravity_same_acceleration_for_any_mass() {
        let gravity = Gravity::default();
        let mut light = RigidBody::dynamic(DVec3::ZERO, 0.5, 0.3);
        let mut heavy = RigidBody::dynamic(DVec3::ZERO, 0.5, 30.0);

        gravity.apply(&mut light);
        gravity.apply(&mut heavy);
        SemiImplicitEuler::step(&mut light, 0.1);
        SemiImplicitEuler::step(&mut heavy, 0.1);

        assert!((light.velocity.y - heavy.velocity.y).abs() < 1e-12);
        assert!((light.velocity.y + 0.981).abs() < 1e-12);
    }

    #[test]
    fn test_gravity_skips_static_bodies() {
        let mut floor_ball = RigidBody::fixed(DVec3::ZERO, 1.0);
        Gravity::default().apply(&mut floor_ball);

        assert_eq!(floor_ball.accumulated_force, DVec3::ZERO);
    }

    #[test]
    fn test_custom_field_with_torque() {
        struct Spinner;

        impl ForceField for Spinner {
            fn force(&self, _body: &RigidBody) -> DVec3 {
                DVec3::ZERO
            }

            fn torque(&self, _body: &RigidBody) -> DVec3 {
                DVec3::new(0.0, 1.5, 0.0)
            }
        }

        let mut body = RigidBody::dynamic(DVec3::ZERO, 0.5, 1.0);
        Spinner.apply(&mut body);
        Spinner.apply(&mut body);

        assert_eq!(body.accumulated_torque, DVec3::new(0.0, 3.0, 0.0));
    }
}
