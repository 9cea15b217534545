//! Contact response: positional correction followed by velocity impulses.
//!
//! ## Floor contacts
//!
//! The floor is an infinite-mass plane. The body is snapped back onto it, the
//! normal velocity is reflected with restitution, and Coulomb friction acts at
//! the contact point:
//!
//! ```text
//!        ω ↻
//!         ●      v_contact = v + ω × r,   r = (0, -R, 0)
//!         │ r
//! ════════╳══════ floor
//!    slip = v_contact projected on the floor plane
//! ```
//!
//! The friction impulse is the one that would stop the slip outright, capped at
//! `μ · jn`. It changes both the linear and the angular velocity, so a ball
//! sliding on the floor is gradually brought into rolling.
//!
//! ## Sphere pairs
//!
//! Penetration is split between the two bodies by inverse mass, then a normal
//! impulse with restitution is applied if they are approaching. Sphere pairs
//! exchange no friction and no torque.

use glam::DVec3;

use super::detection::{floor_penetration, sphere_overlap, SphereContact};
use crate::types::{constants, BodyId, FloorContact, PairContact, RigidBody};

/// Impulse-based contact resolver.
pub struct ContactResolver;

impl ContactResolver {
    /// Resolve `body` against the plane `y = floor_y`.
    ///
    /// Returns `None` (and leaves the body untouched) when the body is static
    /// or not below the floor.
    pub fn resolve_floor(
        body: &mut RigidBody,
        floor_y: f64,
        restitution: f64,
        friction: f64,
    ) -> Option<FloorContact> {
        if body.is_static() {
            return None;
        }
        let penetration = floor_penetration(body, floor_y)?;

        body.position.y = floor_y + body.radius;

        let mut normal_impulse = 0.0;
        if body.velocity.y < 0.0 {
            let vy_before = body.velocity.y;
            body.velocity.y = -vy_before * restitution;
            normal_impulse = -(1.0 + restitution) * vy_before / body.inverse_mass;
        }

        let (friction_impulse, friction_clamped) =
            Self::apply_floor_friction(body, normal_impulse, friction);

        Some(FloorContact {
            penetration,
            normal_impulse,
            friction_impulse,
            friction_clamped,
        })
    }

    /// Apply the Coulomb-limited friction impulse at the floor contact point.
    ///
    /// Returns the applied impulse and whether it was clamped.
    fn apply_floor_friction(
        body: &mut RigidBody,
        normal_impulse: f64,
        friction: f64,
    ) -> (DVec3, bool) {
        let offset = DVec3::new(0.0, -body.radius, 0.0);
        let contact_velocity = body.velocity + body.angular_velocity.cross(offset);
        let slip = DVec3::new(contact_velocity.x, 0.0, contact_velocity.z);
        let slip_speed = slip.length();

        // Resting contact
        if slip_speed < constants::SLIP_EPSILON {
            return (DVec3::ZERO, false);
        }

        // No normal impulse, no friction budget
        let limit = friction * normal_impulse;
        if limit <= 0.0 {
            return (DVec3::ZERO, false);
        }

        let inverse_effective_mass =
            body.inverse_mass + body.radius * body.radius * body.inverse_inertia;
        let stick = slip_speed / inverse_effective_mass;

        let (magnitude, clamped) = if stick > limit {
            (limit, true)
        } else {
            (stick, false)
        };
        let impulse = slip * (-magnitude / slip_speed);
        body.velocity += impulse * body.inverse_mass;
        body.angular_velocity += offset.cross(impulse) * body.inverse_inertia;

        (impulse, clamped)
    }

    /// Resolve the overlap between `a` and `b`.
    ///
    /// Returns the contact and the scalar normal impulse (zero if the bodies
    /// were already separating). `None` if they do not overlap, their centers
    /// coincide, or both are static.
    pub fn resolve_spheres(
        a: &mut RigidBody,
        b: &mut RigidBody,
        restitution: f64,
    ) -> Option<(SphereContact, f64)> {
        let contact = sphere_overlap(a, b)?;

        let inv_sum = a.inverse_mass + b.inverse_mass;
        if inv_sum == 0.0 {
            return None;
        }

        let normal = contact.normal;
        let correction = normal * (contact.penetration / inv_sum);
        if !a.is_static() {
            a.position -= correction * a.inverse_mass;
        }
        if !b.is_static() {
            b.position += correction * b.inverse_mass;
        }

        let approach = (b.velocity - a.velocity).dot(normal);
        if approach >= 0.0 {
            return Some((contact, 0.0));
        }

        let j = -(1.0 + restitution) * approach / inv_sum;
        let impulse = normal * j;
        if !a.is_static() {
            a.velocity -= impulse * a.inverse_mass;
        }
        if !b.is_static() {
            b.velocity += impulse * b.inverse_mass;
        }

        Some((contact, j))
    }

    /// Resolve the pair `(i, j)` of `bodies`, with `i < j`.
    ///
    /// Both bodies are borrowed through `split_at_mut`, so the slice is never
    /// aliased.
    pub fn resolve_sphere_pair(
        bodies: &mut [RigidBody],
        i: usize,
        j: usize,
        restitution: f64,
    ) -> Option<PairContact> {
        debug_assert!(i < j, "pairs are visited with i < j");

        let (head, tail) = bodies.split_at_mut(j);
        let (a, b) = (&mut head[i], &mut tail[0]);

        let (contact, impulse) = Self::resolve_spheres(a, b, restitution)?;
        Some(PairContact {
            a: BodyId(i),
            b: BodyId(j),
            normal: contact.normal,
            penetration: contact.penetration,
            impulse,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
