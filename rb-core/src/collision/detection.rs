//! Discrete overlap tests.
//!
//! Both predicates look at the state *after* integration and only report an
//! overlap that already exists. A body fast enough to cross the floor within
//! one tick is not caught.

use glam::DVec3;

use crate::types::{constants, RigidBody};

/// Overlap between two spheres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereContact {
    /// Unit normal pointing from the first sphere toward the second.
    pub normal: DVec3,
    /// `r_a + r_b - distance`, always positive.
    pub penetration: f64,
}

/// Depth of `body` below the plane `y = floor_y`, or `None` if its lowest
/// point is on or above it.
pub fn floor_penetration(body: &RigidBody, floor_y: f64) -> Option<f64> {
    let bottom = body.position.y - body.radius;
    if bottom < floor_y {
        Some(floor_y - bottom)
    } else {
        None
    }
}

/// Overlap of spheres `a` and `b`.
///
/// Returns `None` when the spheres are apart or exactly touching, and also
/// when the centers (nearly) coincide: no normal can be derived in that case.
pub fn sphere_overlap(a: &RigidBody, b: &RigidBody) -> Option<SphereContact> {
    let delta = b.position - a.position;
    let dist_sq = delta.length_squared();
    let sum_r = a.radius + b.radius;

    if dist_sq >= sum_r * sum_r {
        return None;
    }
    if dist_sq < constants::COINCIDENT_DISTANCE_SQ {
        return None;
    }

    let dist = dist_sq.sqrt();
    Some(SphereContact {
        normal: delta / dist,
        penetration: sum_r - dist,
    })
}

// =============================================================================
// Tests
// =============================================================================
