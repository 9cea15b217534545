//! Core types for the sphere simulation.
//!
//! All units are SI:
//! - Position: meters (m)
//! - Velocity: meters per second (m/s)
//! - Angular velocity: radians per second (rad/s)
//! - Mass: kilograms (kg)
//! - Force: Newtons (N)
//!
//! Vectors and rotations are `glam`'s double precision types.

use glam::{DQuat, DVec3};

// =============================================================================
// Body handles
// =============================================================================

/// Index of a body inside a [`World`](crate::world::World).
///
/// Bodies are never removed or reordered, so an id stays valid for the
/// lifetime of the world that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

// =============================================================================
// Rigid Body
// =============================================================================

/// A simulated solid sphere.
///
/// A body with `inverse_mass == 0.0` is immovable: the integrator skips it and
/// contact impulses leave it untouched. The inertia is kept as a scalar, which
/// is exact for a solid sphere and nothing else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBody {
    pub position: DVec3,
    pub velocity: DVec3,
    pub orientation: DQuat,
    pub angular_velocity: DVec3,
    pub inverse_mass: f64,
    pub inverse_inertia: f64,
    pub radius: f64,
    pub accumulated_force: DVec3,
    pub accumulated_torque: DVec3,
}

impl RigidBody {
    /// A dynamic sphere at rest.
    ///
    /// Derives `inverse_mass = 1 / mass` and the solid sphere inverse inertia
    /// `5 / (2 m r²)`. Both `mass` and `radius` must be positive.
    pub fn dynamic(position: DVec3, radius: f64, mass: f64) -> Self {
        debug_assert!(radius > 0.0, "sphere radius must be positive");
        debug_assert!(mass > 0.0, "dynamic body mass must be positive");

        let inverse_mass = 1.0 / mass;
        Self {
            position,
            velocity: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
            angular_velocity: DVec3::ZERO,
            inverse_mass,
            inverse_inertia: solid_sphere_inverse_inertia(inverse_mass, radius),
            radius,
            accumulated_force: DVec3::ZERO,
            accumulated_torque: DVec3::ZERO,
        }
    }

    /// An immovable sphere (infinite mass and inertia).
    pub fn fixed(position: DVec3, radius: f64) -> Self {
        debug_assert!(radius > 0.0, "sphere radius must be positive");

        Self {
            position,
            velocity: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
            angular_velocity: DVec3::ZERO,
            inverse_mass: 0.0,
            inverse_inertia: 0.0,
            radius,
            accumulated_force: DVec3::ZERO,
            accumulated_torque: DVec3::ZERO,
        }
    }

    pub fn with_velocity(mut self, velocity: DVec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: DVec3) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// True for infinite-mass bodies.
    pub fn is_static(&self) -> bool {
        self.inverse_mass == 0.0
    }

    /// Mass in kg, `f64::INFINITY` for static bodies.
    pub fn mass(&self) -> f64 {
        if self.is_static() {
            f64::INFINITY
        } else {
            1.0 / self.inverse_mass
        }
    }

    /// Add a force for the current tick.
    pub fn apply_force(&mut self, force: DVec3) {
        self.accumulated_force += force;
    }

    /// Add a torque for the current tick.
    pub fn apply_torque(&mut self, torque: DVec3) {
        self.accumulated_torque += torque;
    }

    pub fn clear_accumulators(&mut self) {
        self.accumulated_force = DVec3::ZERO;
        self.accumulated_torque = DVec3::ZERO;
    }

    /// Linear momentum `m·v` (zero for static bodies).
    pub fn momentum(&self) -> DVec3 {
        if self.is_static() {
            DVec3::ZERO
        } else {
            self.velocity / self.inverse_mass
        }
    }

    /// Kinetic energy (translational + rotational). Static bodies carry none.
    pub fn kinetic_energy(&self) -> f64 {
        if self.is_static() {
            return 0.0;
        }
        let translational = 0.5 * self.velocity.length_squared() / self.inverse_mass;
        let rotational = 0.5 * self.angular_velocity.length_squared() / self.inverse_inertia;
        translational + rotational
    }

    /// Snapshot for the render layer.
    pub fn view(&self) -> BodyView {
        BodyView {
            position: self.position,
            orientation: self.orientation,
            radius: self.radius,
        }
    }
}

/// `5·inverse_mass / (2·radius²)`.
pub fn solid_sphere_inverse_inertia(inverse_mass: f64, radius: f64) -> f64 {
    5.0 * inverse_mass / (2.0 * radius * radius)
}

// =============================================================================
// Render view
// =============================================================================

/// What a renderer needs to place one sphere: read once per frame, never
/// written back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyView {
    pub position: DVec3,
    pub orientation: DQuat,
    pub radius: f64,
}

// =============================================================================
// Contact reports
// =============================================================================

/// Outcome of one floor contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorContact {
    /// Depth below the floor before the positional snap.
    pub penetration: f64,
    /// Normal impulse magnitude `jn` (zero if the body was already leaving).
    pub normal_impulse: f64,
    /// Tangential impulse actually applied.
    pub friction_impulse: DVec3,
    /// Whether the stick impulse was cut down to the Coulomb limit.
    pub friction_clamped: bool,
}

/// Outcome of one sphere pair contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairContact {
    pub a: BodyId,
    pub b: BodyId,
    /// Unit normal pointing from `a` toward `b`.
    pub normal: DVec3,
    pub penetration: f64,
    /// Scalar impulse `j` along the normal, zero when already separating.
    pub impulse: f64,
}

// =============================================================================
// Physical Constants
// =============================================================================

/// Physical constants and numerical guards used in the simulation.
pub mod constants {
    /// Gravitational acceleration (m/s²)
    pub const GRAVITY: f64 = 9.81;

    /// Slip speed under which a floor contact is treated as resting (m/s)
    pub const SLIP_EPSILON: f64 = 1e-5;

    /// Squared center distance under which two spheres count as coincident (m²)
    pub const COINCIDENT_DISTANCE_SQ: f64 = 1e-8;

    /// Most ticks a single clamped frame may ask for
    pub const MAX_TICKS_PER_FRAME: f64 = 1000.0;
}

// =============================================================================
// Tests
// =============================================================================
