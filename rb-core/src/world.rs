//! The simulation world and its per-tick pipeline.
//!
//! Each call to [`World::step`] runs the same straight-line sequence:
//!
//! ```text
//! 1. gravity      -> every dynamic body's force accumulator
//! 2. integrate    -> every body, index order
//! 3. floor        -> every dynamic body, index order
//! 4. sphere pairs -> every (i, j) with i < j, lexicographic order
//! ```
//!
//! Each contact is resolved at most once per tick. Stacked bodies are not
//! relaxed iteratively and show slight residual jitter.

use glam::DVec3;
use log::{trace, warn};

use crate::collision::ContactResolver;
use crate::config::PhysicsConfig;
use crate::forces::{ForceField, Gravity};
use crate::integrator::SemiImplicitEuler;
use crate::types::{BodyId, BodyView, RigidBody};

/// Counts of what one tick resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub tick: u64,
    pub floor_contacts: usize,
    pub pair_contacts: usize,
}

/// An ordered set of sphere bodies.
///
/// Bodies are added during setup and never removed or reordered, so a
/// [`BodyId`] handed out by [`World::add_body`] stays valid.
#[derive(Debug, Clone, Default)]
pub struct World {
    bodies: Vec<RigidBody>,
    tick: u64,
    time: f64,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bodies(bodies: Vec<RigidBody>) -> Self {
        Self {
            bodies,
            ..Self::default()
        }
    }

    pub fn add_body(&mut self, body: RigidBody) -> BodyId {
        self.bodies.push(body);
        BodyId(self.bodies.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Number of ticks run so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated seconds so far.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn body(&self, id: BodyId) -> Option<&RigidBody> {
        self.bodies.get(id.0)
    }

    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    /// Render view of one body.
    pub fn view(&self, id: BodyId) -> Option<BodyView> {
        self.body(id).map(RigidBody::view)
    }

    /// Render views of all bodies, in id order.
    pub fn views(&self) -> impl Iterator<Item = BodyView> + '_ {
        self.bodies.iter().map(RigidBody::view)
    }

    /// Queue an external force on `id` for the next tick.
    ///
    /// Returns `false` if no such body exists.
    pub fn apply_force(&mut self, id: BodyId, force: DVec3) -> bool {
        match self.bodies.get_mut(id.0) {
            Some(body) => {
                body.apply_force(force);
                true
            }
            None => {
                warn!("apply_force: no body with id {}", id.0);
                false
            }
        }
    }

    /// Queue an external torque on `id` for the next tick.
    ///
    /// Returns `false` if no such body exists.
    pub fn apply_torque(&mut self, id: BodyId, torque: DVec3) -> bool {
        match self.bodies.get_mut(id.0) {
            Some(body) => {
                body.apply_torque(torque);
                true
            }
            None => {
                warn!("apply_torque: no body with id {}", id.0);
                false
            }
        }
    }

    /// Total linear momentum of the dynamic bodies.
    pub fn momentum(&self) -> DVec3 {
        self.bodies.iter().map(RigidBody::momentum).sum()
    }

    /// Total kinetic energy.
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(RigidBody::kinetic_energy).sum()
    }

    /// Advance every body by exactly one tick of `config.fixed_dt`.
    pub fn step(&mut self, config: &PhysicsConfig) -> StepReport {
        let dt = config.fixed_dt;
        let gravity = Gravity(config.gravity);

        for body in &mut self.bodies {
            gravity.apply(body);
        }

        for body in &mut self.bodies {
            SemiImplicitEuler::step(body, dt);
        }

        let mut floor_contacts = 0;
        for body in &mut self.bodies {
            if body.is_static() {
                continue;
            }
            if ContactResolver::resolve_floor(
                body,
                config.floor_y,
                config.restitution,
                config.friction,
            )
            .is_some()
            {
                floor_contacts += 1;
            }
        }

        let mut pair_contacts = 0;
        let n = self.bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                if ContactResolver::resolve_sphere_pair(&mut self.bodies, i, j, config.restitution)
                    .is_some()
                {
                    pair_contacts += 1;
                }
            }
        }

        self.tick += 1;
        self.time += dt;

        let report = StepReport {
            tick: self.tick,
            floor_contacts,
            pair_contacts,
        };
        trace!("{:?}", report);
        report
    }
}

// =============================================================================
// Tests
// =============================================================================
