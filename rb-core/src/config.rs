//! Tuning constants for the simulation.
//!
//! These are passed to every [`World::step`](crate::world::World::step) call
//! instead of living in globals, so two worlds with different settings can run
//! side by side.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::constants;

/// Physics parameters shared by every body in a world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhysicsConfig {
    /// Gravitational acceleration (m/s²)
    pub gravity: DVec3,
    /// Coefficient of restitution for floor and sphere contacts, in [0, 1]
    pub restitution: f64,
    /// Coulomb friction coefficient against the floor
    pub friction: f64,
    /// Fixed tick length (s)
    pub fixed_dt: f64,
    /// Height of the floor plane
    pub floor_y: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: DVec3::new(0.0, -constants::GRAVITY, 0.0),
            restitution: 0.6,
            friction: 0.4,
            fixed_dt: 1.0 / 120.0,
            floor_y: 0.0,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() || !self.floor_y.is_finite() {
            return Err(Error::invalid("gravity and floor_y must be finite"));
        }
        if !(self.fixed_dt > 0.0 && self.fixed_dt.is_finite()) {
            return Err(Error::invalid(format!(
                "fixed_dt must be positive, got {}",
                self.fixed_dt
            )));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(Error::invalid(format!(
                "restitution must be in [0, 1], got {}",
                self.restitution
            )));
        }
        if !(self.friction >= 0.0 && self.friction.is_finite()) {
            return Err(Error::invalid(format!(
                "friction must be non-negative, got {}",
                self.friction
            )));
        }
        Ok(())
    }
}

/// Settings for the fixed-step clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockConfig {
    /// Longest wall-clock frame delta fed into the accumulator (s). Longer
    /// stalls are cut down to this so the simulation cannot fall into a
    /// catch-up spiral.
    pub max_frame_delta: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            max_frame_delta: 0.05,
        }
    }
}

impl ClockConfig {
    pub fn validate(&self, physics: &PhysicsConfig) -> Result<()> {
        if !(self.max_frame_delta >= physics.fixed_dt && self.max_frame_delta.is_finite()) {
            return Err(Error::invalid(format!(
                "max_frame_delta ({}) must be at least fixed_dt ({})",
                self.max_frame_delta, physics.fixed_dt
            )));
        }
        if self.max_frame_delta / physics.fixed_dt > constants::MAX_TICKS_PER_FRAME {
            return Err(Error::invalid(format!(
                "max_frame_delta ({}) allows more than {} ticks of fixed_dt ({}) per frame",
                self.max_frame_delta,
                constants::MAX_TICKS_PER_FRAME,
                physics.fixed_dt
            )));
        }
        Ok(())
    }
}
