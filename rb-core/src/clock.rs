//! Fixed-timestep driver.
//!
//! Rendering runs at whatever rate the display allows; physics runs in ticks
//! of exactly `fixed_dt`. The bridge between the two is an accumulator:
//!
//! ```text
//! frame_delta ──clamp(max_frame_delta)──▶ accumulator
//! while accumulator >= fixed_dt { step(); accumulator -= fixed_dt }
//! ```
//!
//! For a given amount of elapsed time the same number of ticks run no matter
//! how it was sliced into frames.

use log::debug;

use crate::config::{ClockConfig, PhysicsConfig};
use crate::world::World;

/// Converts wall-clock frame deltas into a whole number of fixed ticks.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    fixed_dt: f64,
    max_frame_delta: f64,
    accumulator: f64,
    total_ticks: u64,
}

impl FixedTimestep {
    pub fn new(fixed_dt: f64, max_frame_delta: f64) -> Self {
        debug_assert!(fixed_dt > 0.0, "fixed_dt must be positive");
        Self {
            fixed_dt,
            max_frame_delta,
            accumulator: 0.0,
            total_ticks: 0,
        }
    }

    pub fn from_config(physics: &PhysicsConfig, clock: &ClockConfig) -> Self {
        Self::new(physics.fixed_dt, clock.max_frame_delta)
    }

    /// Ticks handed out since creation.
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Feed one frame's wall-clock delta and return how many ticks are due.
    ///
    /// Deltas above `max_frame_delta` are clamped; negative deltas count as
    /// zero.
    pub fn advance(&mut self, frame_delta: f64) -> u32 {
        let mut delta = frame_delta.max(0.0);
        if delta > self.max_frame_delta {
            debug!(
                "frame delta {:.4}s clamped to {:.4}s",
                delta, self.max_frame_delta
            );
            delta = self.max_frame_delta;
        }
        self.accumulator += delta;

        let mut ticks = 0;
        while self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            ticks += 1;
        }
        self.total_ticks += u64::from(ticks);
        ticks
    }

    /// Feed one frame's delta and step `world` once per due tick.
    pub fn run(&mut self, world: &mut World, config: &PhysicsConfig, frame_delta: f64) -> u32 {
        let ticks = self.advance(frame_delta);
        for _ in 0..ticks {
            world.step(config);
        }
        ticks
    }

    /// Fraction of a tick left in the accumulator, in `[0, 1)`.
    ///
    /// A renderer can blend the previous and current body states by this
    /// amount.
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.fixed_dt
    }
}
