//! # RB Core
//!
//! A fixed-timestep rigid-body core for spheres: gravity, a floor plane,
//! sphere-sphere contacts and floor friction that makes balls roll.
//!
//! ## Architecture
//!
//! - `types`: Core data structures (RigidBody, render views, contact reports)
//! - `integrator`: Numerical integration (semi-implicit Euler)
//! - `forces`: Force fields re-applied every tick (gravity)
//! - `collision`: Overlap detection and impulse-based resolution
//! - `world`: Body storage and the per-tick pipeline
//! - `clock`: Fixed-timestep accumulator decoupling ticks from frames
//! - `config`: Tuning constants passed into every step
//! - `scene`: YAML scene loader

pub mod clock;
pub mod collision;
pub mod config;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod scene;
pub mod types;
pub mod world;

pub use clock::FixedTimestep;
pub use config::{ClockConfig, PhysicsConfig};
pub use error::{Error, Result};
pub use scene::{Scene, SceneLoader};
pub use types::{BodyId, BodyView, RigidBody};
pub use world::{StepReport, World};
