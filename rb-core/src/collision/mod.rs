//! Collision detection and resolution for floor and sphere contacts.
//!
//! This module handles:
//! - **Detection**: pure overlap predicates (sphere vs floor plane, sphere vs sphere)
//! - **Resolution**: positional snap/split plus restitution and friction impulses
//!
//! ## Discrete overlap
//!
//! Contacts are found by testing the post-integration state for overlap:
//!
//! ```text
//!   tick n          tick n+1
//!     ●                         resolved:      ●
//!     ↓                                        ↑ v * e
//! ══════════     ═════●═════    ══════════════════
//!                     └─ penetration, snapped back
//! ```
//!
//! Everything below the floor counts as inside it, so the floor cannot be
//! skipped. Two spheres closing faster than `(r_a + r_b) / dt` can pass
//! through each other between ticks; that is accepted at the speeds this
//! simulation deals with.

pub mod detection;
pub mod resolution;

pub use detection::*;
pub use resolution::*;
