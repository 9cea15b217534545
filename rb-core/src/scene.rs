//! Scene configuration loader.
//!
//! Loads the starting bodies and tuning constants from YAML files, so a new
//! arrangement of spheres does not need a recompile.
//!
//! ## Directory Structure
//!
//! ```text
//! scenes/
//! ├── bouncing_spheres.yaml
//! ├── head_on.yaml
//! └── sliding_spin.yaml
//! ```
//!
//! ## File format
//!
//! ```yaml
//! name: Bouncing spheres
//! physics:            # optional, see PhysicsConfig
//!   restitution: 0.7
//! clock:              # optional, see ClockConfig
//!   max_frame_delta: 0.05
//! bodies:
//!   - position: [3.0, 4.0, 0.0]
//!     radius: 0.5
//!     mass: 1.0
//!     velocity: [0.0, 0.0, 0.0]          # optional
//!     angular_velocity: [0.0, 0.0, 0.0]  # optional
//!   - position: [0.0, 0.5, 0.0]
//!     radius: 0.5
//!     fixed: true                        # immovable, mass ignored
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use glam::DVec3;
use log::info;
use serde::{Deserialize, Serialize};

use crate::config::{ClockConfig, PhysicsConfig};
use crate::error::{Error, Result};
use crate::types::RigidBody;
use crate::world::World;

/// One body as written in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BodySpec {
    pub position: DVec3,
    pub radius: f64,
    #[serde(default = "default_mass")]
    pub mass: f64,
    #[serde(default)]
    pub fixed: bool,
    #[serde(default)]
    pub velocity: DVec3,
    #[serde(default)]
    pub angular_velocity: DVec3,
}

fn default_mass() -> f64 {
    1.0
}

impl BodySpec {
    fn validate(&self, index: usize) -> Result<()> {
        if !self.position.is_finite()
            || !self.velocity.is_finite()
            || !self.angular_velocity.is_finite()
        {
            return Err(Error::invalid(format!("body {}: non-finite vector", index)));
        }
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(Error::invalid(format!(
                "body {}: radius must be positive, got {}",
                index, self.radius
            )));
        }
        if !self.fixed && !(self.mass > 0.0 && self.mass.is_finite()) {
            return Err(Error::invalid(format!(
                "body {}: mass must be positive, got {}",
                index, self.mass
            )));
        }
        Ok(())
    }

    /// Build the rigid body this spec describes. Fixed bodies ignore mass
    /// and initial velocities.
    pub fn to_body(&self) -> RigidBody {
        if self.fixed {
            RigidBody::fixed(self.position, self.radius)
        } else {
            RigidBody::dynamic(self.position, self.radius, self.mass)
                .with_velocity(self.velocity)
                .with_angular_velocity(self.angular_velocity)
        }
    }
}

/// A complete scene: constants plus starting bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub bodies: Vec<BodySpec>,
}

impl Scene {
    /// Parse and validate a scene from YAML text.
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let scene: Scene = serde_yaml::from_str(contents)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.physics.validate()?;
        self.clock.validate(&self.physics)?;
        for (index, body) in self.bodies.iter().enumerate() {
            body.validate(index)?;
        }
        Ok(())
    }

    /// Create a world holding this scene's bodies, in file order.
    pub fn build_world(&self) -> World {
        let world = World::with_bodies(self.bodies.iter().map(BodySpec::to_body).collect());
        info!(
            "built world '{}' with {} bodies ({} static)",
            self.name,
            world.len(),
            world.bodies().iter().filter(|b| b.is_static()).count()
        );
        world
    }
}

/// Scene loader with configurable base directory.
pub struct SceneLoader {
    base_path: PathBuf,
}

impl SceneLoader {
    /// Create a new loader reading `<base_path>/<name>.yaml`.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load a scene by name (without .yaml extension).
    ///
    /// # Example
    /// ```ignore
    /// let loader = SceneLoader::new("scenes");
    /// let scene = loader.load_scene("bouncing_spheres")?;
    /// let mut world = scene.build_world();
    /// ```
    pub fn load_scene(&self, name: &str) -> Result<Scene> {
        let path = self.base_path.join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(Error::SceneNotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        let scene = Scene::from_yaml_str(&contents)?;
        info!("loaded scene '{}' from {}", name, path.display());
        Ok(scene)
    }

    /// List all available scenes, sorted.
    pub fn list_scenes(&self) -> Result<Vec<String>> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(".yaml") {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================
