//! Errors raised while setting up a simulation.
//!
//! Stepping a world never fails; only loading and validating scene
//! descriptions can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("scene not found: {0}")]
    SceneNotFound(String),

    #[error("invalid scene: {0}")]
    InvalidScene(String),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidScene(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
