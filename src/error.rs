//! Error types for fndeploy
//!
//! Uses `thiserror` for library errors. Per-function failures never surface
//! here; they are carried by `DeployResult`. These are invocation-level
//! errors that stop the tool before or around a deploy.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::entities::ConfigError;
use crate::domain::ports::{ArtifactError, ClientError};
use crate::domain::value_objects::FunctionIdError;

/// Result type alias for fndeploy operations
pub type FnDeployResult<T> = Result<T, FnDeployError>;

/// Main error type for fndeploy operations
#[derive(Error, Debug)]
pub enum FnDeployError {
    /// Tool configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidToolConfig { file: PathBuf, message: String },

    /// A setting has a value outside its domain
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidSetting {
        key: String,
        value: String,
        reason: String,
    },

    /// Function identifier rejected
    #[error(transparent)]
    FunctionId(#[from] FunctionIdError),

    /// Layer loading or resolution failed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Artifact lookup failed
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// Remote client could not be built or called
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Nothing to deploy
    #[error("no packaged functions found for project '{project}' in {dir}")]
    NoFunctions { project: String, dir: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
