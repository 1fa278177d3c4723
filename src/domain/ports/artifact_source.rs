//! Artifact Source Port
//!
//! Supplies the packaged bytes for a function. Bundling happens elsewhere;
//! this port only hands over what is already built.

use std::path::PathBuf;

use crate::domain::entities::Artifact;
use crate::domain::value_objects::FunctionId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArtifactError {
    #[error("no artifact for {id} (expected {path})")]
    Missing { id: String, path: PathBuf },

    #[error("artifact for {id} is empty: {path}")]
    Empty { id: String, path: PathBuf },

    #[error("failed to read artifact {path}: {message}")]
    Io { path: PathBuf, message: String },
}

pub trait ArtifactSource: Send + Sync {
    /// Load the artifact for one function.
    fn load(&self, id: &FunctionId) -> Result<Artifact, ArtifactError>;

    /// List every function of `project` that has an artifact, sorted.
    fn discover(&self, project: &str) -> Result<Vec<FunctionId>, ArtifactError>;
}
