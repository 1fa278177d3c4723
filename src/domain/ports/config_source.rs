//! Config Source Port
//!
//! Supplies already-parsed config layers. Default is required; the
//! environment and function layers are optional.

use crate::domain::entities::{ConfigDocument, ConfigError};
use crate::domain::value_objects::{ConfigWarning, FunctionId};

/// A validated layer plus any non-fatal warnings raised while loading it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedDocument {
    pub document: ConfigDocument,
    pub warnings: Vec<ConfigWarning>,
}

pub trait ConfigSource: Send + Sync {
    /// Process-wide default layer. Missing is an error.
    fn load_default(&self) -> Result<LoadedDocument, ConfigError>;

    /// Per-stage layer, `None` when the stage has no file.
    fn load_environment(&self, stage: &str) -> Result<Option<LoadedDocument>, ConfigError>;

    /// Per-function layer, `None` when the function declares no metadata.
    fn load_function(&self, id: &FunctionId) -> Result<Option<LoadedDocument>, ConfigError>;
}
