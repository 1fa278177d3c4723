//! Configuration module for fndeploy
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (FNDEPLOY_*)
//! 3. Workspace config (`fndeploy.toml`)
//! 4. Built-in defaults (lowest priority)
//!
//! This is the tool's own configuration. Function metadata layers are
//! loaded by `infrastructure::config`.

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{parse_concurrency, with_env_overrides, CONFIG_FILE_NAME};
pub(crate) use loader::{find_line_number, suggest_key};
pub use types::{Config, DeployConfig, PathsConfig, RemoteConfig};
