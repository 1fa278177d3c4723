//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ConfigWarning, ExistsCheckPolicy};
use crate::error::FnDeployResult;

use super::loader;

/// `[deploy]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Environment layer to load
    #[serde(default = "default_stage")]
    pub stage: String,

    /// Alias created for new functions; falls back to the stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_alias: Option<String>,

    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    #[serde(default)]
    pub exists_check: ExistsCheckPolicy,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            stage: default_stage(),
            initial_alias: None,
            max_concurrency: default_max_concurrency(),
            exists_check: ExistsCheckPolicy::default(),
        }
    }
}

impl DeployConfig {
    pub fn initial_alias(&self) -> &str {
        self.initial_alias.as_deref().unwrap_or(&self.stage)
    }
}

fn default_stage() -> String {
    "dev".to_string()
}

fn default_max_concurrency() -> usize {
    crate::application::deploy::DEFAULT_MAX_CONCURRENCY
}

/// `[paths]` section. Relative paths are resolved against the workspace root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,

    #[serde(default = "default_projects_dir")]
    pub projects_dir: PathBuf,

    #[serde(default = "default_packages_dir")]
    pub packages_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            projects_dir: default_projects_dir(),
            packages_dir: default_packages_dir(),
        }
    }
}

impl PathsConfig {
    /// The same paths anchored at `root`.
    pub fn anchored(&self, root: &Path) -> Self {
        Self {
            config_dir: root.join(&self.config_dir),
            projects_dir: root.join(&self.projects_dir),
            packages_dir: root.join(&self.packages_dir),
        }
    }
}

fn default_config_dir() -> PathBuf {
    PathBuf::from("config")
}

fn default_projects_dir() -> PathBuf {
    PathBuf::from("projects")
}

fn default_packages_dir() -> PathBuf {
    PathBuf::from("packages")
}

/// `[remote]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Expands bare role names into role ARNs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    /// Only ever read from `FNDEPLOY_API_TOKEN`
    #[serde(skip)]
    pub api_token: Option<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            account_id: None,
            api_token: None,
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:9001".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Contents of `fndeploy.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub deploy: DeployConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub remote: RemoteConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> FnDeployResult<Self> {
        Self::load_with_warnings(path).map(|(config, _warnings)| config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> FnDeployResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load `<root>/fndeploy.toml` if present, then apply `FNDEPLOY_*`
    /// environment overrides.
    pub fn load_or_default(root: &Path) -> FnDeployResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(root)
    }
}
