//! Workspace wiring shared by every command.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use fndeploy::config::{Config, PathsConfig, CONFIG_FILE_NAME};
use fndeploy::domain::entities::ConfigOverrides;
use fndeploy::infrastructure::{FsArtifactSource, FsConfigSource};

use crate::cli::OverrideArgs;

/// Tool config plus paths anchored at the workspace root.
pub struct Workspace {
    pub config: Config,
    pub paths: PathsConfig,
}

impl Workspace {
    pub fn load(root: &Path, stage: Option<&str>) -> Result<Self> {
        let (mut config, warnings) = Config::load_or_default(root)
            .with_context(|| format!("failed to load {}", root.join(CONFIG_FILE_NAME).display()))?;
        for warning in &warnings {
            warn!("{}", warning);
        }

        if let Some(stage) = stage {
            config.deploy.stage = stage.to_string();
        }

        let paths = config.paths.anchored(root);
        Ok(Self { config, paths })
    }

    pub fn stage(&self) -> &str {
        &self.config.deploy.stage
    }

    pub fn config_source(&self) -> FsConfigSource {
        FsConfigSource::new(&self.paths.config_dir, &self.paths.projects_dir)
    }

    pub fn artifact_source(&self) -> FsArtifactSource {
        FsArtifactSource::new(&self.paths.packages_dir).with_projects_dir(&self.paths.projects_dir)
    }
}

impl OverrideArgs {
    pub fn to_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            runtime: self.runtime.clone(),
            role: self.role.clone(),
            timeout: self.timeout,
            memory_size: self.memory,
            description: None,
        }
    }
}
