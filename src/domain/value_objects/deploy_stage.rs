//! Deploy stage value object - names the step of a reconciliation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A step in the reconciliation of one function.
///
/// `Config` and `Artifact` fail before the remote API is contacted; the
/// remaining stages correspond to one remote call each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeployStage {
    Config,
    Artifact,
    ExistsCheck,
    Create,
    CreateAlias,
    UpdateCode,
    UpdateConfig,
}

impl DeployStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeployStage::Config => "config",
            DeployStage::Artifact => "artifact",
            DeployStage::ExistsCheck => "exists-check",
            DeployStage::Create => "create",
            DeployStage::CreateAlias => "create-alias",
            DeployStage::UpdateCode => "update-code",
            DeployStage::UpdateConfig => "update-config",
        }
    }

    /// Returns true if this stage writes to the remote platform.
    pub fn is_remote_write(&self) -> bool {
        matches!(
            self,
            DeployStage::Create
                | DeployStage::CreateAlias
                | DeployStage::UpdateCode
                | DeployStage::UpdateConfig
        )
    }
}

impl fmt::Display for DeployStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
