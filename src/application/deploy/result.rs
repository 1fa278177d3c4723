//! Deploy Result
//!
//! Per-function outcomes and the aggregate summary.

use crate::domain::entities::ConfigError;
use crate::domain::ports::{ArtifactError, ClientError, ResourceHandle};
use crate::domain::value_objects::{ContentHash, DeployStage, FunctionId};

/// Why a function failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeployError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Remote(#[from] ClientError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// New function plus its initial alias
    Created {
        function_handle: ResourceHandle,
        alias_handle: ResourceHandle,
    },
    /// New function; the alias call failed and nothing was rolled back
    CreatedWithoutAlias {
        function_handle: ResourceHandle,
        alias_error: ClientError,
    },
    /// Existing function, code and configuration updated
    Updated { function_handle: ResourceHandle },
    Failed {
        stage: DeployStage,
        cause: DeployError,
    },
    /// Stopped at a stage boundary; `handle` is set when an earlier write landed
    Cancelled {
        before_stage: DeployStage,
        handle: Option<ResourceHandle>,
    },
}

/// Result for one function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployResult {
    pub index: usize,
    pub id: FunctionId,
    pub outcome: DeployOutcome,
    pub artifact_hash: Option<ContentHash>,
    pub warnings: Vec<String>,
}

impl DeployResult {
    pub fn new(index: usize, id: FunctionId, outcome: DeployOutcome) -> Self {
        Self {
            index,
            id,
            outcome,
            artifact_hash: None,
            warnings: Vec::new(),
        }
    }

    pub fn with_artifact_hash(mut self, hash: Option<ContentHash>) -> Self {
        self.artifact_hash = hash;
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Created with alias, or updated.
    pub fn is_success(&self) -> bool {
        matches!(
            self.outcome,
            DeployOutcome::Created { .. } | DeployOutcome::Updated { .. }
        )
    }

    pub fn is_partial(&self) -> bool {
        matches!(self.outcome, DeployOutcome::CreatedWithoutAlias { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, DeployOutcome::Failed { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.outcome, DeployOutcome::Cancelled { .. })
    }

    /// True when the create call itself succeeded.
    pub fn function_created(&self) -> bool {
        matches!(
            self.outcome,
            DeployOutcome::Created { .. } | DeployOutcome::CreatedWithoutAlias { .. }
        )
    }

    /// Handle to report: the alias for fully created functions, else the function.
    pub fn handle(&self) -> Option<&ResourceHandle> {
        match &self.outcome {
            DeployOutcome::Created { alias_handle, .. } => Some(alias_handle),
            DeployOutcome::CreatedWithoutAlias {
                function_handle, ..
            }
            | DeployOutcome::Updated { function_handle } => Some(function_handle),
            DeployOutcome::Cancelled { handle, .. } => handle.as_ref(),
            DeployOutcome::Failed { .. } => None,
        }
    }

    /// Stage that did not complete, if any.
    pub fn failed_stage(&self) -> Option<DeployStage> {
        match &self.outcome {
            DeployOutcome::Failed { stage, .. } => Some(*stage),
            DeployOutcome::CreatedWithoutAlias { .. } => Some(DeployStage::CreateAlias),
            _ => None,
        }
    }

    /// Error text for failed and partial outcomes.
    pub fn cause(&self) -> Option<String> {
        match &self.outcome {
            DeployOutcome::Failed { cause, .. } => Some(cause.to_string()),
            DeployOutcome::CreatedWithoutAlias { alias_error, .. } => Some(alias_error.to_string()),
            _ => None,
        }
    }
}

/// Aggregate of one deploy invocation, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploySummary {
    pub stage: String,
    pub results: Vec<DeployResult>,
    /// Warnings from the shared default/environment layers
    pub warnings: Vec<String>,
}

impl DeploySummary {
    pub fn new(stage: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            results: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Every function fully succeeded.
    pub fn is_success(&self) -> bool {
        self.results.iter().all(DeployResult::is_success)
    }

    pub fn succeeded(&self) -> usize {
        self.count(DeployResult::is_success)
    }

    pub fn partial(&self) -> usize {
        self.count(DeployResult::is_partial)
    }

    pub fn failed(&self) -> usize {
        self.count(DeployResult::is_failure)
    }

    pub fn cancelled(&self) -> usize {
        self.count(DeployResult::is_cancelled)
    }

    fn count(&self, predicate: fn(&DeployResult) -> bool) -> usize {
        self.results.iter().filter(|r| predicate(r)).count()
    }
}
