//! Deploy Options
//!
//! Configuration types for deploy operations.

use crate::domain::entities::ConfigOverrides;
use crate::domain::value_objects::ExistsCheckPolicy;

/// Default bound on concurrent reconciliations.
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Options for the deploy use case
#[derive(Debug, Clone, PartialEq)]
pub struct DeployOptions {
    /// Environment layer to load (`config/env/<stage>/lambda.*`)
    pub stage: String,
    /// Alias created for newly created functions
    pub initial_alias: String,
    /// Upper bound on reconciliations in flight
    pub max_concurrency: usize,
    /// How a failed existence query is treated
    pub exists_check: ExistsCheckPolicy,
    /// Deploy-time values that beat stored metadata
    pub overrides: ConfigOverrides,
    /// Account used to expand bare role names
    pub account_id: Option<String>,
}

impl DeployOptions {
    pub fn new(stage: impl Into<String>) -> Self {
        let stage = stage.into();
        Self {
            initial_alias: stage.clone(),
            stage,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            exists_check: ExistsCheckPolicy::default(),
            overrides: ConfigOverrides::default(),
            account_id: None,
        }
    }

    pub fn with_initial_alias(mut self, alias: impl Into<String>) -> Self {
        self.initial_alias = alias.into();
        self
    }

    /// Zero is treated as one.
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max.max(1);
        self
    }

    pub fn with_exists_check(mut self, policy: ExistsCheckPolicy) -> Self {
        self.exists_check = policy;
        self
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_account_id(mut self, account_id: Option<String>) -> Self {
        self.account_id = account_id;
        self
    }
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self::new("dev")
    }
}
