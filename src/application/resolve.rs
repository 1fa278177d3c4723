//! Resolve Use Case
//!
//! Loads the shared default/environment layers once and resolves individual
//! functions against them. The deploy orchestrator uses the same path, so
//! `fndeploy resolve` previews exactly what a deploy would send.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::{ConfigError, ConfigOverrides, NetworkObject};
use crate::domain::ports::{ConfigSource, LoadedDocument};
use crate::domain::services::{
    merge_layers, resolve_network, PresetRegistry, RequestBuilder, ResolvedConfig,
};
use crate::domain::value_objects::{ConfigWarning, FunctionId};

/// Default and environment layers, loaded once per invocation and shared
/// read-only by every function.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredDefaults {
    pub stage: String,
    pub default: LoadedDocument,
    pub environment: Option<LoadedDocument>,
}

impl LayeredDefaults {
    pub fn load(source: &dyn ConfigSource, stage: &str) -> Result<Self, ConfigError> {
        let default = source.load_default()?;
        let environment = source.load_environment(stage)?;
        debug!(
            stage,
            has_environment = environment.is_some(),
            "loaded shared config layers"
        );
        Ok(Self {
            stage: stage.to_string(),
            default,
            environment,
        })
    }

    pub fn presets(&self) -> PresetRegistry<'_> {
        PresetRegistry::new(
            &self.default.document,
            self.environment.as_ref().map(|e| &e.document),
        )
    }

    /// Warnings raised by the shared layers.
    pub fn warnings(&self) -> Vec<ConfigWarning> {
        let mut warnings = self.default.warnings.clone();
        if let Some(environment) = &self.environment {
            warnings.extend(environment.warnings.iter().cloned());
        }
        warnings
    }

    /// Merge one function's layer over the shared layers and resolve its
    /// network placement.
    pub fn resolve(
        &self,
        id: &FunctionId,
        function: Option<LoadedDocument>,
    ) -> Result<ResolvedFunction, ConfigError> {
        let environment = self.environment.as_ref().map(|e| &e.document);
        let resolved = merge_layers(
            &self.default.document,
            environment,
            function.as_ref().map(|f| &f.document),
        );
        let network = resolve_network(
            &self.default.document,
            environment,
            function.as_ref().map(|f| &f.document),
        )?;

        debug!(
            function = %id,
            overrides = resolved.overrides.len(),
            subnets = network.subnet_ids.len(),
            "resolved function config"
        );

        Ok(ResolvedFunction {
            id: id.clone(),
            resolved,
            network,
            warnings: function.map(|f| f.warnings).unwrap_or_default(),
        })
    }
}

/// Everything needed to build the remote requests for one function.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFunction {
    pub id: FunctionId,
    pub resolved: ResolvedConfig,
    pub network: NetworkObject,
    /// Warnings from the function's own layer
    pub warnings: Vec<ConfigWarning>,
}

impl ResolvedFunction {
    pub fn requests<'a>(
        &'a self,
        overrides: &'a ConfigOverrides,
        account_id: Option<&'a str>,
    ) -> RequestBuilder<'a> {
        RequestBuilder::new(&self.id, &self.resolved.config, &self.network, overrides)
            .with_account_id(account_id)
    }
}

/// Resolve use case - backs `fndeploy resolve`.
pub struct ResolveUseCase {
    config_source: Arc<dyn ConfigSource>,
}

impl ResolveUseCase {
    pub fn new(config_source: Arc<dyn ConfigSource>) -> Self {
        Self { config_source }
    }

    pub fn load_layers(&self, stage: &str) -> Result<LayeredDefaults, ConfigError> {
        LayeredDefaults::load(self.config_source.as_ref(), stage)
    }

    pub fn execute(
        &self,
        layers: &LayeredDefaults,
        id: &FunctionId,
    ) -> Result<ResolvedFunction, ConfigError> {
        let function = self.config_source.load_function(id)?;
        layers.resolve(id, function)
    }
}
