//! Layer merger
//!
//! Merges the default, environment and function config layers:
//! - Scalars: the highest-precedence layer that sets a value wins
//! - `Tags`, `Environment.Variables`, `NetworkPresets`: unioned per key,
//!   same-key collisions resolved by precedence
//!
//! A layer that omits a map contributes nothing to it; it never clears
//! entries from lower layers.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;

use crate::domain::entities::{ConfigDocument, EnvironmentSection};

/// Which layer a value came from, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigLayer {
    Default,
    Environment,
    Function,
}

impl fmt::Display for ConfigLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigLayer::Default => f.write_str("default"),
            ConfigLayer::Environment => f.write_str("environment"),
            ConfigLayer::Function => f.write_str("function"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverrideInfo {
    pub key: String,
    pub from_layer: ConfigLayer,
    pub by_layer: ConfigLayer,
}

/// The merged document plus where each value came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedConfig {
    pub config: ConfigDocument,
    pub sources: BTreeMap<String, ConfigLayer>,
    pub overrides: Vec<OverrideInfo>,
}

/// Merge the three layers into an owned document.
///
/// Inputs are only borrowed; the result shares nothing with them, so the same
/// default/environment layers can back many concurrent merges.
pub fn merge_layers(
    default: &ConfigDocument,
    environment: Option<&ConfigDocument>,
    function: Option<&ConfigDocument>,
) -> ResolvedConfig {
    let mut merger = Merger::default();

    let layers = [
        (ConfigLayer::Default, Some(default)),
        (ConfigLayer::Environment, environment),
        (ConfigLayer::Function, function),
    ];
    for (layer, doc) in layers {
        if let Some(doc) = doc {
            merger.overlay(layer, doc);
        }
    }

    merger.finish()
}

#[derive(Default)]
struct Merger {
    config: ConfigDocument,
    sources: HashMap<String, ConfigLayer>,
    overrides: Vec<OverrideInfo>,
}

impl Merger {
    fn overlay(&mut self, layer: ConfigLayer, doc: &ConfigDocument) {
        self.scalar("Runtime", layer, &doc.runtime, |c| &mut c.runtime);
        self.scalar("Role", layer, &doc.role, |c| &mut c.role);
        self.scalar("Timeout", layer, &doc.timeout, |c| &mut c.timeout);
        self.scalar("MemorySize", layer, &doc.memory_size, |c| &mut c.memory_size);
        self.scalar("Handler", layer, &doc.handler, |c| &mut c.handler);
        self.scalar("Description", layer, &doc.description, |c| &mut c.description);
        self.scalar("NetworkConfig", layer, &doc.network_config, |c| {
            &mut c.network_config
        });

        for (key, value) in &doc.tags {
            self.record(format!("Tags.{}", key), layer);
            self.config.tags.insert(key.clone(), value.clone());
        }

        if let Some(env) = &doc.environment {
            let variables = &mut self
                .config
                .environment
                .get_or_insert_with(EnvironmentSection::default)
                .variables;
            for (key, value) in &env.variables {
                variables.insert(key.clone(), value.clone());
            }
            for key in env.variables.keys() {
                self.record(format!("Environment.Variables.{}", key), layer);
            }
        }

        for (name, preset) in &doc.network_presets {
            self.record(format!("NetworkPresets.{}", name), layer);
            self.config
                .network_presets
                .insert(name.clone(), preset.clone());
        }
    }

    fn scalar<T: Clone>(
        &mut self,
        key: &str,
        layer: ConfigLayer,
        value: &Option<T>,
        field: impl FnOnce(&mut ConfigDocument) -> &mut Option<T>,
    ) {
        if let Some(value) = value {
            self.record(key.to_string(), layer);
            *field(&mut self.config) = Some(value.clone());
        }
    }

    fn record(&mut self, key: String, layer: ConfigLayer) {
        if let Some(from_layer) = self.sources.insert(key.clone(), layer) {
            self.overrides.push(OverrideInfo {
                key,
                from_layer,
                by_layer: layer,
            });
        }
    }

    fn finish(self) -> ResolvedConfig {
        ResolvedConfig {
            config: self.config,
            sources: self.sources.into_iter().collect(),
            overrides: self.overrides,
        }
    }
}
