//! Network resolver
//!
//! Turns a function's `NetworkConfig` into a concrete placement:
//! 1. Inline object: used as-is
//! 2. Preset name: environment registry first, then default registry
//! 3. Absent: the default `external` preset (no explicit placement)
//!
//! Only the function and environment layers may request a placement; the
//! function's value wins. A `NetworkConfig` in the default layer is ignored,
//! so the `external` fallback always applies when neither sets one.

use tracing::debug;

use crate::domain::entities::{ConfigDocument, ConfigError, NetworkConfig, NetworkObject};

/// Preset used when no layer requests a placement.
pub const EXTERNAL_PRESET: &str = "external";

/// Read-only view over the two preset registries.
#[derive(Debug, Clone, Copy)]
pub struct PresetRegistry<'a> {
    default: &'a ConfigDocument,
    environment: Option<&'a ConfigDocument>,
}

impl<'a> PresetRegistry<'a> {
    pub fn new(default: &'a ConfigDocument, environment: Option<&'a ConfigDocument>) -> Self {
        Self {
            default,
            environment,
        }
    }

    /// Look a preset up, environment first.
    pub fn lookup(&self, name: &str) -> Option<&'a NetworkObject> {
        self.environment
            .and_then(|env| env.network_presets.get(name))
            .or_else(|| self.default.network_presets.get(name))
    }

    /// All preset names visible to a function, sorted; `true` marks names the
    /// environment registry supplies.
    pub fn names(&self) -> Vec<(&'a str, bool)> {
        let mut names: Vec<(&'a str, bool)> = self
            .default
            .network_presets
            .keys()
            .map(|name| (name.as_str(), false))
            .collect();
        if let Some(env) = self.environment {
            for name in env.network_presets.keys() {
                match names.iter_mut().find(|(n, _)| *n == name.as_str()) {
                    Some(entry) => entry.1 = true,
                    None => names.push((name.as_str(), true)),
                }
            }
        }
        names.sort_by(|a, b| a.0.cmp(b.0));
        names
    }
}

/// Resolve the placement for one function from its own layer and the
/// environment layer.
pub fn resolve_network(
    default: &ConfigDocument,
    environment: Option<&ConfigDocument>,
    function: Option<&ConfigDocument>,
) -> Result<NetworkObject, ConfigError> {
    let registry = PresetRegistry::new(default, environment);

    let requested = function
        .and_then(|f| f.network_config.as_ref())
        .or_else(|| environment.and_then(|e| e.network_config.as_ref()));

    if requested.is_none() && default.network_config.is_some() {
        debug!("default-layer NetworkConfig ignored, using the external preset");
    }

    match requested {
        Some(NetworkConfig::Inline(network)) => {
            debug!("using inline network config");
            Ok(network.clone())
        }
        Some(NetworkConfig::Preset(name)) => {
            debug!(preset = %name, "resolving network preset");
            registry
                .lookup(name)
                .cloned()
                .ok_or_else(|| ConfigError::UnknownPreset { name: name.clone() })
        }
        None => Ok(default
            .network_presets
            .get(EXTERNAL_PRESET)
            .cloned()
            .unwrap_or_default()),
    }
}
