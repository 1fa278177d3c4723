//! Config document entity
//!
//! One layer of function metadata (default, environment, or per-function).
//! The schema is canonical PascalCase; legacy spellings from older metadata
//! files are rejected at load time rather than silently accepted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Legacy key → canonical key. Any of these at the top level is an error.
const LEGACY_KEYS: &[(&str, &str)] = &[
    ("runtime", "Runtime"),
    ("role", "Role"),
    ("timeout", "Timeout"),
    ("memory", "MemorySize"),
    ("Memory", "MemorySize"),
    ("memorySize", "MemorySize"),
    ("handler", "Handler"),
    ("description", "Description"),
    ("tags", "Tags"),
    ("environment", "Environment"),
    ("vpc", "NetworkConfig"),
    ("Vpc", "NetworkConfig"),
    ("vpcConfig", "NetworkConfig"),
    ("VpcConfig", "NetworkConfig"),
    ("networkConfig", "NetworkConfig"),
];

/// Keys of the canonical schema, used for "did you mean" suggestions.
pub const CANONICAL_KEYS: &[&str] = &[
    "Runtime",
    "Role",
    "Timeout",
    "MemorySize",
    "Handler",
    "Description",
    "Tags",
    "Environment",
    "Variables",
    "NetworkConfig",
    "NetworkPresets",
    "SubnetIds",
    "SecurityGroupIds",
];

/// Errors raised while validating or resolving configuration.
///
/// These fail a single function before any remote call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{origin}: required configuration file not found")]
    Missing { origin: String },

    #[error("{origin}: {message}")]
    Io { origin: String, message: String },

    #[error("{origin}: configuration must be a mapping at the top level")]
    NotAMapping { origin: String },

    #[error("{origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("{origin}: legacy key '{key}' is no longer supported, use '{canonical}'")]
    LegacyKey {
        origin: String,
        key: String,
        canonical: String,
    },

    #[error("{origin}: malformed {location}: {reason}")]
    MalformedNetworkConfig {
        origin: String,
        location: String,
        reason: String,
    },

    #[error("network preset '{name}' is not defined in the environment or default presets")]
    UnknownPreset { name: String },
}

/// Concrete network placement: subnets plus security groups.
///
/// Both lists empty means "no explicit placement".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkObject {
    pub subnet_ids: Vec<String>,
    pub security_group_ids: Vec<String>,
}

impl NetworkObject {
    pub fn new(subnet_ids: Vec<String>, security_group_ids: Vec<String>) -> Self {
        Self {
            subnet_ids,
            security_group_ids,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subnet_ids.is_empty() && self.security_group_ids.is_empty()
    }
}

/// A function's requested network placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NetworkConfig {
    /// Name of a preset in the environment or default registry
    Preset(String),
    /// Fully specified placement
    Inline(NetworkObject),
}

/// The `Environment` section of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnvironmentSection {
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

/// One configuration layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfigDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,

    /// MiB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<EnvironmentSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_config: Option<NetworkConfig>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub network_presets: BTreeMap<String, NetworkObject>,
}

/// A validated document plus the dotted paths of keys the schema ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub document: ConfigDocument,
    pub unknown_keys: Vec<String>,
}

impl ConfigDocument {
    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = Some(runtime.into());
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment
            .get_or_insert_with(EnvironmentSection::default)
            .variables
            .insert(key.into(), value.into());
        self
    }

    pub fn with_network_config(mut self, network: NetworkConfig) -> Self {
        self.network_config = Some(network);
        self
    }

    pub fn with_preset(mut self, name: impl Into<String>, network: NetworkObject) -> Self {
        self.network_presets.insert(name.into(), network);
        self
    }

    /// Environment variables, when the `Environment` section is present.
    pub fn variables(&self) -> Option<&BTreeMap<String, String>> {
        self.environment.as_ref().map(|e| &e.variables)
    }

    /// Validate a parsed value against the canonical schema.
    ///
    /// `origin` names the layer in error messages (usually the file path).
    pub fn from_value(value: Value, origin: &str) -> Result<ParsedDocument, ConfigError> {
        let map = value.as_object().ok_or_else(|| ConfigError::NotAMapping {
            origin: origin.to_string(),
        })?;

        reject_legacy_keys(map, origin)?;
        if let Some(network) = map.get("NetworkConfig") {
            validate_network_config(network, origin, "NetworkConfig")?;
        }
        if let Some(presets) = map.get("NetworkPresets") {
            validate_presets(presets, origin)?;
        }

        let mut unknown_keys = Vec::new();
        let document: ConfigDocument = serde_ignored::deserialize(value, |path| {
            unknown_keys.push(path.to_string());
        })
        .map_err(|e| ConfigError::Parse {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;

        Ok(ParsedDocument {
            document,
            unknown_keys,
        })
    }
}

fn reject_legacy_keys(
    map: &serde_json::Map<String, Value>,
    origin: &str,
) -> Result<(), ConfigError> {
    for (legacy, canonical) in LEGACY_KEYS {
        if map.contains_key(*legacy) {
            return Err(ConfigError::LegacyKey {
                origin: origin.to_string(),
                key: legacy.to_string(),
                canonical: canonical.to_string(),
            });
        }
    }

    if let Some(env) = map.get("Environment").and_then(Value::as_object) {
        if env.contains_key("variables") {
            return Err(ConfigError::LegacyKey {
                origin: origin.to_string(),
                key: "Environment.variables".to_string(),
                canonical: "Environment.Variables".to_string(),
            });
        }
    }

    Ok(())
}

fn validate_network_config(value: &Value, origin: &str, location: &str) -> Result<(), ConfigError> {
    match value {
        Value::String(name) if name.trim().is_empty() => Err(malformed(
            origin,
            location,
            "preset name must not be empty",
        )),
        Value::String(_) => Ok(()),
        Value::Object(_) => validate_network_object(value, origin, location),
        _ => Err(malformed(
            origin,
            location,
            "expected a preset name or an object with SubnetIds and SecurityGroupIds",
        )),
    }
}

fn validate_network_object(value: &Value, origin: &str, location: &str) -> Result<(), ConfigError> {
    let Some(object) = value.as_object() else {
        return Err(malformed(origin, location, "expected an object"));
    };

    for field in ["SubnetIds", "SecurityGroupIds"] {
        match object.get(field) {
            None => {
                return Err(malformed(origin, location, &format!("missing {}", field)));
            }
            Some(Value::Array(items)) if items.iter().all(Value::is_string) => {}
            Some(_) => {
                return Err(malformed(
                    origin,
                    location,
                    &format!("{} must be a list of strings", field),
                ));
            }
        }
    }

    Ok(())
}

fn validate_presets(value: &Value, origin: &str) -> Result<(), ConfigError> {
    let Some(presets) = value.as_object() else {
        return Err(malformed(
            origin,
            "NetworkPresets",
            "expected a mapping of preset name to network object",
        ));
    };

    for (name, preset) in presets {
        validate_network_object(preset, origin, &format!("NetworkPresets.{}", name))?;
    }

    Ok(())
}

fn malformed(origin: &str, location: &str, reason: &str) -> ConfigError {
    ConfigError::MalformedNetworkConfig {
        origin: origin.to_string(),
        location: location.to_string(),
        reason: reason.to_string(),
    }
}
