//! Remote request entities
//!
//! Fully-resolved payloads handed to the function client. Built by
//! `RequestBuilder`; adapters translate them to their wire format.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::entities::{Artifact, EnvironmentSection, NetworkObject};

/// Version string an alias points at right after creation.
pub const LATEST_VERSION: &str = "$LATEST";

/// Deploy-time values that beat stored metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Configuration sent on create and on update-config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FunctionConfiguration {
    pub function_name: String,
    pub handler: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<EnvironmentSection>,
    pub vpc_config: NetworkObject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFunctionRequest {
    pub configuration: FunctionConfiguration,
    pub tags: BTreeMap<String, String>,
    pub publish: bool,
    pub code: Artifact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCodeRequest {
    pub function_name: String,
    pub publish: bool,
    pub code: Artifact,
}

/// Configuration plus the merged tags. Tags are applied on every update so
/// edits in any layer reach functions that already exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateConfigRequest {
    pub configuration: FunctionConfiguration,
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateAliasRequest {
    pub function_name: String,
    pub name: String,
    pub function_version: String,
}
