//! Request builder
//!
//! Builds remote requests for one function. Field precedence, lowest first:
//! resolved config, request-derived fields (name, handler, placement, code),
//! deploy-time overrides.

use tracing::debug;

use crate::domain::entities::{
    Artifact, ConfigDocument, ConfigOverrides, CreateAliasRequest, CreateFunctionRequest,
    FunctionConfiguration, NetworkObject, UpdateCodeRequest, UpdateConfigRequest, LATEST_VERSION,
};
use crate::domain::value_objects::FunctionId;

#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    id: &'a FunctionId,
    config: &'a ConfigDocument,
    network: &'a NetworkObject,
    overrides: &'a ConfigOverrides,
    account_id: Option<&'a str>,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(
        id: &'a FunctionId,
        config: &'a ConfigDocument,
        network: &'a NetworkObject,
        overrides: &'a ConfigOverrides,
    ) -> Self {
        Self {
            id,
            config,
            network,
            overrides,
            account_id: None,
        }
    }

    /// Account used to expand bare role names into role ARNs.
    pub fn with_account_id(mut self, account_id: Option<&'a str>) -> Self {
        self.account_id = account_id;
        self
    }

    pub fn configuration(&self) -> FunctionConfiguration {
        let handler = self.id.handler();
        if let Some(stored) = &self.config.handler {
            if stored != &handler {
                debug!(function = %self.id, stored = %stored, derived = %handler, "stored handler superseded by derived handler");
            }
        }

        let role = self
            .overrides
            .role
            .clone()
            .or_else(|| self.config.role.clone())
            .map(|role| expand_role(&role, self.account_id));

        FunctionConfiguration {
            function_name: self.id.remote_name(),
            handler,
            runtime: pick(&self.overrides.runtime, &self.config.runtime),
            role,
            timeout: self.overrides.timeout.or(self.config.timeout),
            memory_size: self.overrides.memory_size.or(self.config.memory_size),
            description: pick(&self.overrides.description, &self.config.description),
            environment: self.config.environment.clone(),
            vpc_config: self.network.clone(),
        }
    }

    pub fn create(&self, artifact: &Artifact) -> CreateFunctionRequest {
        CreateFunctionRequest {
            configuration: self.configuration(),
            tags: self.config.tags.clone(),
            publish: false,
            code: artifact.clone(),
        }
    }

    pub fn update_code(&self, artifact: &Artifact) -> UpdateCodeRequest {
        UpdateCodeRequest {
            function_name: self.id.remote_name(),
            publish: false,
            code: artifact.clone(),
        }
    }

    pub fn update_config(&self) -> UpdateConfigRequest {
        UpdateConfigRequest {
            configuration: self.configuration(),
            tags: self.config.tags.clone(),
        }
    }

    /// Alias pointing at the unpublished latest version.
    pub fn alias(&self, name: &str) -> CreateAliasRequest {
        CreateAliasRequest {
            function_name: self.id.remote_name(),
            name: name.to_string(),
            function_version: LATEST_VERSION.to_string(),
        }
    }
}

fn pick(first: &Option<String>, second: &Option<String>) -> Option<String> {
    first.clone().or_else(|| second.clone())
}

/// `lambda-basic` + account `123` → `arn:aws:iam::123:role/lambda-basic`.
///
/// Values that already look like ARNs, or any value when no account is
/// configured, pass through untouched.
pub fn expand_role(role: &str, account_id: Option<&str>) -> String {
    match account_id {
        Some(account) if !role.starts_with("arn:") => {
            format!("arn:aws:iam::{}:role/{}", account, role)
        }
        _ => role.to_string(),
    }
}
