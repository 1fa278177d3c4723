//! Function Client Port
//!
//! Abstracts the remote function-hosting API. Every operation is a single
//! request/response; the reconciler awaits them one at a time per function.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::entities::{
    CreateAliasRequest, CreateFunctionRequest, UpdateCodeRequest, UpdateConfigRequest,
};
use crate::domain::value_objects::FunctionId;

/// ARN-equivalent handle returned by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceHandle(String);

impl ResourceHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the platform reports for a function name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteFunctionState {
    /// A well-formed "not found" answer
    Absent,
    Present { handle: ResourceHandle },
}

impl RemoteFunctionState {
    pub fn exists(&self) -> bool {
        matches!(self, RemoteFunctionState::Present { .. })
    }
}

/// Error from a remote call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("function not found: {0}")]
    NotFound(String),

    #[error("resource conflict: {0}")]
    Conflict(String),

    #[error("remote API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),
}

/// Remote function-hosting capability.
///
/// Implementations must be cheap to share across concurrent reconciliations.
#[async_trait]
pub trait FunctionClient: Send + Sync {
    /// Query whether the function exists.
    ///
    /// A clean "not found" is `Ok(Absent)`; anything else that prevents an
    /// answer is an error.
    async fn describe(&self, id: &FunctionId) -> Result<RemoteFunctionState, ClientError>;

    async fn create(&self, request: &CreateFunctionRequest) -> Result<ResourceHandle, ClientError>;

    async fn create_alias(
        &self,
        request: &CreateAliasRequest,
    ) -> Result<ResourceHandle, ClientError>;

    async fn update_code(&self, request: &UpdateCodeRequest)
        -> Result<ResourceHandle, ClientError>;

    async fn update_config(
        &self,
        request: &UpdateConfigRequest,
    ) -> Result<ResourceHandle, ClientError>;

    /// Display name for logs and summaries.
    fn display_name(&self) -> String;
}
