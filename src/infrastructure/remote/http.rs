//! HTTP FunctionClient for a Lambda-compatible REST API
//!
//! Routes (all under `/2015-03-31/functions`):
//! - `GET    /{name}`               describe
//! - `POST   /`                     create
//! - `POST   /{name}/aliases`       create alias
//! - `PUT    /{name}/code`          update code
//! - `PUT    /{name}/configuration` update configuration
//!
//! Tags on existing functions go through `POST /2017-03-31/tags/{arn}`
//! after the configuration update. Artifacts travel base64-encoded in
//! `ZipFile`.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::entities::{
    Artifact, CreateAliasRequest, CreateFunctionRequest, FunctionConfiguration,
    UpdateCodeRequest, UpdateConfigRequest,
};
use crate::domain::ports::{ClientError, FunctionClient, RemoteFunctionState, ResourceHandle};
use crate::domain::value_objects::FunctionId;

const API_PREFIX: &str = "/2015-03-31/functions";
const TAGS_PREFIX: &str = "/2017-03-31/tags";

/// Client for one API endpoint
pub struct HttpFunctionClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CreateFunctionBody<'a> {
    #[serde(flatten)]
    configuration: &'a FunctionConfiguration,
    code: CodeBody,
    #[serde(skip_serializing_if = "no_tags")]
    tags: &'a BTreeMap<String, String>,
    publish: bool,
}

fn no_tags(tags: &&BTreeMap<String, String>) -> bool {
    tags.is_empty()
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CodeBody {
    zip_file: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct UpdateCodeBody {
    zip_file: String,
    publish: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AliasBody<'a> {
    name: &'a str,
    function_version: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct TagsBody<'a> {
    tags: &'a BTreeMap<String, String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FunctionArnResponse {
    function_arn: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetFunctionResponse {
    configuration: FunctionArnResponse,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AliasResponse {
    alias_arn: String,
}

/// Error payloads use either casing.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "Message")]
    message: Option<String>,
}

impl HttpFunctionClient {
    /// Create a new client
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: endpoint.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Bearer token sent with every request
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.request_at(method, &format!("{}{}", API_PREFIX, path))
    }

    fn request_at(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "remote request");
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await.map_err(transport)?;
        if response.status().is_success() {
            return response.json().await.map_err(transport);
        }
        Err(error_from(response).await)
    }

    /// Like `send`, for endpoints answering `204 No Content`.
    async fn send_empty(&self, builder: RequestBuilder) -> Result<(), ClientError> {
        let response = builder.send().await.map_err(transport)?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(error_from(response).await)
    }

    async fn tag(
        &self,
        handle: &ResourceHandle,
        tags: &BTreeMap<String, String>,
    ) -> Result<(), ClientError> {
        let path = format!("{}/{}", TAGS_PREFIX, handle.as_str());
        self.send_empty(self.request_at(Method::POST, &path).json(&TagsBody { tags }))
            .await
    }
}

async fn error_from(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or(text);

    match status {
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::CONFLICT => ClientError::Conflict(message),
        _ => ClientError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

fn transport(err: reqwest::Error) -> ClientError {
    ClientError::Transport(err.to_string())
}

fn encode(artifact: &Artifact) -> String {
    BASE64.encode(artifact.bytes())
}

/// Configuration body without `FunctionName`, which travels in the path.
fn configuration_body(configuration: &FunctionConfiguration) -> Result<serde_json::Value, ClientError> {
    let mut body = serde_json::to_value(configuration)
        .map_err(|e| ClientError::Transport(format!("failed to encode configuration: {}", e)))?;
    if let Some(map) = body.as_object_mut() {
        map.remove("FunctionName");
    }
    Ok(body)
}

#[async_trait]
impl FunctionClient for HttpFunctionClient {
    async fn describe(&self, id: &FunctionId) -> Result<RemoteFunctionState, ClientError> {
        let path = format!("/{}", id.remote_name());
        match self
            .send::<GetFunctionResponse>(self.request(Method::GET, &path))
            .await
        {
            Ok(found) => Ok(RemoteFunctionState::Present {
                handle: ResourceHandle::new(found.configuration.function_arn),
            }),
            Err(ClientError::NotFound(_)) => Ok(RemoteFunctionState::Absent),
            Err(err) => Err(err),
        }
    }

    async fn create(&self, request: &CreateFunctionRequest) -> Result<ResourceHandle, ClientError> {
        let body = CreateFunctionBody {
            configuration: &request.configuration,
            code: CodeBody {
                zip_file: encode(&request.code),
            },
            tags: &request.tags,
            publish: request.publish,
        };
        let created: FunctionArnResponse = self
            .send(self.request(Method::POST, "").json(&body))
            .await?;
        Ok(ResourceHandle::new(created.function_arn))
    }

    async fn create_alias(
        &self,
        request: &CreateAliasRequest,
    ) -> Result<ResourceHandle, ClientError> {
        let path = format!("/{}/aliases", request.function_name);
        let body = AliasBody {
            name: &request.name,
            function_version: &request.function_version,
        };
        let alias: AliasResponse = self
            .send(self.request(Method::POST, &path).json(&body))
            .await?;
        Ok(ResourceHandle::new(alias.alias_arn))
    }

    async fn update_code(
        &self,
        request: &UpdateCodeRequest,
    ) -> Result<ResourceHandle, ClientError> {
        let path = format!("/{}/code", request.function_name);
        let body = UpdateCodeBody {
            zip_file: encode(&request.code),
            publish: request.publish,
        };
        let updated: FunctionArnResponse = self
            .send(self.request(Method::PUT, &path).json(&body))
            .await?;
        Ok(ResourceHandle::new(updated.function_arn))
    }

    async fn update_config(
        &self,
        request: &UpdateConfigRequest,
    ) -> Result<ResourceHandle, ClientError> {
        let path = format!("/{}/configuration", request.configuration.function_name);
        let body = configuration_body(&request.configuration)?;
        let updated: FunctionArnResponse = self
            .send(self.request(Method::PUT, &path).json(&body))
            .await?;
        let handle = ResourceHandle::new(updated.function_arn);

        if !request.tags.is_empty() {
            self.tag(&handle, &request.tags).await?;
        }
        Ok(handle)
    }

    fn display_name(&self) -> String {
        self.base_url.clone()
    }
}

#[cfg(test)]
mod tests;
