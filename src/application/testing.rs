//! In-memory ports shared by application tests.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::deploy::CancellationFlag;
use crate::domain::entities::{
    Artifact, ConfigDocument, ConfigError, CreateAliasRequest, CreateFunctionRequest,
    UpdateCodeRequest, UpdateConfigRequest,
};
use crate::domain::ports::{
    ArtifactError, ArtifactSource, ClientError, ConfigSource, DeployEvent, DeployEventSink,
    FunctionClient, LoadedDocument, RemoteFunctionState, ResourceHandle,
};
use crate::domain::value_objects::FunctionId;

pub struct MemoryConfigSource {
    default: Result<ConfigDocument, ConfigError>,
    environments: HashMap<String, ConfigDocument>,
    functions: HashMap<FunctionId, Result<ConfigDocument, ConfigError>>,
}

impl MemoryConfigSource {
    pub fn new(default: ConfigDocument) -> Self {
        Self {
            default: Ok(default),
            environments: HashMap::new(),
            functions: HashMap::new(),
        }
    }

    pub fn missing_default() -> Self {
        Self {
            default: Err(ConfigError::Missing {
                origin: "config/env/lambda-default.json".into(),
            }),
            environments: HashMap::new(),
            functions: HashMap::new(),
        }
    }

    pub fn with_environment(mut self, stage: &str, doc: ConfigDocument) -> Self {
        self.environments.insert(stage.to_string(), doc);
        self
    }

    pub fn with_function(mut self, id: FunctionId, doc: ConfigDocument) -> Self {
        self.functions.insert(id, Ok(doc));
        self
    }

    pub fn with_broken_function(mut self, id: FunctionId, err: ConfigError) -> Self {
        self.functions.insert(id, Err(err));
        self
    }
}

fn loaded(document: ConfigDocument) -> LoadedDocument {
    LoadedDocument {
        document,
        warnings: Vec::new(),
    }
}

impl ConfigSource for MemoryConfigSource {
    fn load_default(&self) -> Result<LoadedDocument, ConfigError> {
        self.default.clone().map(loaded)
    }

    fn load_environment(&self, stage: &str) -> Result<Option<LoadedDocument>, ConfigError> {
        Ok(self.environments.get(stage).cloned().map(loaded))
    }

    fn load_function(&self, id: &FunctionId) -> Result<Option<LoadedDocument>, ConfigError> {
        match self.functions.get(id) {
            Some(Ok(doc)) => Ok(Some(loaded(doc.clone()))),
            Some(Err(err)) => Err(err.clone()),
            None => Ok(None),
        }
    }
}

#[derive(Default)]
pub struct MemoryArtifactSource {
    artifacts: HashMap<FunctionId, Artifact>,
}

impl MemoryArtifactSource {
    pub fn with(mut self, id: &FunctionId, bytes: &[u8]) -> Self {
        self.artifacts.insert(id.clone(), Artifact::new(bytes.to_vec()));
        self
    }
}

impl ArtifactSource for MemoryArtifactSource {
    fn load(&self, id: &FunctionId) -> Result<Artifact, ArtifactError> {
        self.artifacts
            .get(id)
            .cloned()
            .ok_or_else(|| ArtifactError::Missing {
                id: id.to_string(),
                path: PathBuf::from(format!("packages/{}.zip", id)),
            })
    }

    fn discover(&self, project: &str) -> Result<Vec<FunctionId>, ArtifactError> {
        let mut ids: Vec<FunctionId> = self
            .artifacts
            .keys()
            .filter(|id| id.project() == project)
            .cloned()
            .collect();
        ids.sort();
        Ok(ids)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Describe,
    Create,
    CreateAlias,
    UpdateCode,
    UpdateConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Describe(String),
    Create(CreateFunctionRequest),
    CreateAlias(CreateAliasRequest),
    UpdateCode(UpdateCodeRequest),
    UpdateConfig(UpdateConfigRequest),
}

impl Call {
    pub fn op(&self) -> Op {
        match self {
            Call::Describe(_) => Op::Describe,
            Call::Create(_) => Op::Create,
            Call::CreateAlias(_) => Op::CreateAlias,
            Call::UpdateCode(_) => Op::UpdateCode,
            Call::UpdateConfig(_) => Op::UpdateConfig,
        }
    }

    pub fn function_name(&self) -> &str {
        match self {
            Call::Describe(name) => name,
            Call::Create(req) => &req.configuration.function_name,
            Call::CreateAlias(req) => &req.function_name,
            Call::UpdateCode(req) => &req.function_name,
            Call::UpdateConfig(req) => &req.configuration.function_name,
        }
    }
}

/// Scriptable remote: tracks which functions exist and records every call.
#[derive(Default)]
pub struct MockFunctionClient {
    existing: Mutex<HashSet<String>>,
    failures: HashMap<(String, Op), ClientError>,
    delays: HashMap<String, Duration>,
    cancel_after: Option<(Op, CancellationFlag)>,
    calls: Mutex<Vec<Call>>,
}

impl MockFunctionClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_existing(self, id: &FunctionId) -> Self {
        self.existing.lock().unwrap().insert(id.remote_name());
        self
    }

    pub fn failing(mut self, id: &FunctionId, op: Op, err: ClientError) -> Self {
        self.failures.insert((id.remote_name(), op), err);
        self
    }

    /// Every call for `id` sleeps before answering.
    pub fn with_delay(mut self, id: &FunctionId, delay: Duration) -> Self {
        self.delays.insert(id.remote_name(), delay);
        self
    }

    /// Raise `flag` as soon as any `op` call completes.
    pub fn cancel_after(mut self, op: Op, flag: CancellationFlag) -> Self {
        self.cancel_after = Some((op, flag));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, id: &FunctionId) -> Vec<Op> {
        let name = id.remote_name();
        self.calls()
            .iter()
            .filter(|call| call.function_name() == name)
            .map(Call::op)
            .collect()
    }

    async fn answer(&self, call: Call) -> Result<(), ClientError> {
        let name = call.function_name().to_string();
        let op = call.op();
        self.calls.lock().unwrap().push(call);

        if let Some(delay) = self.delays.get(&name) {
            tokio::time::sleep(*delay).await;
        }
        if let Some((cancel_op, flag)) = &self.cancel_after {
            if *cancel_op == op {
                flag.cancel();
            }
        }
        match self.failures.get(&(name, op)) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

pub fn function_arn(name: &str) -> String {
    format!("arn:aws:lambda:local:000000000000:function:{}", name)
}

#[async_trait]
impl FunctionClient for MockFunctionClient {
    async fn describe(&self, id: &FunctionId) -> Result<RemoteFunctionState, ClientError> {
        let name = id.remote_name();
        self.answer(Call::Describe(name.clone())).await?;
        if self.existing.lock().unwrap().contains(&name) {
            Ok(RemoteFunctionState::Present {
                handle: ResourceHandle::new(function_arn(&name)),
            })
        } else {
            Ok(RemoteFunctionState::Absent)
        }
    }

    async fn create(&self, request: &CreateFunctionRequest) -> Result<ResourceHandle, ClientError> {
        let name = request.configuration.function_name.clone();
        self.answer(Call::Create(request.clone())).await?;
        self.existing.lock().unwrap().insert(name.clone());
        Ok(ResourceHandle::new(function_arn(&name)))
    }

    async fn create_alias(
        &self,
        request: &CreateAliasRequest,
    ) -> Result<ResourceHandle, ClientError> {
        self.answer(Call::CreateAlias(request.clone())).await?;
        Ok(ResourceHandle::new(format!(
            "{}:{}",
            function_arn(&request.function_name),
            request.name
        )))
    }

    async fn update_code(
        &self,
        request: &UpdateCodeRequest,
    ) -> Result<ResourceHandle, ClientError> {
        self.answer(Call::UpdateCode(request.clone())).await?;
        Ok(ResourceHandle::new(function_arn(&request.function_name)))
    }

    async fn update_config(
        &self,
        request: &UpdateConfigRequest,
    ) -> Result<ResourceHandle, ClientError> {
        self.answer(Call::UpdateConfig(request.clone())).await?;
        Ok(ResourceHandle::new(function_arn(
            &request.configuration.function_name,
        )))
    }

    fn display_name(&self) -> String {
        "mock".to_string()
    }
}

/// Event sink that records everything it receives.
#[derive(Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<DeployEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<DeployEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl DeployEventSink for RecordingEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Tags as a sorted map, for comparing request payloads.
pub fn tags(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
