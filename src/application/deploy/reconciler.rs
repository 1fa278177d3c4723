//! Deployment Reconciler
//!
//! Drives one function from "resolved config + artifact" to a remote
//! outcome:
//!
//! - absent: `create` then `create_alias`
//! - present: `update_code` then, only if that succeeded, `update_config`
//!
//! Stages run strictly in order. The cancellation flag is consulted between
//! stages, never while a remote call is in flight.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::resolve::ResolvedFunction;
use crate::domain::entities::Artifact;
use crate::domain::ports::{
    ClientError, DeployEvent, DeployEventSink, FunctionClient, RemoteFunctionState, ResourceHandle,
};
use crate::domain::services::RequestBuilder;
use crate::domain::value_objects::{DeployStage, ExistsCheckPolicy};

use super::cancel::CancellationFlag;
use super::options::DeployOptions;
use super::result::DeployOutcome;

pub struct Reconciler<'a> {
    client: &'a dyn FunctionClient,
    options: &'a DeployOptions,
    cancel: &'a CancellationFlag,
    event_sink: Arc<dyn DeployEventSink>,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        client: &'a dyn FunctionClient,
        options: &'a DeployOptions,
        cancel: &'a CancellationFlag,
        event_sink: Arc<dyn DeployEventSink>,
    ) -> Self {
        Self {
            client,
            options,
            cancel,
            event_sink,
        }
    }

    /// Reconcile one function. Never panics and never returns an error:
    /// every failure is folded into the outcome.
    pub async fn reconcile(
        &self,
        index: usize,
        function: &ResolvedFunction,
        artifact: &Artifact,
    ) -> DeployOutcome {
        let requests = function.requests(&self.options.overrides, self.options.account_id.as_deref());
        let step = Step {
            index,
            function,
            requests,
        };

        if let Some(cancelled) = self.checkpoint(&step, DeployStage::ExistsCheck, None) {
            return cancelled;
        }

        let state = match self.client.describe(&function.id).await {
            Ok(state) => state,
            Err(err) => match self.options.exists_check {
                ExistsCheckPolicy::Strict => {
                    warn!(function = %function.id, error = %err, "exists-check failed");
                    return failed(DeployStage::ExistsCheck, err);
                }
                ExistsCheckPolicy::Lenient => {
                    warn!(function = %function.id, error = %err, "exists-check failed, assuming absent");
                    RemoteFunctionState::Absent
                }
            },
        };

        match state {
            RemoteFunctionState::Absent => self.create(&step, artifact).await,
            RemoteFunctionState::Present { handle } => {
                debug!(function = %function.id, handle = %handle, "function exists");
                self.update(&step, artifact).await
            }
        }
    }

    async fn create(&self, step: &Step<'_>, artifact: &Artifact) -> DeployOutcome {
        if let Some(cancelled) = self.checkpoint(step, DeployStage::Create, None) {
            return cancelled;
        }

        let request = step.requests.create(artifact);
        let function_handle = match self.client.create(&request).await {
            Ok(handle) => handle,
            Err(err) => return failed(DeployStage::Create, err),
        };
        info!(function = %step.function.id, handle = %function_handle, "function created");

        if let Some(cancelled) =
            self.checkpoint(step, DeployStage::CreateAlias, Some(&function_handle))
        {
            return cancelled;
        }

        let alias = step.requests.alias(&self.options.initial_alias);
        match self.client.create_alias(&alias).await {
            Ok(alias_handle) => DeployOutcome::Created {
                function_handle,
                alias_handle,
            },
            Err(alias_error) => {
                warn!(
                    function = %step.function.id,
                    alias = %self.options.initial_alias,
                    error = %alias_error,
                    "function created but alias was not"
                );
                DeployOutcome::CreatedWithoutAlias {
                    function_handle,
                    alias_error,
                }
            }
        }
    }

    async fn update(&self, step: &Step<'_>, artifact: &Artifact) -> DeployOutcome {
        if let Some(cancelled) = self.checkpoint(step, DeployStage::UpdateCode, None) {
            return cancelled;
        }

        let request = step.requests.update_code(artifact);
        let code_handle = match self.client.update_code(&request).await {
            Ok(handle) => handle,
            Err(err) => return failed(DeployStage::UpdateCode, err),
        };

        if let Some(cancelled) =
            self.checkpoint(step, DeployStage::UpdateConfig, Some(&code_handle))
        {
            return cancelled;
        }

        match self.client.update_config(&step.requests.update_config()).await {
            Ok(function_handle) => {
                info!(function = %step.function.id, handle = %function_handle, "function updated");
                DeployOutcome::Updated { function_handle }
            }
            Err(err) => failed(DeployStage::UpdateConfig, err),
        }
    }

    /// Stage boundary: stop if cancelled, otherwise announce the stage.
    fn checkpoint(
        &self,
        step: &Step<'_>,
        stage: DeployStage,
        handle: Option<&ResourceHandle>,
    ) -> Option<DeployOutcome> {
        if self.cancel.is_cancelled() {
            info!(function = %step.function.id, stage = %stage, "cancelled before stage");
            return Some(DeployOutcome::Cancelled {
                before_stage: stage,
                handle: handle.cloned(),
            });
        }

        debug!(function = %step.function.id, stage = %stage, "stage started");
        if self.event_sink.wants_detailed_events() {
            self.event_sink.on_event(DeployEvent::StageStarted {
                index: step.index,
                id: step.function.id.clone(),
                stage,
            });
        }
        None
    }
}

struct Step<'a> {
    index: usize,
    function: &'a ResolvedFunction,
    requests: RequestBuilder<'a>,
}

fn failed(stage: DeployStage, err: ClientError) -> DeployOutcome {
    DeployOutcome::Failed {
        stage,
        cause: err.into(),
    }
}
