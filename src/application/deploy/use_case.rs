//! Deploy Use Case
//!
//! Orchestrates one deploy invocation:
//! 1. Load the shared default/environment layers once
//! 2. Fan out over the requested functions with a bounded concurrency
//! 3. Per function: load its layer, merge, resolve network, load artifact,
//!    reconcile against the remote client
//! 4. Collect results back into request order
//!
//! Failures are isolated per function. Nothing is retried and nothing
//! escapes as an error; the summary carries every outcome.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, error, info, warn};

use crate::application::resolve::LayeredDefaults;
use crate::domain::ports::{
    ArtifactSource, ConfigSource, DeployEvent, DeployEventSink, FunctionClient, NoopEventSink,
};
use crate::domain::value_objects::{DeployStage, FunctionId};

use super::cancel::CancellationFlag;
use super::options::DeployOptions;
use super::reconciler::Reconciler;
use super::result::{DeployError, DeployOutcome, DeployResult, DeploySummary};

/// Deploy use case - orchestrates the deployment flow
///
/// Ports are held as shared trait objects so the same adapters can back
/// every in-flight reconciliation.
pub struct DeployUseCase {
    config_source: Arc<dyn ConfigSource>,
    artifact_source: Arc<dyn ArtifactSource>,
    client: Arc<dyn FunctionClient>,
}

impl DeployUseCase {
    pub fn new(
        config_source: Arc<dyn ConfigSource>,
        artifact_source: Arc<dyn ArtifactSource>,
        client: Arc<dyn FunctionClient>,
    ) -> Self {
        Self {
            config_source,
            artifact_source,
            client,
        }
    }

    /// Deploy without events or cancellation.
    pub async fn execute(&self, ids: &[FunctionId], options: &DeployOptions) -> DeploySummary {
        self.execute_with_events(
            ids,
            options,
            Arc::new(NoopEventSink),
            &CancellationFlag::new(),
        )
        .await
    }

    /// Deploy with event reporting and a cancellation flag.
    pub async fn execute_with_events(
        &self,
        ids: &[FunctionId],
        options: &DeployOptions,
        event_sink: Arc<dyn DeployEventSink>,
        cancel: &CancellationFlag,
    ) -> DeploySummary {
        let destination = self.client.display_name();
        info!(
            stage = %options.stage,
            functions = ids.len(),
            destination = %destination,
            max_concurrency = options.max_concurrency,
            "deploy started"
        );
        event_sink.on_event(DeployEvent::Started {
            stage: options.stage.clone(),
            destination,
            function_count: ids.len(),
        });

        let mut summary = DeploySummary::new(&options.stage);

        let layers = match LayeredDefaults::load(self.config_source.as_ref(), &options.stage) {
            Ok(layers) => layers,
            Err(err) => {
                // Every function depends on the shared layers.
                error!(error = %err, "failed to load shared config layers");
                summary.results = ids
                    .iter()
                    .enumerate()
                    .map(|(index, id)| {
                        DeployResult::new(
                            index,
                            id.clone(),
                            DeployOutcome::Failed {
                                stage: DeployStage::Config,
                                cause: err.clone().into(),
                            },
                        )
                    })
                    .collect();
                for result in &summary.results {
                    emit_result(event_sink.as_ref(), result);
                }
                emit_completed(event_sink.as_ref(), &summary);
                return summary;
            }
        };

        for warning in layers.warnings() {
            warn!("{}", warning);
            summary.warnings.push(warning.to_string());
        }

        let reconciler = Reconciler::new(
            self.client.as_ref(),
            options,
            cancel,
            Arc::clone(&event_sink),
        );
        let layers = &layers;
        let reconciler = &reconciler;
        let sink = event_sink.as_ref();

        let mut results: Vec<DeployResult> = stream::iter(ids.iter().enumerate())
            .map(move |(index, id)| async move {
                let result = self
                    .deploy_one(index, id, layers, reconciler, cancel)
                    .await;
                emit_result(sink, &result);
                result
            })
            .buffer_unordered(options.max_concurrency.max(1))
            .collect()
            .await;

        results.sort_by_key(|result| result.index);
        summary.results = results;

        info!(
            succeeded = summary.succeeded(),
            partial = summary.partial(),
            failed = summary.failed(),
            cancelled = summary.cancelled(),
            "deploy finished"
        );
        emit_completed(event_sink.as_ref(), &summary);
        summary
    }

    async fn deploy_one(
        &self,
        index: usize,
        id: &FunctionId,
        layers: &LayeredDefaults,
        reconciler: &Reconciler<'_>,
        cancel: &CancellationFlag,
    ) -> DeployResult {
        if cancel.is_cancelled() {
            return DeployResult::new(
                index,
                id.clone(),
                DeployOutcome::Cancelled {
                    before_stage: DeployStage::Config,
                    handle: None,
                },
            );
        }

        let function = match self
            .config_source
            .load_function(id)
            .and_then(|doc| layers.resolve(id, doc))
        {
            Ok(function) => function,
            Err(err) => {
                warn!(function = %id, error = %err, "config resolution failed");
                return DeployResult::new(index, id.clone(), pre_remote(DeployStage::Config, err));
            }
        };

        let warnings: Vec<String> = function.warnings.iter().map(ToString::to_string).collect();
        for warning in &warnings {
            warn!(function = %id, "{}", warning);
        }

        let artifact = match self.artifact_source.load(id) {
            Ok(artifact) => artifact,
            Err(err) => {
                warn!(function = %id, error = %err, "artifact unavailable");
                return DeployResult::new(index, id.clone(), pre_remote(DeployStage::Artifact, err))
                    .with_warnings(warnings);
            }
        };
        debug!(
            function = %id,
            bytes = artifact.len(),
            hash = %artifact.hash().short(),
            "artifact loaded"
        );

        let outcome = reconciler.reconcile(index, &function, &artifact).await;
        DeployResult::new(index, id.clone(), outcome)
            .with_artifact_hash(Some(artifact.hash().clone()))
            .with_warnings(warnings)
    }
}

fn pre_remote(stage: DeployStage, cause: impl Into<DeployError>) -> DeployOutcome {
    DeployOutcome::Failed {
        stage,
        cause: cause.into(),
    }
}

fn emit_result(sink: &dyn DeployEventSink, result: &DeployResult) {
    let index = result.index;
    let id = result.id.clone();
    let event = match &result.outcome {
        DeployOutcome::Created { alias_handle, .. } => DeployEvent::FunctionDeployed {
            index,
            id,
            handle: alias_handle.to_string(),
            created: true,
        },
        DeployOutcome::Updated { function_handle } => DeployEvent::FunctionDeployed {
            index,
            id,
            handle: function_handle.to_string(),
            created: false,
        },
        DeployOutcome::CreatedWithoutAlias {
            function_handle,
            alias_error,
        } => DeployEvent::FunctionPartial {
            index,
            id,
            handle: function_handle.to_string(),
            error: alias_error.to_string(),
        },
        DeployOutcome::Failed { stage, cause } => DeployEvent::FunctionFailed {
            index,
            id,
            stage: *stage,
            error: cause.to_string(),
        },
        DeployOutcome::Cancelled { .. } => DeployEvent::FunctionCancelled { index, id },
    };
    sink.on_event(event);
}

fn emit_completed(sink: &dyn DeployEventSink, summary: &DeploySummary) {
    sink.on_event(DeployEvent::Completed {
        deployed_count: summary.succeeded(),
        partial_count: summary.partial(),
        failed_count: summary.failed(),
        cancelled_count: summary.cancelled(),
    });
}
