//! Deploy Event Port
//!
//! Provides an observable interface for deploy operations.
//! Enables progress reporting, JSON event streams, and debugging.

use crate::domain::value_objects::{DeployStage, FunctionId};

/// Event emitted during deploy operations
///
/// `index` is the function's position in the deploy request, not the order
/// in which functions finish.
#[derive(Debug, Clone, PartialEq)]
pub enum DeployEvent {
    /// Deploy started
    Started {
        stage: String,
        destination: String,
        function_count: usize,
    },

    /// A remote stage is about to run for one function
    StageStarted {
        index: usize,
        id: FunctionId,
        stage: DeployStage,
    },

    /// Function created or updated
    FunctionDeployed {
        index: usize,
        id: FunctionId,
        handle: String,
        created: bool,
    },

    /// Function created but its alias was not
    FunctionPartial {
        index: usize,
        id: FunctionId,
        handle: String,
        error: String,
    },

    /// Function failed at a stage
    FunctionFailed {
        index: usize,
        id: FunctionId,
        stage: DeployStage,
        error: String,
    },

    /// Function not attempted (or stopped at a stage boundary) after cancellation
    FunctionCancelled { index: usize, id: FunctionId },

    /// Deploy completed
    Completed {
        deployed_count: usize,
        partial_count: usize,
        failed_count: usize,
        cancelled_count: usize,
    },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);

    /// Check if this sink wants per-stage events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
