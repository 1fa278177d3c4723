//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, mut event: serde_json::Value) {
        if let Some(map) = event.as_object_mut() {
            map.insert(
                "ts".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        let json = match event {
            DeployEvent::Started {
                stage,
                destination,
                function_count,
            } => {
                serde_json::json!({
                    "event": "start",
                    "command": "deploy",
                    "stage": stage,
                    "destination": destination,
                    "function_count": function_count,
                })
            }

            DeployEvent::StageStarted { index, id, stage } => {
                serde_json::json!({
                    "event": "stage_start",
                    "command": "deploy",
                    "index": index,
                    "function": id,
                    "stage": stage,
                })
            }

            DeployEvent::FunctionDeployed {
                index,
                id,
                handle,
                created,
            } => {
                serde_json::json!({
                    "event": "item_deployed",
                    "command": "deploy",
                    "index": index,
                    "function": id,
                    "action": if created { "created" } else { "updated" },
                    "handle": handle,
                })
            }

            DeployEvent::FunctionPartial {
                index,
                id,
                handle,
                error,
            } => {
                serde_json::json!({
                    "event": "item_partial",
                    "command": "deploy",
                    "index": index,
                    "function": id,
                    "handle": handle,
                    "stage": "create-alias",
                    "error": error,
                })
            }

            DeployEvent::FunctionFailed {
                index,
                id,
                stage,
                error,
            } => {
                serde_json::json!({
                    "event": "item_error",
                    "command": "deploy",
                    "index": index,
                    "function": id,
                    "stage": stage,
                    "error": error,
                })
            }

            DeployEvent::FunctionCancelled { index, id } => {
                serde_json::json!({
                    "event": "item_cancelled",
                    "command": "deploy",
                    "index": index,
                    "function": id,
                })
            }

            DeployEvent::Completed {
                deployed_count,
                partial_count,
                failed_count,
                cancelled_count,
            } => {
                let status = if partial_count + failed_count + cancelled_count == 0 {
                    "success"
                } else if deployed_count + partial_count > 0 {
                    "partial"
                } else {
                    "failure"
                };
                serde_json::json!({
                    "event": "complete",
                    "command": "deploy",
                    "status": status,
                    "deployed": deployed_count,
                    "partial": partial_count,
                    "failed": failed_count,
                    "cancelled": cancelled_count,
                })
            }
        };

        self.write_event(json);
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}
