//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod artifact_source;
pub mod config_source;
pub mod deploy_events;
pub mod function_client;

pub use artifact_source::{ArtifactError, ArtifactSource};
pub use config_source::{ConfigSource, LoadedDocument};
pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink};
pub use function_client::{ClientError, FunctionClient, RemoteFunctionState, ResourceHandle};
