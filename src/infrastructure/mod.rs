//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `config/` - Function metadata layers on disk (`FsConfigSource`)
//! - `artifacts/` - Packaged archives on disk (`FsArtifactSource`)
//! - `remote/` - Lambda-compatible HTTP API (`HttpFunctionClient`)
//! - `events/` - Deploy event sinks (`JsonEventSink`)

pub mod artifacts;
pub mod config;
pub mod events;
pub mod remote;

// Re-export for convenience
pub use artifacts::FsArtifactSource;
pub use config::FsConfigSource;
pub use events::JsonEventSink;
pub use remote::HttpFunctionClient;
