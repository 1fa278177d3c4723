//! fndeploy - layered metadata resolution and deployment reconciliation
//! for serverless functions
//!
//! Each function's configuration is merged from three layers (shared
//! default, per-stage environment, per-function metadata), its network
//! placement is resolved against named presets, and the remote function is
//! created or updated through an abstract [`FunctionClient`] with bounded
//! concurrency.
//!
//! [`FunctionClient`]: domain::ports::FunctionClient

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{DeployOptions, DeployOutcome, DeployResult, DeploySummary, DeployUseCase};
pub use config::Config;
pub use domain::value_objects::FunctionId;
pub use error::{FnDeployError, FnDeployResult};
