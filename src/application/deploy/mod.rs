//! Deploy Module
//!
//! Reconciles packaged functions against the remote platform.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`DeployOptions`)
//! - `result` - Per-function outcomes and the aggregate (`DeployResult`, `DeploySummary`)
//! - `reconciler` - Create-or-update for a single function (`Reconciler`)
//! - `cancel` - Stage-boundary cancellation (`CancellationFlag`)
//! - `use_case` - Bounded fan-out over many functions (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use fndeploy::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(config_source, artifact_source, client);
//! let summary = use_case.execute(&ids, &DeployOptions::new("dev")).await;
//! ```

mod cancel;
mod options;
mod reconciler;
mod result;
mod use_case;

pub use cancel::CancellationFlag;
pub use options::{DeployOptions, DEFAULT_MAX_CONCURRENCY};
pub use reconciler::Reconciler;
pub use result::{DeployError, DeployOutcome, DeployResult, DeploySummary};
pub use use_case::DeployUseCase;
