//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - Bounded concurrent create-or-update of many functions
//! - `ResolveUseCase` - Layer merge and network resolution for one function

pub mod deploy;
pub mod resolve;

#[cfg(test)]
pub(crate) mod testing;

pub use deploy::{
    CancellationFlag, DeployError, DeployOptions, DeployOutcome, DeployResult, DeploySummary,
    DeployUseCase,
};
pub use resolve::{LayeredDefaults, ResolveUseCase, ResolvedFunction};
