//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod deploy_stage;
mod exists_check;
mod function_id;
mod hash;

pub use config_warning::ConfigWarning;
pub use deploy_stage::DeployStage;
pub use exists_check::ExistsCheckPolicy;
pub use function_id::{FunctionId, FunctionIdError};
pub use hash::ContentHash;
