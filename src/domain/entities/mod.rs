//! Domain Entities
//!
//! - `ConfigDocument` - One layer of function metadata
//! - `Artifact` - The packaged bytes of one function
//! - Requests - Resolved payloads for the remote function client

mod artifact;
mod config_document;
mod requests;

pub use artifact::Artifact;
pub use config_document::{
    ConfigDocument, ConfigError, EnvironmentSection, NetworkConfig, NetworkObject, ParsedDocument,
    CANONICAL_KEYS,
};
pub use requests::{
    ConfigOverrides, CreateAliasRequest, CreateFunctionRequest, FunctionConfiguration,
    UpdateCodeRequest, UpdateConfigRequest, LATEST_VERSION,
};
