//! Command handlers for the fndeploy binary.

pub mod deploy;
pub mod init;
pub mod presets;
pub mod resolve;
mod workspace;
