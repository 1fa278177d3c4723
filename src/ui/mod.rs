//! Output for the fndeploy binary: plain-text views and NDJSON.

pub mod error;
pub mod json;
pub mod views;
