pub mod deploy;
pub mod presets;
pub mod resolve;
