//! Packaged artifact lookup.

mod fs;

pub use fs::FsArtifactSource;
