//! Config layer loading from the file system.

mod fs_source;

pub use fs_source::FsConfigSource;
