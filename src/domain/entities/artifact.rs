//! Artifact entity - the packaged, deployment-ready bytes of one function.

use std::sync::Arc;

use crate::domain::value_objects::ContentHash;

/// Opaque deployment package.
///
/// The contents are never interpreted; cloning shares the underlying buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    bytes: Arc<[u8]>,
    hash: ContentHash,
}

impl Artifact {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = bytes.into();
        let hash = ContentHash::from_bytes(&bytes);
        Self {
            bytes: bytes.into(),
            hash,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }
}
