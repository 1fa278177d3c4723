//! File system ArtifactSource implementation
//!
//! Artifacts are pre-built archives at `<packages>/<project>-<function>.zip`.
//!
//! Remote names alone are ambiguous when projects share a prefix
//! (`api-v2-handler.zip` could be `api`/`v2-handler` or `api-v2`/`handler`).
//! When the project's source directory `<projects>/<project>/` exists,
//! discovery keeps only archives whose function has a file there.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::entities::Artifact;
use crate::domain::ports::{ArtifactError, ArtifactSource};
use crate::domain::value_objects::FunctionId;

const ARCHIVE_EXTENSION: &str = "zip";

#[derive(Debug, Clone)]
pub struct FsArtifactSource {
    packages_dir: PathBuf,
    projects_dir: Option<PathBuf>,
}

impl FsArtifactSource {
    pub fn new(packages_dir: impl Into<PathBuf>) -> Self {
        Self {
            packages_dir: packages_dir.into(),
            projects_dir: None,
        }
    }

    /// Root of the per-project source directories used to disambiguate
    /// discovery.
    pub fn with_projects_dir(mut self, projects_dir: impl Into<PathBuf>) -> Self {
        self.projects_dir = Some(projects_dir.into());
        self
    }

    pub fn packages_dir(&self) -> &Path {
        &self.packages_dir
    }

    pub fn path_for(&self, id: &FunctionId) -> PathBuf {
        self.packages_dir
            .join(format!("{}.{}", id.remote_name(), ARCHIVE_EXTENSION))
    }
}

impl FsArtifactSource {
    /// Function names with a file in `<projects>/<project>/`, or `None` when
    /// that directory is not available.
    fn source_functions(&self, project: &str) -> Result<Option<BTreeSet<String>>, ArtifactError> {
        let Some(projects_dir) = &self.projects_dir else {
            return Ok(None);
        };
        let dir = projects_dir.join(project);
        if !dir.is_dir() {
            return Ok(None);
        }

        let io_error = |e: io::Error| ArtifactError::Io {
            path: dir.clone(),
            message: e.to_string(),
        };
        let mut functions = BTreeSet::new();
        for entry in fs::read_dir(&dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if !path.is_file() {
                continue;
            }
            // `hello.js` and `hello.meta.json` both name `hello`
            if let Some(name) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.split('.').next())
            {
                if !name.is_empty() {
                    functions.insert(name.to_string());
                }
            }
        }
        Ok(Some(functions))
    }
}

impl ArtifactSource for FsArtifactSource {
    fn load(&self, id: &FunctionId) -> Result<Artifact, ArtifactError> {
        let path = self.path_for(id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ArtifactError::Missing {
                    id: id.to_string(),
                    path,
                });
            }
            Err(e) => {
                return Err(ArtifactError::Io {
                    path,
                    message: e.to_string(),
                });
            }
        };

        if bytes.is_empty() {
            return Err(ArtifactError::Empty {
                id: id.to_string(),
                path,
            });
        }

        debug!(function = %id, path = %path.display(), bytes = bytes.len(), "read artifact");
        Ok(Artifact::new(bytes))
    }

    fn discover(&self, project: &str) -> Result<Vec<FunctionId>, ArtifactError> {
        let entries = fs::read_dir(&self.packages_dir).map_err(|e| ArtifactError::Io {
            path: self.packages_dir.clone(),
            message: e.to_string(),
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| ArtifactError::Io {
                    path: self.packages_dir.clone(),
                    message: e.to_string(),
                })?
                .path();
            if !path.is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(ARCHIVE_EXTENSION)
            {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Some(id) = FunctionId::from_remote_name(project, stem) {
                ids.push(id);
            }
        }

        if let Some(functions) = self.source_functions(project)? {
            ids.retain(|id| {
                let known = functions.contains(id.function());
                if !known {
                    debug!(function = %id, "archive has no source in the project, skipped");
                }
                known
            });
        }

        ids.sort();
        debug!(project, count = ids.len(), "discovered packaged functions");
        Ok(ids)
    }
}
