//! Function identifier value object
//!
//! A function is addressed remotely by `{project}-{function}`. The identifier
//! is the lookup key for every remote operation and never changes once built.

use std::fmt;

use serde::Serialize;

/// Source extensions stripped from function names given on the command line.
const SOURCE_EXTENSIONS: &[&str] = &[".js", ".mjs", ".ts", ".py"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FunctionIdError {
    #[error("project name must not be empty")]
    EmptyProject,

    #[error("function name must not be empty")]
    EmptyFunction,

    #[error("invalid character '{ch}' in '{name}' (allowed: letters, digits, '-', '_')")]
    InvalidCharacter { name: String, ch: char },
}

/// Unique remote name of a deployed function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct FunctionId {
    project: String,
    function: String,
}

impl FunctionId {
    pub fn new(project: &str, function: &str) -> Result<Self, FunctionIdError> {
        let project = project.trim();
        let function = strip_source_extension(function.trim());

        if project.is_empty() {
            return Err(FunctionIdError::EmptyProject);
        }
        if function.is_empty() {
            return Err(FunctionIdError::EmptyFunction);
        }
        validate_name(project)?;
        validate_name(function)?;

        Ok(Self {
            project: project.to_string(),
            function: function.to_string(),
        })
    }

    /// Parse a remote name back into its parts, given the owning project.
    ///
    /// Returns `None` when `remote_name` does not carry the `{project}-` prefix.
    pub fn from_remote_name(project: &str, remote_name: &str) -> Option<Self> {
        let function = remote_name.strip_prefix(project)?.strip_prefix('-')?;
        Self::new(project, function).ok()
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    /// The remote resource name (`{project}-{function}`).
    pub fn remote_name(&self) -> String {
        format!("{}-{}", self.project, self.function)
    }

    /// Handler reference derived from the identifier (`{project}-{function}.handler`).
    pub fn handler(&self) -> String {
        format!("{}.handler", self.remote_name())
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.project, self.function)
    }
}

impl From<FunctionId> for String {
    fn from(id: FunctionId) -> Self {
        id.remote_name()
    }
}

fn strip_source_extension(name: &str) -> &str {
    SOURCE_EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .unwrap_or(name)
}

fn validate_name(name: &str) -> Result<(), FunctionIdError> {
    match name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        Some(ch) => Err(FunctionIdError::InvalidCharacter {
            name: name.to_string(),
            ch,
        }),
        None => Ok(()),
    }
}
