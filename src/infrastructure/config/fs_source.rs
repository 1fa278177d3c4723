//! File system ConfigSource implementation
//!
//! Layout:
//! - default:     `<config>/env/lambda-default.<ext>`
//! - environment: `<config>/env/<stage>/lambda.<ext>`
//! - function:    `<projects>/<project>/<function>.meta.<ext>`
//!
//! `<ext>` is tried in the order json, toml, yaml, yml.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{find_line_number, suggest_key};
use crate::domain::entities::{ConfigDocument, ConfigError, CANONICAL_KEYS};
use crate::domain::ports::{ConfigSource, LoadedDocument};
use crate::domain::value_objects::{ConfigWarning, FunctionId};

const EXTENSIONS: &[&str] = &["json", "toml", "yaml", "yml"];

#[derive(Debug, Clone)]
pub struct FsConfigSource {
    config_dir: PathBuf,
    projects_dir: PathBuf,
}

impl FsConfigSource {
    pub fn new(config_dir: impl Into<PathBuf>, projects_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            projects_dir: projects_dir.into(),
        }
    }

    fn env_dir(&self) -> PathBuf {
        self.config_dir.join("env")
    }
}

impl ConfigSource for FsConfigSource {
    fn load_default(&self) -> Result<LoadedDocument, ConfigError> {
        let dir = self.env_dir();
        match find_layer(&dir, "lambda-default") {
            Some(path) => load_file(&path),
            None => Err(ConfigError::Missing {
                origin: dir.join("lambda-default.json").display().to_string(),
            }),
        }
    }

    fn load_environment(&self, stage: &str) -> Result<Option<LoadedDocument>, ConfigError> {
        if !is_plain_name(stage) {
            return Err(ConfigError::Parse {
                origin: stage.to_string(),
                message: "stage must be a plain directory name".to_string(),
            });
        }

        find_layer(&self.env_dir().join(stage), "lambda")
            .map(|path| load_file(&path))
            .transpose()
    }

    fn load_function(&self, id: &FunctionId) -> Result<Option<LoadedDocument>, ConfigError> {
        let dir = self.projects_dir.join(id.project());
        find_layer(&dir, &format!("{}.meta", id.function()))
            .map(|path| load_file(&path))
            .transpose()
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

/// First existing `<dir>/<stem>.<ext>`.
fn find_layer(dir: &Path, stem: &str) -> Option<PathBuf> {
    let mut found = EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", stem, ext)))
        .filter(|path| path.is_file());

    let first = found.next()?;
    for shadowed in found {
        warn!(
            used = %first.display(),
            ignored = %shadowed.display(),
            "multiple config files for the same layer"
        );
    }
    Some(first)
}

fn load_file(path: &Path) -> Result<LoadedDocument, ConfigError> {
    let origin = path.display().to_string();
    debug!(path = %origin, "loading config layer");

    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        origin: origin.clone(),
        message: e.to_string(),
    })?;

    let value = parse_value(path, &content).map_err(|message| ConfigError::Parse {
        origin: origin.clone(),
        message,
    })?;

    let parsed = ConfigDocument::from_value(value, &origin)?;
    let warnings = parsed
        .unknown_keys
        .iter()
        .map(|key_path| {
            let key = key_path.split('.').next_back().unwrap_or(key_path).to_string();
            ConfigWarning {
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key, CANONICAL_KEYS),
                key,
            }
        })
        .collect();

    Ok(LoadedDocument {
        document: parsed.document,
        warnings,
    })
}

fn parse_value(path: &Path, content: &str) -> Result<Value, String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(content).map_err(|e| e.to_string()),
        Some("yaml") | Some("yml") => serde_yaml_ng::from_str(content).map_err(|e| e.to_string()),
        _ => serde_json::from_str(content).map_err(|e| e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct Workspace {
        _dir: tempfile::TempDir,
        source: FsConfigSource,
        root: PathBuf,
    }

    fn workspace() -> Workspace {
        let dir = tempdir().unwrap();
        let root = dir.path().to_path_buf();
        fs::create_dir_all(root.join("config/env")).unwrap();
        fs::create_dir_all(root.join("projects/example")).unwrap();
        Workspace {
            source: FsConfigSource::new(root.join("config"), root.join("projects")),
            root,
            _dir: dir,
        }
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn id(name: &str) -> FunctionId {
        FunctionId::new("example", name).unwrap()
    }

    #[test]
    fn loads_json_default_layer() {
        let ws = workspace();
        write(
            &ws.root,
            "config/env/lambda-default.json",
            r#"{
  "Runtime": "nodejs18.x",
  "Tags": { "Team": "core" },
  "NetworkPresets": {
    "external": { "SubnetIds": ["public"], "SecurityGroupIds": ["open"] }
  }
}"#,
        );

        let loaded = ws.source.load_default().unwrap();

        assert_eq!(loaded.document.runtime.as_deref(), Some("nodejs18.x"));
        assert_eq!(loaded.document.network_presets.len(), 1);
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn missing_default_layer_is_an_error() {
        let ws = workspace();
        let err = ws.source.load_default().unwrap_err();
        assert!(matches!(err, ConfigError::Missing { .. }));
    }

    #[test]
    fn loads_toml_environment_layer() {
        let ws = workspace();
        write(
            &ws.root,
            "config/env/prod/lambda.toml",
            r#"
Timeout = 30
NetworkConfig = "internal"

[Environment.Variables]
STAGE = "prod"
"#,
        );

        let loaded = ws.source.load_environment("prod").unwrap().unwrap();

        assert_eq!(loaded.document.timeout, Some(30));
        assert_eq!(
            loaded.document.variables().and_then(|v| v.get("STAGE")).map(String::as_str),
            Some("prod")
        );
    }

    #[test]
    fn absent_environment_layer_is_none() {
        let ws = workspace();
        assert!(ws.source.load_environment("qa").unwrap().is_none());
    }

    #[test]
    fn stage_names_cannot_escape_env_dir() {
        let ws = workspace();
        assert!(ws.source.load_environment("../secrets").is_err());
    }

    #[test]
    fn loads_yaml_function_layer() {
        let ws = workspace();
        write(
            &ws.root,
            "projects/example/hello.meta.yaml",
            "MemorySize: 256\nNetworkConfig:\n  SubnetIds: [a]\n  SecurityGroupIds: [b]\n",
        );

        let loaded = ws.source.load_function(&id("hello")).unwrap().unwrap();

        assert_eq!(loaded.document.memory_size, Some(256));
        assert!(loaded.document.network_config.is_some());
        assert!(ws.source.load_function(&id("other")).unwrap().is_none());
    }

    #[test]
    fn legacy_function_meta_is_rejected() {
        let ws = workspace();
        write(
            &ws.root,
            "projects/example/hello.meta.json",
            r#"{ "memory": 256, "vpc": "internal" }"#,
        );

        let err = ws.source.load_function(&id("hello")).unwrap_err();
        assert!(matches!(err, ConfigError::LegacyKey { .. }));
    }

    #[test]
    fn unknown_keys_produce_warnings_with_suggestions() {
        let ws = workspace();
        write(
            &ws.root,
            "projects/example/hello.meta.json",
            "{\n  \"Runtime\": \"nodejs18.x\",\n  \"Timeuot\": 3\n}",
        );

        let loaded = ws.source.load_function(&id("hello")).unwrap().unwrap();

        assert_eq!(loaded.warnings.len(), 1);
        let warning = &loaded.warnings[0];
        assert_eq!(warning.key, "Timeuot");
        assert_eq!(warning.line, Some(3));
        assert_eq!(warning.suggestion.as_deref(), Some("Timeout"));
    }

    #[test]
    fn syntax_errors_name_the_file() {
        let ws = workspace();
        write(&ws.root, "config/env/lambda-default.json", "{ not json");

        let err = ws.source.load_default().unwrap_err();
        match err {
            ConfigError::Parse { origin, .. } => assert!(origin.ends_with("lambda-default.json")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn json_wins_over_other_extensions() {
        let ws = workspace();
        write(&ws.root, "config/env/lambda-default.json", r#"{ "Timeout": 1 }"#);
        write(&ws.root, "config/env/lambda-default.toml", "Timeout = 2\n");

        let loaded = ws.source.load_default().unwrap();
        assert_eq!(loaded.document.timeout, Some(1));
    }
}
