//! Init command - scaffold a deploy workspace
//!
//! Writes `fndeploy.toml`, the default layer with the standard network
//! presets, one environment layer per stage, and empty `projects/` and
//! `packages/` directories. Existing files are kept unless `--force`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};

use fndeploy::config::CONFIG_FILE_NAME;

use super::workspace::Workspace;
use crate::cli::InitArgs;
use crate::ui::json;

const CONFIG_TEMPLATE: &str = r#"[deploy]
stage = "dev"
max_concurrency = 4
exists_check = "strict"

[paths]
config_dir = "config"
projects_dir = "projects"
packages_dir = "packages"

[remote]
endpoint = "http://localhost:9001"
timeout_secs = 30
"#;

const DEFAULT_LAYER_TEMPLATE: &str = r#"{
  "Runtime": "nodejs18.x",
  "Role": "lambda-basic-execution",
  "Timeout": 10,
  "MemorySize": 128,
  "Tags": {},
  "Environment": { "Variables": {} },
  "NetworkPresets": {
    "external": { "SubnetIds": [], "SecurityGroupIds": [] },
    "internal": { "SubnetIds": [], "SecurityGroupIds": [] },
    "internalWithNAT": { "SubnetIds": [], "SecurityGroupIds": [] }
  }
}
"#;

fn environment_layer_template(stage: &str) -> String {
    format!(
        "{{\n  \"Tags\": {{ \"Stage\": \"{}\" }},\n  \"Environment\": {{ \"Variables\": {{ \"STAGE\": \"{}\" }} }}\n}}\n",
        stage, stage
    )
}

pub fn cmd_init(root: &Path, args: InitArgs, as_json: bool) -> Result<ExitCode> {
    for stage in &args.stages {
        if !is_plain_name(stage) {
            bail!(
                "invalid stage name '{}' (allowed: letters, digits, '-', '_')",
                stage
            );
        }
    }

    let ws = Workspace::load(root, None)?;
    let env_dir = ws.paths.config_dir.join("env");

    let mut files: Vec<(PathBuf, String)> = vec![
        (root.join(CONFIG_FILE_NAME), CONFIG_TEMPLATE.to_string()),
        (
            env_dir.join("lambda-default.json"),
            DEFAULT_LAYER_TEMPLATE.to_string(),
        ),
    ];
    for stage in &args.stages {
        files.push((
            env_dir.join(stage).join("lambda.json"),
            environment_layer_template(stage),
        ));
    }

    if !args.force {
        if let Some((existing, _)) = files.iter().find(|(path, _)| path.exists()) {
            bail!(
                "{} already exists. Use --force to overwrite.",
                existing.display()
            );
        }
    }

    for (path, content) in &files {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    }
    for dir in [&ws.paths.projects_dir, &ws.paths.packages_dir] {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }

    if as_json {
        json::emit(serde_json::json!({
            "event": "complete",
            "command": "init",
            "files": files
                .iter()
                .map(|(path, _)| path.display().to_string())
                .collect::<Vec<_>>(),
        }))?;
    } else {
        println!("Initialized fndeploy workspace in {}", root.display());
        for (path, _) in &files {
            println!("  - {}", path.strip_prefix(root).unwrap_or(path).display());
        }
        println!();
        println!("Next: fill in the NetworkPresets, then `fndeploy presets` to check them");
    }
    Ok(ExitCode::SUCCESS)
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
