//! Shared helpers for fndeploy CLI tests.
//!
//! `TestWorkspace` lays out an isolated workspace (config layers, function
//! metadata, packages) in a temp directory and runs the binary against it
//! with every `FNDEPLOY_*` variable cleared.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "FNDEPLOY_STAGE",
    "FNDEPLOY_ENDPOINT",
    "FNDEPLOY_MAX_CONCURRENCY",
    "FNDEPLOY_EXISTS_CHECK",
    "FNDEPLOY_ACCOUNT_ID",
    "FNDEPLOY_API_TOKEN",
    "RUST_LOG",
];

pub const DEFAULT_LAYER: &str = r#"{
  "Runtime": "nodejs18.x",
  "Role": "lambda-basic",
  "Timeout": 3,
  "MemorySize": 128,
  "Tags": { "owner": "platform" },
  "NetworkPresets": {
    "external": { "SubnetIds": ["subnet-pub"], "SecurityGroupIds": ["sg-pub"] },
    "internal": { "SubnetIds": ["subnet-a"], "SecurityGroupIds": ["sg-a"] }
  }
}"#;

/// Result of one CLI invocation
#[derive(Debug)]
pub struct TestResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).expect("stdout line is not JSON"))
            .collect()
    }
}

pub struct TestWorkspace {
    pub dir: TempDir,
}

impl TestWorkspace {
    /// Empty workspace with only the default layer.
    pub fn new() -> Self {
        let ws = Self::empty();
        ws.write("config/env/lambda-default.json", DEFAULT_LAYER);
        ws
    }

    /// Workspace with no files at all.
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    pub fn package(&self, remote_name: &str) -> &Self {
        let path = self.path(&format!("packages/{}.zip", remote_name));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"PK\x03\x04 fake archive").unwrap();
        self
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        let bin = env!("CARGO_BIN_EXE_fndeploy");
        let mut command = Command::new(bin);
        command.current_dir(self.root()).args(args);
        for var in ENV_VARS {
            command.env_remove(var);
        }

        let output = command.output().unwrap();
        TestResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}
