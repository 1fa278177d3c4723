//! Configuration loading

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::value_objects::{ConfigWarning, ExistsCheckPolicy};
use crate::error::{FnDeployError, FnDeployResult};

use super::types::Config;

/// File name looked up at the workspace root
pub const CONFIG_FILE_NAME: &str = "fndeploy.toml";

const TOOL_KEYS: &[&str] = &[
    "deploy",
    "stage",
    "initial_alias",
    "max_concurrency",
    "exists_check",
    "paths",
    "config_dir",
    "projects_dir",
    "packages_dir",
    "remote",
    "endpoint",
    "timeout_secs",
    "account_id",
];

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> FnDeployResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| FnDeployError::InvalidToolConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = last_segment(&path_str).to_string();
            ConfigWarning {
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key, TOOL_KEYS),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load `<root>/fndeploy.toml` or defaults, then environment overrides.
pub fn load_or_default(root: &Path) -> FnDeployResult<(Config, Vec<ConfigWarning>)> {
    let path = root.join(CONFIG_FILE_NAME);
    let (config, warnings) = if path.is_file() {
        debug!(path = %path.display(), "loading tool config");
        load_with_warnings(&path)?
    } else {
        debug!(path = %path.display(), "no tool config, using defaults");
        (Config::default(), Vec::new())
    };

    Ok((with_env_overrides(config)?, warnings))
}

/// Apply environment variable overrides (FNDEPLOY_* prefix)
pub fn with_env_overrides(config: Config) -> FnDeployResult<Config> {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Overrides from an arbitrary lookup, so tests need not touch the process
/// environment.
pub(crate) fn apply_overrides(
    mut config: Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> FnDeployResult<Config> {
    // FNDEPLOY_STAGE
    if let Some(stage) = non_empty(lookup("FNDEPLOY_STAGE")) {
        config.deploy.stage = stage;
    }

    // FNDEPLOY_ENDPOINT
    if let Some(endpoint) = non_empty(lookup("FNDEPLOY_ENDPOINT")) {
        config.remote.endpoint = endpoint;
    }

    // FNDEPLOY_MAX_CONCURRENCY
    if let Some(raw) = non_empty(lookup("FNDEPLOY_MAX_CONCURRENCY")) {
        config.deploy.max_concurrency = parse_concurrency("FNDEPLOY_MAX_CONCURRENCY", &raw)?;
    }

    // FNDEPLOY_EXISTS_CHECK
    if let Some(raw) = non_empty(lookup("FNDEPLOY_EXISTS_CHECK")) {
        config.deploy.exists_check =
            raw.parse::<ExistsCheckPolicy>()
                .map_err(|reason| FnDeployError::InvalidSetting {
                    key: "FNDEPLOY_EXISTS_CHECK".to_string(),
                    value: raw.clone(),
                    reason,
                })?;
    }

    // FNDEPLOY_ACCOUNT_ID
    if let Some(account) = non_empty(lookup("FNDEPLOY_ACCOUNT_ID")) {
        config.remote.account_id = Some(account);
    }

    // FNDEPLOY_API_TOKEN
    if let Some(token) = non_empty(lookup("FNDEPLOY_API_TOKEN")) {
        config.remote.api_token = Some(token);
    }

    Ok(config)
}

/// Parse a concurrency bound; zero and non-numbers are rejected.
pub fn parse_concurrency(key: &str, raw: &str) -> FnDeployResult<usize> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(FnDeployError::InvalidSetting {
            key: key.to_string(),
            value: raw.to_string(),
            reason: "expected a positive integer".to_string(),
        }),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn last_segment(path: &str) -> &str {
    path.split('.').next_back().unwrap_or(path)
}

/// 1-indexed line of the first occurrence of `needle`.
pub(crate) fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

/// Closest candidate within edit distance 2.
pub(crate) fn suggest_key(unknown: &str, candidates: &[&str]) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
