use fndeploy::domain::entities::ConfigError;
use fndeploy::FnDeployError;

use super::json;

/// Print a command-level error: NDJSON on stdout in `--json` mode,
/// otherwise text on stderr.
pub fn print_error(err: &anyhow::Error, as_json: bool) {
    if as_json {
        let _ = json::emit(serde_json::json!({
            "event": "error",
            "message": format!("{:#}", err),
        }));
    } else {
        eprint!("{}", format_error(err));
    }
}

pub fn format_error(err: &anyhow::Error) -> String {
    let mut out = format!("[ERROR] {:#}\n", err);
    if let Some(fix) = fix_for(err) {
        out.push_str(&format!("  fix: {}\n", fix));
    }
    out
}

fn fix_for(err: &anyhow::Error) -> Option<String> {
    let config = err.downcast_ref::<ConfigError>().or_else(|| {
        err.downcast_ref::<FnDeployError>().and_then(|e| match e {
            FnDeployError::Config(config) => Some(config),
            _ => None,
        })
    });

    match config {
        Some(ConfigError::LegacyKey { key, canonical, .. }) => {
            Some(format!("rename '{}' to '{}'", key, canonical))
        }
        Some(ConfigError::UnknownPreset { name }) => Some(format!(
            "define '{}' under NetworkPresets in the default or environment layer",
            name
        )),
        Some(ConfigError::Missing { .. }) => {
            Some("create config/env/lambda-default.json or set [paths] config_dir".to_string())
        }
        _ => match err.downcast_ref::<FnDeployError>() {
            Some(FnDeployError::NoFunctions { .. }) => {
                Some("build the project's packages first, or name functions explicitly".to_string())
            }
            _ => None,
        },
    }
}
