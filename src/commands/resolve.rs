//! `fndeploy resolve`

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use tracing::warn;

use fndeploy::application::ResolveUseCase;
use fndeploy::domain::value_objects::FunctionId;

use super::workspace::Workspace;
use crate::cli::ResolveArgs;
use crate::ui::json;
use crate::ui::views::resolve::{render_resolve, resolve_json};

pub fn cmd_resolve(
    root: &Path,
    stage: Option<&str>,
    args: ResolveArgs,
    as_json: bool,
) -> Result<ExitCode> {
    let ws = Workspace::load(root, stage)?;
    let id = FunctionId::new(&args.project, &args.function)?;

    let use_case = ResolveUseCase::new(Arc::new(ws.config_source()));
    let layers = use_case.load_layers(ws.stage())?;
    let resolved = use_case.execute(&layers, &id)?;
    for warning in layers.warnings().iter().chain(&resolved.warnings) {
        warn!("{}", warning);
    }

    let overrides = args.overrides.to_overrides();
    let configuration = resolved
        .requests(&overrides, ws.config.remote.account_id.as_deref())
        .configuration();

    if as_json {
        json::emit(resolve_json(ws.stage(), &resolved, &configuration))?;
    } else {
        print!("{}", render_resolve(ws.stage(), &resolved, &configuration));
    }
    Ok(ExitCode::SUCCESS)
}
