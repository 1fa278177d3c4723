//! `fndeploy presets`

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;

use fndeploy::application::LayeredDefaults;

use super::workspace::Workspace;
use crate::ui::json;
use crate::ui::views::presets::{preset_rows, preset_json, render_presets};

pub fn cmd_presets(root: &Path, stage: Option<&str>, as_json: bool) -> Result<ExitCode> {
    let ws = Workspace::load(root, stage)?;
    let layers = LayeredDefaults::load(&ws.config_source(), ws.stage())?;
    let rows = preset_rows(&layers);

    if as_json {
        for row in &rows {
            json::emit(preset_json(ws.stage(), row))?;
        }
    } else {
        print!("{}", render_presets(ws.stage(), &rows));
    }
    Ok(ExitCode::SUCCESS)
}
