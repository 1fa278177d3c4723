//! `fndeploy deploy`

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use tracing::{info, warn};

use fndeploy::application::{CancellationFlag, DeployOptions, DeployUseCase};
use fndeploy::domain::ports::{ArtifactSource, DeployEventSink, NoopEventSink};
use fndeploy::domain::value_objects::FunctionId;
use fndeploy::infrastructure::{FsArtifactSource, HttpFunctionClient, JsonEventSink};
use fndeploy::FnDeployError;

use super::workspace::Workspace;
use crate::cli::DeployArgs;
use crate::ui::views::deploy::render_deploy_summary;

pub async fn cmd_deploy(
    root: &Path,
    stage: Option<&str>,
    args: DeployArgs,
    json: bool,
) -> Result<ExitCode> {
    let mut ws = Workspace::load(root, stage)?;
    if let Some(endpoint) = &args.endpoint {
        ws.config.remote.endpoint = endpoint.clone();
    }
    if let Some(concurrency) = args.concurrency {
        if concurrency == 0 {
            bail!("--concurrency must be at least 1");
        }
        ws.config.deploy.max_concurrency = concurrency;
    }

    let artifacts = ws.artifact_source();
    let ids = select_functions(&args.project, &args.functions, &artifacts)?;

    let client = HttpFunctionClient::new(
        &ws.config.remote.endpoint,
        Duration::from_secs(ws.config.remote.timeout_secs),
    )?
    .with_token(ws.config.remote.api_token.clone());

    let initial_alias = args
        .alias
        .clone()
        .unwrap_or_else(|| ws.config.deploy.initial_alias().to_string());
    let options = DeployOptions::new(ws.stage())
        .with_initial_alias(initial_alias)
        .with_max_concurrency(ws.config.deploy.max_concurrency)
        .with_exists_check(args.exists_check.unwrap_or(ws.config.deploy.exists_check))
        .with_overrides(args.overrides.to_overrides())
        .with_account_id(ws.config.remote.account_id.clone());

    let cancel = CancellationFlag::new();
    install_interrupt_handler(&cancel);

    let use_case = DeployUseCase::new(
        Arc::new(ws.config_source()),
        Arc::new(artifacts),
        Arc::new(client),
    );
    let sink: Arc<dyn DeployEventSink> = if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(NoopEventSink)
    };

    let summary = use_case
        .execute_with_events(&ids, &options, sink, &cancel)
        .await;

    if !json {
        print!("{}", render_deploy_summary(&summary));
    }

    Ok(if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Named functions in the order given (duplicates dropped), or every
/// packaged function of the project.
fn select_functions(
    project: &str,
    names: &[String],
    artifacts: &FsArtifactSource,
) -> Result<Vec<FunctionId>> {
    if names.is_empty() {
        let ids = artifacts.discover(project)?;
        if ids.is_empty() {
            return Err(FnDeployError::NoFunctions {
                project: project.to_string(),
                dir: artifacts.packages_dir().to_path_buf(),
            }
            .into());
        }
        info!(project, count = ids.len(), "deploying every packaged function");
        return Ok(ids);
    }

    let mut ids: Vec<FunctionId> = Vec::with_capacity(names.len());
    for name in names {
        let id = FunctionId::new(project, name)?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

fn install_interrupt_handler(cancel: &CancellationFlag) {
    let flag = cancel.clone();
    let result = ctrlc::set_handler(move || {
        if !flag.is_cancelled() {
            eprintln!("interrupt received, finishing in-flight stages...");
        }
        flag.cancel();
    });
    if let Err(err) = result {
        warn!(error = %err, "could not install Ctrl-C handler");
    }
}
