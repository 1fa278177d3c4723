//! fndeploy CLI
//!
//! Usage: fndeploy [OPTIONS] <COMMAND>
//!
//! Commands:
//!   deploy   Create or update functions on the remote platform
//!   resolve  Show the merged config and request payload for one function
//!   presets  List the network presets visible to a stage
//!   init     Scaffold fndeploy.toml and the default/stage config layers
//!
//! Exit codes: 0 when every function fully succeeded, 1 when any function
//! failed, was only partially created, or was cancelled, 2 when the command
//! itself could not run.

mod cli;
mod commands;
mod ui;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use is_terminal::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Deploy(args) => {
            commands::deploy::cmd_deploy(&cli.root, cli.stage.as_deref(), args, cli.json).await
        }
        Commands::Resolve(args) => {
            commands::resolve::cmd_resolve(&cli.root, cli.stage.as_deref(), args, cli.json)
        }
        Commands::Presets => commands::presets::cmd_presets(&cli.root, cli.stage.as_deref(), cli.json),
        Commands::Init(args) => commands::init::cmd_init(&cli.root, args, cli.json),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            ui::error::print_error(&err, cli.json);
            ExitCode::from(2)
        }
    }
}

/// Logs go to stderr; stdout carries the summary or NDJSON stream.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,fndeploy={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal())
                .with_target(verbose > 1)
                .without_time(),
        )
        .init();
}
