//! gjslint-stage CLI binary entry point.
//! Reads the matched files, pushes them through the stage and prints JSON.

use clap::Parser;
use gjslint_stage::cli::Cli;
use gjslint_stage::error::CliError;
use gjslint_stage::pipeline::{self, Collected};
use gjslint_stage::{config, output, source, GjslintProcess, Stage};
use std::process::ExitCode;
use tokio::sync::mpsc;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", output::error_prefix(), e);
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let options = config::resolve_options(
        cli.config.as_deref(),
        cli.pass_only_error_override(),
        &cli.flags,
        cli.binary.as_deref(),
    )?;
    let root = std::env::current_dir().map_err(|source| CliError::Io {
        path: ".".into(),
        source,
    })?;
    let paths = source::expand_patterns(&root, &cli.patterns)?;
    let files = source::read_all(paths).await?;

    let (tx, rx) = mpsc::channel(16);
    let feeder = tokio::spawn(source::feed(files, tx));
    let mut stage = Stage::new(options, GjslintProcess);
    let mut out = Collected::default();
    pipeline::drive(&mut stage, rx, &mut out).await;
    if let Err(e) = feeder.await {
        error!("File feeder task failed: {}", e);
    }

    if let Err(e) = output::print_report(&out) {
        error!("Failed to write report: {}", e);
        return Ok(ExitCode::from(2));
    }
    for e in &out.errors {
        error!("{}", e);
    }
    if !out.errors.is_empty() {
        return Ok(ExitCode::from(2));
    }
    if output::failed_count(&out) > 0 || stage.lint_failed() {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}
