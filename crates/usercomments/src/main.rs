//! usercomments CLI entry point.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use usercomments::cli::Cli;
use usercomments::commands::execute;
use usercomments::{open_store, Config};
use usercomments_core::storage::{repository_error_to_exit_code, RepositoryError};

/// Configuration error (sysexits `EX_CONFIG`).
const EX_CONFIG: u8 = 78;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err
                .downcast_ref::<RepositoryError>()
                .map(repository_error_to_exit_code)
                .and_then(|code| u8::try_from(code).ok())
                .unwrap_or(EX_CONFIG);
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.apply_overrides(Config::from_env().context("Failed to load configuration")?);
    tracing::debug!(?config, "Configuration loaded");

    let store = open_store(&config)
        .await
        .context("Failed to open comment store")?;

    let lines = execute(cli.command, &store, &config, cli.format)
        .await
        .with_context(|| format!("Command failed against {}", config.target_display()))?;

    for line in lines {
        println!("{line}");
    }
    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "usercomments=info".into());

    let fmt_layer = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
