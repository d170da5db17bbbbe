#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]
#![allow(clippy::unused_async)]

use anyhow::Context;
use clap::Parser;
use wh_config::WhConfig;

mod cli;
mod commands;
mod context;
mod output;

/// Environment variable holding the `EnvFilter` directive.
const LOG_ENV: &str = "WAREHOUSE_LOG";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("whc error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = WhConfig::load_with_dotenv().context("failed to load warehouse configuration")?;
    init_tracing(cli.quiet, cli.verbose, config.log.level())?;

    let flags = cli.global_flags();
    let mut ctx = context::AppContext::init(config, &flags)
        .await
        .context("failed to initialize warehouse application context")?;

    commands::dispatch::dispatch(cli.command, &mut ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool, configured: Option<&str>) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        configured.unwrap_or("warn")
    };

    let filter = match tracing_subscriber::EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => tracing_subscriber::EnvFilter::try_new(level)
            .with_context(|| format!("invalid log filter '{level}'"))?,
    };

    // stdout carries command output, including CSV exports.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
