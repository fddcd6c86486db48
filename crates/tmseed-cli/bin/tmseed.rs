//! `tmseed` binary entry point.
//!
//! Thin wrapper around the tmseed-cli library that parses arguments,
//! initializes logging, runs the selected strategy and prints the summary.

use anyhow::{Context, Result};
use tmseed_cli::{Cli, Command, run};

fn main() -> Result<()> {
    let cli = Cli::from_args();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let strategy = match &cli.command {
        Command::Archive(_) => "archive",
        Command::Dirs(_) => "dirs",
    };
    tracing::info!("tmseed {} starting", strategy);

    let summary = run(&cli.command).with_context(|| format!("tmseed {strategy} failed"))?;

    tracing::info!("{}", summary);
    println!("{summary}");

    Ok(())
}
