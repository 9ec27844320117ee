//! Main entry point for kaelic-shell.
//!
//! Parses flags, initializes logging, loads the config and runs the shell
//! loop until `exit` or end of input.

use anyhow::Result;
use clap::Parser;

use kaelic_shell::cli::Cli;
use kaelic_shell::utils;
use kaelic_shell::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging before anything else
    let log_dir = cli.log_dir.clone().unwrap_or_else(utils::logger::default_log_dir);
    utils::logger::init_logging(&log_dir);

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    tracing::debug!(?config, "configuration loaded");

    let mut app = App::from_config(&config)?;
    app.run().await
}
