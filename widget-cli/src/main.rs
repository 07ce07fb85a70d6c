//! Binary crate for the `weather-widget` command-line host.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Terminal implementations of the widget's page regions

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod logging;
mod terminal;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    logging::init()?;
    let cmd = cli::Cli::parse();
    cmd.run().await
}
