//! Binary crate for the `weathertime` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive lookup session
//! - Process setup (logging, configuration)

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
