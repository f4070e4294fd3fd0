//! Binary crate for the `geopredict` terminal client.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and interactive configuration
//! - The two-screen session state machine and its event loop
//! - Rendering the input form and the result gauge

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Silent unless RUST_LOG is set; logs go to stderr so they can be
    // redirected away from the TUI.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
