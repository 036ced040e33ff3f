//! Binary crate for the `weather-board` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Human-friendly output and the render payload handed to the renderer

use clap::Parser;

mod cli;
mod payload;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cmd = cli::Cli::parse();
    cmd.run().await
}
