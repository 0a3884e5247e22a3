//! # Timecode Toolbox CLI
//!
//! Command-line front end for `tc_core`: convert between timecode formats,
//! add and subtract timecodes, preview partially typed input and shift BWF
//! sample offsets by whole frames.
//!
//! ```text
//! tc convert 01:00:00:00 --fps 24
//! tc calc 01:00:00:00 + -934 --frames --fps 24
//! tc preview smpte 0100 --fps 25
//! tc offset --time-reference 172800000 --sample-rate 48000 --frames -12 --fps 25
//! ```

use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::Commands;
use config::{Config, GlobalArgs};

/// Timecode conversion and arithmetic
#[derive(Parser, Debug)]
#[command(name = "tc", author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config::default_log_filter(cli.global.verbose).into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_args(&cli.global)?;
    commands::run(&cli.command, &config)
}
