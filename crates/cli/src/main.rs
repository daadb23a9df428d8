//! `rtcmos` - score stream statistics from the command line
//!
//! ```text
//! rtcmos score --input stats.json --pretty
//! cat stats.json | rtcmos --log-level debug score --detailed
//! rtcmos defaults > mos.toml
//! ```

mod commands;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::{parse_log_level, setup_logging, LoggingConfig};

#[derive(Parser, Debug)]
#[command(name = "rtcmos", version, about = "Estimate call quality (MOS) from stream statistics")]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[arg(long, global = true, default_value = "info", env = "RTCMOS_LOG_LEVEL")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Include source file and line in log lines
    #[arg(long, global = true)]
    log_location: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a JSON array of stat samples
    Score {
        /// Input file, `-` or omitted for stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// TOML coefficient table overriding the built-in values
        #[arg(short, long, env = "RTCMOS_CONFIG")]
        config: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,

        /// Include the model breakdown for each sample
        #[arg(long)]
        detailed: bool,

        /// Score samples on all cores
        #[arg(long)]
        parallel: bool,
    },
    /// Print the built-in coefficient table as TOML
    Defaults,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut log_config = LoggingConfig::new(parse_log_level(&cli.log_level)?);
    if cli.json_logs {
        log_config = log_config.with_json();
    }
    if cli.log_location {
        log_config = log_config.with_file_info();
    }
    setup_logging(&log_config)?;

    match cli.command {
        Command::Score {
            input,
            config,
            pretty,
            detailed,
            parallel,
        } => {
            let options = commands::ScoreOptions {
                input,
                config,
                pretty,
                detailed,
                parallel,
            };
            let stdout = std::io::stdout();
            commands::run_score(&options, &mut stdout.lock())
        }
        Command::Defaults => commands::run_defaults(&mut std::io::stdout().lock()),
    }
}
