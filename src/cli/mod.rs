use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod check_config;
mod demo;

/// mzfeature - LC-MS feature detection, alignment and gap filling
#[derive(Parser)]
#[command(name = "mzfeature")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline on synthetic LC-MS samples
    Demo {
        /// Number of samples to simulate
        #[arg(short = 'n', long, default_value = "3")]
        samples: usize,

        /// TOML configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print the aligned feature table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a TOML configuration file and print the effective settings
    CheckConfig {
        /// Configuration file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Demo {
            samples,
            config,
            json,
        } => demo::run(samples, config, json),
        Commands::CheckConfig { file } => check_config::run(file),
    }
}
