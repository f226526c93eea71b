//! # mzfeature
//!
//! Command-line driver for the mzfeature pipeline.
//!
//! ## Usage
//!
//! ```bash
//! # Run centroiding, chromatogram building, alignment and gap filling
//! # on three synthetic samples
//! mzfeature -v demo --samples 3
//!
//! # Same with custom parameters, printing the table as JSON
//! mzfeature demo --config mzfeature.toml --json
//!
//! # Validate a configuration file
//! mzfeature check-config mzfeature.toml
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
