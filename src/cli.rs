//! Command-line interface implementation for vhostgen.
//! Provides argument parsing using clap.

use crate::constants::{DEFAULT_APACHECTL, DEFAULT_CONFIG_FILE, DEFAULT_OUTPUT_DIR};
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for vhostgen.
#[derive(Parser, Debug)]
#[command(author, version, about = "vhostgen: reverse-proxy virtual hosts for Apache", long_about = None)]
pub struct Args {
    /// Settings file; created with defaults when missing
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory receiving one <site>.conf per site
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Program asked for the list of enabled Apache modules
    #[arg(long, value_name = "CMD", default_value = DEFAULT_APACHECTL)]
    pub apachectl: String,

    /// Do not check for required Apache modules
    #[arg(long)]
    pub skip_preflight: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling on invalid arguments
pub fn get_args() -> Args {
    Args::parse()
}
