//! Command-line interface for compare-stats.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "compare")]
#[command(about = "Prints statistical comparison of two or more benchmark results")]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Print the version string to stderr and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Recurse into sub-benchmark result directories
    #[arg(short = 'r', long = "recursive")]
    pub recursive: bool,

    /// Run directories to compare; the first is the baseline
    #[arg(value_name = "DIR")]
    pub dirs: Vec<PathBuf>,
}
