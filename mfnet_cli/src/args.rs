use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mfnet_common::interchange::Version;
use mfnet_equiv::CompareConfig;

/// mfnet - microfluidic netlist tooling
#[derive(Parser, Debug)]
#[command(name = "mfnet")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare two netlists for functional equivalence up to renaming
    Compare {
        /// First netlist file
        file_a: PathBuf,
        /// Second netlist file
        file_b: PathBuf,
        /// Reject candidate pairs whose params differ
        #[arg(long, default_value_t = false)]
        compare_params: bool,
        /// Reject candidate pairs whose edge endpoints differ
        #[arg(long, default_value_t = false)]
        check_connection_target: bool,
        /// Bound the search to this many examined candidate pairs
        #[arg(long)]
        max_steps: Option<u64>,
        /// Print the per-category diff report after the verdict
        #[arg(long, default_value_t = false)]
        report: bool,
    },
    /// Validate netlist files (or directories of them)
    Validate {
        /// Files or directories to validate
        paths: Vec<PathBuf>,
        /// Descend into subdirectories
        #[arg(short, long, default_value_t = false)]
        recursive: bool,
    },
    /// Convert a netlist between interchange versions
    Convert {
        /// Input netlist file
        input: PathBuf,
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
        /// Target interchange version
        #[arg(long, value_enum, default_value = "1.2")]
        to: VersionArg,
    },
    /// Characterize netlists, printing or exporting a summary table
    Stats {
        /// Netlist files to characterize
        paths: Vec<PathBuf>,
        /// Write the table as CSV to this file instead of stdout
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

/// Command-line wrapper for the interchange version.
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum VersionArg {
    /// Version 1.0
    #[value(name = "1.0", alias = "1")]
    V1,
    /// Version 1.1
    #[value(name = "1.1")]
    V1_1,
    /// Version 1.2
    #[value(name = "1.2")]
    V1_2,
}

impl From<VersionArg> for Version {
    fn from(arg: VersionArg) -> Self {
        match arg {
            VersionArg::V1 => Version::V1,
            VersionArg::V1_1 => Version::V1_1,
            VersionArg::V1_2 => Version::V1_2,
        }
    }
}

/// Builds the matcher configuration out of the compare flags.
pub fn to_config(
    compare_params: bool,
    check_connection_target: bool,
    max_steps: Option<u64>,
) -> CompareConfig {
    let config = CompareConfig::new(compare_params, check_connection_target);
    match max_steps {
        Some(steps) => config.with_max_steps(steps),
        None => config,
    }
}
