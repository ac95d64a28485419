//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - solve: fetch if needed, then run the oracle loop
//! - fetch: download description and input
//! - submit: send the produced answer

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Solvr - an oracle-driven Advent of Code solver
#[derive(Parser, Debug)]
#[command(name = "solvr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Puzzle year (prompted for when missing)
    #[arg(short, long, global = true)]
    pub year: Option<u16>,

    /// Puzzle day (prompted for when missing)
    #[arg(short, long, global = true)]
    pub day: Option<u8>,

    /// Puzzle part (prompted for when missing)
    #[arg(short, long, global = true)]
    pub part: Option<u8>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Fetch the puzzle if needed, then let the oracle solve it
    Solve {
        /// Fail instead of fetching when the puzzle is not present
        #[arg(long)]
        no_fetch: bool,

        /// Submit the answer when the run completes
        #[arg(long)]
        submit: bool,
    },

    /// Download the puzzle description and input
    Fetch,

    /// Submit the answer from the last solve run
    Submit,
}
