//! CLI module for solvr - command-line interface and subcommands.

pub mod commands;
pub mod prompt;

pub use commands::Cli;
