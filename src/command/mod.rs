//! Command execution - runs verification and production commands.
//!
//! The executor never fails past its boundary: spawn errors, non-zero exits
//! and timeouts all come back as a `CommandOutput` value.

mod executor;
mod template;

pub use executor::{CommandExecutor, CommandOutput, DEFAULT_MAX_OUTPUT_BYTES, DEFAULT_TIMEOUT_MS, ShellExecutor};
pub use template::{CommandTemplates, DEFAULT_SOLVE_COMMAND, DEFAULT_TEST_COMMAND, shell_quote};
