//! Runner module - the oracle tool-use loop.
//!
//! This module provides:
//! - SolveRunner for driving one puzzle run
//! - Conversation, the append-only message history of a run
//! - RunReport for what a run produced

mod conversation;
mod loop_runner;

pub use conversation::Conversation;
pub use loop_runner::{
    CONVERSATION_FILE, DEFAULT_MAX_ITERATIONS, DispatchMode, NOT_EXECUTED, RunReport, RunnerConfig, SolveRunner,
};
