//! Run outcome - the terminal value of one orchestration run.

use std::fmt;

/// Why an orchestration run ended. Created once, at loop exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Oracle gave a final answer
    Completed(String),
    /// Oracle asked for tools but left nothing dispatchable
    ToolExhausted,
    /// Oracle requested a tool outside the registry
    UnknownTool(String),
    /// Transport or protocol failure talking to the oracle
    OracleError(String),
    /// Safety valve for runaway conversations
    IterationLimitExceeded,
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }

    /// Final text when the run completed
    pub fn final_text(&self) -> Option<&str> {
        match self {
            RunOutcome::Completed(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Completed(_) => write!(f, "completed"),
            RunOutcome::ToolExhausted => write!(f, "oracle requested a tool but none could be dispatched"),
            RunOutcome::UnknownTool(name) => write!(f, "oracle requested unknown tool '{}'", name),
            RunOutcome::OracleError(cause) => write!(f, "oracle error: {}", cause),
            RunOutcome::IterationLimitExceeded => write!(f, "iteration limit exceeded"),
        }
    }
}
