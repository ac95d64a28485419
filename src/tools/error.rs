//! Tool-level failures
//!
//! These never abort a run. The registry turns them into error tool results
//! that go back to the oracle.

use thiserror::Error;

/// Failure of a single tool invocation
#[derive(Debug, Error)]
pub enum ToolError {
    /// Required string payload absent, null or empty
    #[error("{tool}: missing required field `{field}`; nothing was written")]
    MissingPayload { tool: &'static str, field: &'static str },

    /// Arguments do not match the declared schema
    #[error("{tool}: invalid arguments: {reason}")]
    InvalidArguments { tool: &'static str, reason: String },

    /// Test command exited non-zero
    #[error("tests failed ({}):\n{}", describe_exit(.exit_code), join_streams(.stdout, .stderr))]
    VerificationFailed {
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// Solve command exited non-zero
    #[error("solve run failed ({}):\n{}", describe_exit(.exit_code), join_streams(.stdout, .stderr))]
    ProductionRunFailed {
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// Filesystem failure while handling the tool
    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: crate::error::SolvrError,
    },
}

fn describe_exit(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code".to_string(),
    }
}

fn join_streams(stdout: &str, stderr: &str) -> String {
    match (stdout.is_empty(), stderr.is_empty()) {
        (true, true) => "(no output)".to_string(),
        (false, true) => stdout.to_string(),
        (true, false) => stderr.to_string(),
        (false, false) => format!("{}\n--- stderr ---\n{}", stdout, stderr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_payload_message() {
        let err = ToolError::MissingPayload {
            tool: "create_test",
            field: "test_source",
        };
        assert_eq!(
            err.to_string(),
            "create_test: missing required field `test_source`; nothing was written"
        );
    }

    #[test]
    fn test_verification_failed_carries_output() {
        let err = ToolError::VerificationFailed {
            exit_code: Some(1),
            stdout: "FAIL test.js".to_string(),
            stderr: "assertion failed".to_string(),
        };
        let message = err.to_string();
        assert!(message.starts_with("tests failed (exit code 1)"));
        assert!(message.contains("FAIL test.js"));
        assert!(message.contains("assertion failed"));
    }

    #[test]
    fn test_production_run_failed_without_exit_code() {
        let err = ToolError::ProductionRunFailed {
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "solve run failed (no exit code):\n(no output)");
    }
}
