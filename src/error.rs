//! Error types for Solvr
//!
//! Centralized error handling using thiserror. Tool-level failures live in
//! `tools::ToolError`; they are reported back to the oracle instead of
//! propagating through here.

use thiserror::Error;

/// All error types that can occur in Solvr
#[derive(Debug, Error)]
pub enum SolvrError {
    /// Year/day/part outside the accepted range
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Artifact missing or unreadable
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// LLM API error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Prompt template error
    #[error("Template error: {0}")]
    Template(String),

    /// Puzzle fetch or answer submission error
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Solvr operations
pub type Result<T> = std::result::Result<T, SolvrError>;
