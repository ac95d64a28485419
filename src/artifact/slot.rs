//! Artifact slots

use serde::{Deserialize, Serialize};

/// A named role within a coordinate's artifact namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactSlot {
    /// Puzzle statement
    Description,
    /// Personal puzzle input
    RawInput,
    /// Generated test module
    Test,
    /// Generated solution module
    Solution,
    /// Generated solve runner
    Runner,
    /// Answer written by the solve runner
    Output,
    /// Page capture kept alongside the description
    Evidence,
}

impl ArtifactSlot {
    pub const ALL: [ArtifactSlot; 7] = [
        ArtifactSlot::Description,
        ArtifactSlot::RawInput,
        ArtifactSlot::Test,
        ArtifactSlot::Solution,
        ArtifactSlot::Runner,
        ArtifactSlot::Output,
        ArtifactSlot::Evidence,
    ];

    /// File name of this slot; source slots take the configured extension
    pub fn file_name(&self, extension: &str) -> String {
        match self {
            ArtifactSlot::Description => "description.md".to_string(),
            ArtifactSlot::RawInput => "input.txt".to_string(),
            ArtifactSlot::Evidence => "screenshot.png".to_string(),
            ArtifactSlot::Output => "output.txt".to_string(),
            ArtifactSlot::Test => format!("test.{}", extension),
            ArtifactSlot::Solution => format!("solution.{}", extension),
            ArtifactSlot::Runner => format!("solve.{}", extension),
        }
    }
}
