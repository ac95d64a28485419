//! Prompt Loader - the instruction template and the values it is rendered with

use std::path::Path;

use serde::Serialize;

use crate::artifact::ArtifactSlot;
use crate::error::{Result, SolvrError};
use crate::tools::ToolContext;

/// Instruction template compiled into the binary
pub const DEFAULT_TEMPLATE: &str = include_str!("../../prompts/solve.md");

/// Default number of raw input characters shown to the oracle
pub const DEFAULT_INPUT_EXCERPT_CHARS: usize = 200;

/// Load the instruction template, from `path` when given
pub fn load_template(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            SolvrError::Template(format!("Failed to load template from {}: {}", path.display(), e))
        }),
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

/// Values available to the instruction template
#[derive(Debug, Clone, Serialize)]
pub struct SolvePrompt {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub extension: String,
    pub dir: String,
    pub input_path: String,
    pub output_path: String,
    pub input_excerpt: String,
}

impl SolvePrompt {
    pub fn new(ctx: &ToolContext, raw_input: &str, excerpt_chars: usize) -> Self {
        Self {
            year: ctx.coordinate.year(),
            day: ctx.coordinate.day(),
            part: ctx.coordinate.part(),
            extension: ctx.store.extension().to_string(),
            dir: ctx.dir().display().to_string(),
            input_path: ctx.slot_path(ArtifactSlot::RawInput).display().to_string(),
            output_path: ctx.slot_path(ArtifactSlot::Output).display().to_string(),
            input_excerpt: excerpt(raw_input, excerpt_chars),
        }
    }
}

/// First `chars` characters of `text`
pub fn excerpt(text: &str, chars: usize) -> String {
    text.chars().take(chars).collect()
}
