//! Prompt System - Template loading and rendering
//!
//! The instruction template is rendered once per run with Handlebars and
//! becomes the oracle's system prompt.

mod loader;
mod render;

pub use loader::{DEFAULT_INPUT_EXCERPT_CHARS, DEFAULT_TEMPLATE, SolvePrompt, excerpt, load_template};
pub use render::PromptRenderer;
