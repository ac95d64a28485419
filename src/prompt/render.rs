//! Prompt Renderer - Render templates with context variables using Handlebars

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::{Result, SolvrError};

/// Renders prompt templates using Handlebars templating
pub struct PromptRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for PromptRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptRenderer {
    /// Create a new PromptRenderer with default settings
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        // Source code and puzzle input must come through untouched
        handlebars.register_escape_fn(handlebars::no_escape);
        Self { handlebars }
    }

    /// Render a template string with any serializable context
    pub fn render<T: Serialize>(&self, template: &str, context: &T) -> Result<String> {
        self.handlebars
            .render_template(template, context)
            .map_err(|e| SolvrError::Template(format!("Failed to render template: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_simple() {
        let renderer = PromptRenderer::new();
        let result = renderer
            .render("Day {{day}} part {{part}}", &json!({"day": 7, "part": 2}))
            .unwrap();
        assert_eq!(result, "Day 7 part 2");
    }

    #[test]
    fn test_render_missing_variable_is_empty() {
        let renderer = PromptRenderer::new();
        let result = renderer.render("Input: [{{input_excerpt}}]", &json!({})).unwrap();
        assert_eq!(result, "Input: []");
    }

    #[test]
    fn test_render_does_not_escape() {
        let renderer = PromptRenderer::new();
        let result = renderer
            .render("{{code}}", &json!({"code": "if (a < b && c > d) { return \"x\"; }"}))
            .unwrap();
        assert_eq!(result, "if (a < b && c > d) { return \"x\"; }");
    }

    #[test]
    fn test_render_invalid_template() {
        let renderer = PromptRenderer::new();
        let err = renderer.render("{{#if}}", &json!({})).unwrap_err();
        assert!(matches!(err, SolvrError::Template(_)));
    }
}
