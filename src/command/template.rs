//! Command line templates for the verification and production runs

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default verification command (jest with ESM support)
pub const DEFAULT_TEST_COMMAND: &str = "node --experimental-vm-modules node_modules/jest/bin/jest.js {path}";

/// Default production command
pub const DEFAULT_SOLVE_COMMAND: &str = "node {path}";

/// Command line templates.
///
/// Placeholders: `{path}` slot file, `{dir}` coordinate directory,
/// `{input}` raw input file, `{output}` output file. Substituted paths are
/// shell-quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandTemplates {
    pub test: String,
    pub solve: String,
}

impl Default for CommandTemplates {
    fn default() -> Self {
        Self {
            test: DEFAULT_TEST_COMMAND.to_string(),
            solve: DEFAULT_SOLVE_COMMAND.to_string(),
        }
    }
}

impl CommandTemplates {
    /// Fill a template with the paths of one coordinate
    pub fn render(template: &str, path: &Path, dir: &Path, input: &Path, output: &Path) -> String {
        template
            .replace("{path}", &shell_quote(&path.to_string_lossy()))
            .replace("{dir}", &shell_quote(&dir.to_string_lossy()))
            .replace("{input}", &shell_quote(&input.to_string_lossy()))
            .replace("{output}", &shell_quote(&output.to_string_lossy()))
    }
}

/// Single-quote a value for `sh -c`
pub fn shell_quote(value: &str) -> String {
    if !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '_' | '-'))
    {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', r"'\''"))
}
