use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use solvr::collab::AOC_BASE_URL;
use solvr::command::{
    CommandTemplates, DEFAULT_MAX_OUTPUT_BYTES, DEFAULT_SOLVE_COMMAND, DEFAULT_TEST_COMMAND, DEFAULT_TIMEOUT_MS,
    ShellExecutor,
};
use solvr::llm::AnthropicConfig;
use solvr::llm::anthropic::{ANTHROPIC_API_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use solvr::prompt::DEFAULT_INPUT_EXCERPT_CHARS;
use solvr::runner::{DEFAULT_MAX_ITERATIONS, DispatchMode, RunnerConfig};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub runner: RunnerSection,
    pub artifacts: ArtifactsConfig,
    pub command: CommandConfig,
    pub prompt: PromptConfig,
    pub aoc: AocConfig,
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_ms: u64,
    pub api_url: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: 0.0,
            timeout_ms: 300000,
            api_url: ANTHROPIC_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerSection {
    pub max_iterations: u32,
    pub dispatch: DispatchMode,
    pub input_excerpt_chars: usize,
}

impl Default for RunnerSection {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            dispatch: DispatchMode::First,
            input_excerpt_chars: DEFAULT_INPUT_EXCERPT_CHARS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    pub root: PathBuf,
    pub extension: String,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("solutions"),
            extension: "js".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    pub test: String,
    pub solve: String,
    pub timeout_ms: u64,
    pub max_output_bytes: usize,
    pub workdir: PathBuf,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            test: DEFAULT_TEST_COMMAND.to_string(),
            solve: DEFAULT_SOLVE_COMMAND.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            workdir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub template_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AocConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for AocConfig {
    fn default() -> Self {
        Self {
            base_url: AOC_BASE_URL.to_string(),
            timeout_ms: 30000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub save_conversation: bool,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    pub fn anthropic(&self) -> AnthropicConfig {
        AnthropicConfig {
            model: self.llm.model.clone(),
            max_tokens: self.llm.max_tokens,
            timeout: Duration::from_millis(self.llm.timeout_ms),
            api_url: self.llm.api_url.clone(),
        }
    }

    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            max_iterations: self.runner.max_iterations,
            max_tokens: self.llm.max_tokens,
            temperature: self.llm.temperature,
            model: Some(self.llm.model.clone()),
            dispatch: self.runner.dispatch,
            input_excerpt_chars: self.runner.input_excerpt_chars,
            save_conversation: self.debug.save_conversation,
        }
    }

    pub fn templates(&self) -> CommandTemplates {
        CommandTemplates {
            test: self.command.test.clone(),
            solve: self.command.solve.clone(),
        }
    }

    pub fn executor(&self) -> ShellExecutor {
        ShellExecutor::new(Duration::from_millis(self.command.timeout_ms), self.command.max_output_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.llm.model, DEFAULT_MODEL);
        assert_eq!(config.llm.temperature, 0.0);
        assert_eq!(config.runner.max_iterations, 25);
        assert_eq!(config.runner.dispatch, DispatchMode::First);
        assert_eq!(config.artifacts.root, PathBuf::from("solutions"));
        assert_eq!(config.command.workdir, PathBuf::from("."));
        assert_eq!(config.aoc.base_url, "https://adventofcode.com");
        assert!(config.prompt.template_path.is_none());
        assert!(!config.debug.save_conversation);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
runner:
  dispatch: all
  max_iterations: 10
command:
  solve: "python3 {path}"
artifacts:
  extension: py
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.runner.dispatch, DispatchMode::All);
        assert_eq!(config.runner.max_iterations, 10);
        assert_eq!(config.runner.input_excerpt_chars, 200);
        assert_eq!(config.command.solve, "python3 {path}");
        assert_eq!(config.command.test, DEFAULT_TEST_COMMAND);
        assert_eq!(config.artifacts.extension, "py");
        assert_eq!(config.llm.max_tokens, DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn test_runner_config_merges_sections() {
        let mut config = Config::default();
        config.llm.temperature = 0.5;
        config.debug.save_conversation = true;

        let runner = config.runner_config();
        assert_eq!(runner.temperature, 0.5);
        assert_eq!(runner.model.as_deref(), Some(DEFAULT_MODEL));
        assert!(runner.save_conversation);
        assert_eq!(config.anthropic().timeout, Duration::from_millis(300000));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("solvr.yml");
        fs::write(&path, "llm:\n  model: claude-test\ndebug:\n  save_conversation: true\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.llm.model, "claude-test");
        assert!(config.debug.save_conversation);
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let path = PathBuf::from("/nonexistent/solvr.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_invalid_dispatch_rejected() {
        let result: std::result::Result<Config, _> = serde_yaml::from_str("runner:\n  dispatch: some\n");
        assert!(result.is_err());
    }
}
