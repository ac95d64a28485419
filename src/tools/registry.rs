//! Tool registry: schema check, then the handler for each tool kind

use std::sync::Arc;

use log::{debug, info};
use serde_json::Value;

use super::context::ToolContext;
use super::definition::ToolKind;
use super::error::ToolError;
use crate::artifact::ArtifactSlot;
use crate::command::{CommandExecutor, CommandOutput, CommandTemplates};
use crate::llm::{ToolCall, ToolDefinition, ToolResult};

/// Result of dispatching one tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub result: ToolResult,
    /// Slot written by the call, if any
    pub written: Option<ArtifactSlot>,
}

/// Successful handler output
struct Handled {
    message: String,
    written: Option<ArtifactSlot>,
}

impl Handled {
    fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            written: None,
        }
    }
}

/// Executes the closed tool set against the artifact store and the command executor
pub struct ToolRegistry {
    executor: Arc<dyn CommandExecutor>,
    templates: CommandTemplates,
}

impl ToolRegistry {
    pub fn new(executor: Arc<dyn CommandExecutor>, templates: CommandTemplates) -> Self {
        Self { executor, templates }
    }

    /// Definitions advertised to the oracle, in a fixed order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        ToolKind::ALL.iter().map(|kind| kind.definition()).collect()
    }

    pub fn resolve(&self, name: &str) -> Option<ToolKind> {
        ToolKind::from_name(name)
    }

    /// Run one call. Tool failures become error results; nothing here aborts a run.
    pub async fn dispatch(&self, kind: ToolKind, call: &ToolCall, ctx: &ToolContext) -> Dispatched {
        info!("Dispatching {} ({}) for {}", kind, call.id, ctx.coordinate);

        match self.handle(kind, &call.input, ctx).await {
            Ok(handled) => Dispatched {
                result: ToolResult::success(&call.id, handled.message),
                written: handled.written,
            },
            Err(e) => {
                info!("{} failed: {}", kind, first_line(&e.to_string()));
                Dispatched {
                    result: ToolResult::error(&call.id, e.to_string()),
                    written: None,
                }
            }
        }
    }

    async fn handle(&self, kind: ToolKind, input: &Value, ctx: &ToolContext) -> Result<Handled, ToolError> {
        kind.validate(input)?;

        match kind {
            ToolKind::CreateTest | ToolKind::CreateSolution | ToolKind::CreateSolve => {
                self.create(kind, input, ctx).await
            }
            ToolKind::RunTest => self.run_test(input, ctx).await,
            ToolKind::RunSolve => self.run_solve(input, ctx).await,
        }
    }

    async fn create(&self, kind: ToolKind, input: &Value, ctx: &ToolContext) -> Result<Handled, ToolError> {
        let field = kind.payload_field().ok_or_else(|| ToolError::InvalidArguments {
            tool: kind.name(),
            reason: "tool takes no source payload".to_string(),
        })?;
        let source = input
            .get(field)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .ok_or(ToolError::MissingPayload {
                tool: kind.name(),
                field,
            })?;

        let slot = kind.slot();
        let path = ctx
            .store
            .write_slot(&ctx.coordinate, slot, source)
            .await
            .map_err(|e| ToolError::Io {
                operation: format!("write {}", slot.file_name(ctx.store.extension())),
                source: e,
            })?;
        debug!("{} wrote {} bytes", kind, source.len());

        Ok(Handled {
            message: format!("Wrote {} bytes to {}", source.len(), path.display()),
            written: Some(slot),
        })
    }

    async fn run_test(&self, input: &Value, ctx: &ToolContext) -> Result<Handled, ToolError> {
        if skip_requested(input) {
            return Ok(Handled::message("Test run skipped"));
        }

        let output = self.run(&self.templates.test, ArtifactSlot::Test, ctx).await;
        if !output.is_success() {
            let (exit_code, stdout, stderr) = failure_streams(output);
            return Err(ToolError::VerificationFailed {
                exit_code,
                stdout,
                stderr,
            });
        }

        Ok(Handled::message(format!("All tests passed.\n{}", output.combined())))
    }

    async fn run_solve(&self, input: &Value, ctx: &ToolContext) -> Result<Handled, ToolError> {
        if skip_requested(input) {
            return Ok(Handled::message("Solve run skipped"));
        }

        let output = self.run(&self.templates.solve, ArtifactSlot::Runner, ctx).await;
        if !output.is_success() {
            let (exit_code, stdout, stderr) = failure_streams(output);
            return Err(ToolError::ProductionRunFailed {
                exit_code,
                stdout,
                stderr,
            });
        }

        let mut message = format!("Solve run succeeded.\n{}", output.combined());
        let output_path = ctx.slot_path(ArtifactSlot::Output);
        if ctx.store.exists(&output_path) {
            let answer = ctx.store.read(&output_path).await.map_err(|e| ToolError::Io {
                operation: "read the solve output".to_string(),
                source: e,
            })?;
            message.push_str(&format!("\nOutput: {}", answer.trim()));
        }

        Ok(Handled::message(message))
    }

    async fn run(&self, template: &str, slot: ArtifactSlot, ctx: &ToolContext) -> CommandOutput {
        let command_line = CommandTemplates::render(
            template,
            &ctx.slot_path(slot),
            &ctx.dir(),
            &ctx.slot_path(ArtifactSlot::RawInput),
            &ctx.slot_path(ArtifactSlot::Output),
        );
        self.executor.execute(&command_line, ctx.workdir()).await
    }
}

fn skip_requested(input: &Value) -> bool {
    input.get("skip").and_then(|v| v.as_bool()).unwrap_or(false)
}

fn failure_streams(output: CommandOutput) -> (Option<i32>, String, String) {
    let mut stderr = output.stderr;
    if output.timed_out {
        if !stderr.is_empty() {
            stderr.push('\n');
        }
        stderr.push_str("[command timed out]");
    }
    (output.exit_code, output.stdout, stderr)
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}
