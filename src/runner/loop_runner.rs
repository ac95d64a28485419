//! Solve runner - drives the oracle through the tool-use loop.
//!
//! The runner keeps one growing conversation. Each turn it sends the whole
//! conversation to the oracle, dispatches the requested tools one at a time
//! and appends their results, until the oracle gives a final answer or a
//! terminal condition is reached.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::conversation::Conversation;
use crate::artifact::ArtifactSlot;
use crate::domain::RunOutcome;
use crate::error::{Result, SolvrError};
use crate::llm::{CompletionRequest, LlmClient, Message, StopReason, ToolCall, ToolResult, Usage};
use crate::prompt::{DEFAULT_INPUT_EXCERPT_CHARS, DEFAULT_TEMPLATE, PromptRenderer, SolvePrompt};
use crate::tools::{ToolContext, ToolKind, ToolRegistry};

/// Default bound on oracle calls per run
pub const DEFAULT_MAX_ITERATIONS: u32 = 25;

/// File the conversation is saved to, inside the coordinate directory
pub const CONVERSATION_FILE: &str = "conversation.json";

/// Result text for tool requests left unexecuted under `DispatchMode::First`
pub const NOT_EXECUTED: &str = "not executed: one tool per turn";

/// How many tool requests of one oracle turn are executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Only the first request; the rest are answered as not executed
    #[default]
    First,
    /// Every request, in order
    All,
}

/// Configuration for the SolveRunner.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Maximum number of oracle calls
    pub max_iterations: u32,
    /// Maximum tokens for oracle responses
    pub max_tokens: u32,
    pub temperature: f32,
    /// Model override; the client's model when None
    pub model: Option<String>,
    pub dispatch: DispatchMode,
    /// Raw input characters shown in the instructions
    pub input_excerpt_chars: usize,
    /// Write the conversation next to the artifacts when the run ends
    pub save_conversation: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_tokens: 8192,
            temperature: 0.0,
            model: None,
            dispatch: DispatchMode::default(),
            input_excerpt_chars: DEFAULT_INPUT_EXCERPT_CHARS,
            save_conversation: false,
        }
    }
}

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub conversation: Conversation,
    pub oracle_calls: u32,
    /// Slots written during the run, in order of first write
    pub written: Vec<ArtifactSlot>,
    pub usage: Usage,
}

/// Mutable bookkeeping of one run
#[derive(Debug, Default)]
struct RunState {
    oracle_calls: u32,
    written: Vec<ArtifactSlot>,
    usage: Usage,
}

impl RunState {
    fn record_write(&mut self, slot: ArtifactSlot) {
        if !self.written.contains(&slot) {
            self.written.push(slot);
        }
    }
}

/// SolveRunner executes one puzzle run against an oracle.
pub struct SolveRunner<L: LlmClient> {
    llm: Arc<L>,
    registry: Arc<ToolRegistry>,
    renderer: PromptRenderer,
    template: String,
    config: RunnerConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl<L: LlmClient> SolveRunner<L> {
    /// Create a runner with the default instruction template and configuration
    pub fn new(llm: Arc<L>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            llm,
            registry,
            renderer: PromptRenderer::new(),
            template: DEFAULT_TEMPLATE.to_string(),
            config: RunnerConfig::default(),
            cancel: None,
        }
    }

    pub fn with_config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Stop the run at the next oracle call or tool dispatch once `flag` is set
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Run the loop for the coordinate in `ctx`.
    ///
    /// Errors only when the run cannot start (missing puzzle artifacts or a
    /// bad template). Everything else ends in a `RunOutcome`.
    pub async fn run(&self, ctx: &ToolContext) -> Result<RunReport> {
        let description = self.read_required(ctx, ArtifactSlot::Description).await?;
        let raw_input = self.read_required(ctx, ArtifactSlot::RawInput).await?;

        let prompt = SolvePrompt::new(ctx, &raw_input, self.config.input_excerpt_chars);
        let system = self.renderer.render(&self.template, &prompt)?;

        let mut conversation = Conversation::new(system);
        conversation.push(Message::user(description));

        info!(
            "Starting run for {} (max {} oracle calls, dispatch {:?})",
            ctx.coordinate, self.config.max_iterations, self.config.dispatch
        );

        let mut state = RunState::default();
        let outcome = self.drive(ctx, &mut conversation, &mut state).await;

        info!(
            "Run for {} ended after {} oracle calls: {}",
            ctx.coordinate, state.oracle_calls, outcome
        );

        if self.config.save_conversation {
            let path = ctx.store.dir(&ctx.coordinate).join(CONVERSATION_FILE);
            match save_conversation(ctx, &path, &conversation).await {
                Ok(()) => debug!("Saved conversation to {}", path.display()),
                Err(e) => warn!("Failed to save conversation to {}: {}", path.display(), e),
            }
        }

        Ok(RunReport {
            outcome,
            conversation,
            oracle_calls: state.oracle_calls,
            written: state.written,
            usage: state.usage,
        })
    }

    async fn read_required(&self, ctx: &ToolContext, slot: ArtifactSlot) -> Result<String> {
        if !ctx.store.slot_exists(&ctx.coordinate, slot) {
            return Err(SolvrError::Artifact(format!(
                "{} missing for {}; fetch the puzzle first",
                slot.file_name(ctx.store.extension()),
                ctx.coordinate
            )));
        }
        ctx.store.read_slot(&ctx.coordinate, slot).await
    }

    async fn drive(&self, ctx: &ToolContext, conversation: &mut Conversation, state: &mut RunState) -> RunOutcome {
        while state.oracle_calls < self.config.max_iterations {
            if self.is_cancelled() {
                return cancelled();
            }

            state.oracle_calls += 1;
            info!(
                "Oracle call {}/{} ({} messages)",
                state.oracle_calls,
                self.config.max_iterations,
                conversation.len()
            );

            let response = match self.llm.complete(self.build_request(conversation)).await {
                Ok(response) => response,
                Err(e) => {
                    warn!("Oracle call failed: {}", e);
                    return RunOutcome::OracleError(e.to_string());
                }
            };
            state.usage.add(&response.usage);
            conversation.push(Message::from_response(&response));

            match response.stop_reason {
                StopReason::EndTurn | StopReason::StopSequence => {
                    return RunOutcome::Completed(response.content);
                }
                StopReason::MaxTokens => return RunOutcome::ToolExhausted,
                StopReason::ToolUse if response.tool_calls.is_empty() => return RunOutcome::ToolExhausted,
                StopReason::ToolUse => {}
                StopReason::Other => {
                    warn!("Oracle stopped for an unsupported reason");
                    return RunOutcome::OracleError("unsupported stop reason".to_string());
                }
            }

            // Under `first` only the leading request is looked up and run
            let batch = match self.config.dispatch {
                DispatchMode::First => &response.tool_calls[..1],
                DispatchMode::All => &response.tool_calls[..],
            };
            // Names are resolved before any handler so an unknown one stops the run with no side effect
            let kinds = match self.resolve_batch(batch) {
                Ok(kinds) => kinds,
                Err(name) => {
                    warn!("Oracle requested unknown tool `{}`", name);
                    return RunOutcome::UnknownTool(name);
                }
            };

            let mut results = Vec::with_capacity(response.tool_calls.len());
            for (kind, call) in kinds.iter().zip(batch) {
                if self.is_cancelled() {
                    return cancelled();
                }

                let dispatched = self.registry.dispatch(*kind, call, ctx).await;
                if let Some(slot) = dispatched.written {
                    state.record_write(slot);
                }
                debug!(
                    "{} returned {} bytes (error: {})",
                    kind,
                    dispatched.result.content.len(),
                    dispatched.result.is_error
                );
                results.push(dispatched.result);
            }
            for call in &response.tool_calls[batch.len()..] {
                results.push(ToolResult::error(&call.id, NOT_EXECUTED));
            }

            conversation.push(Message::tool_results(&results));
        }

        RunOutcome::IterationLimitExceeded
    }

    fn resolve_batch(&self, calls: &[ToolCall]) -> std::result::Result<Vec<ToolKind>, String> {
        calls
            .iter()
            .map(|call| self.registry.resolve(&call.name).ok_or_else(|| call.name.clone()))
            .collect()
    }

    fn build_request(&self, conversation: &Conversation) -> CompletionRequest {
        let mut request = CompletionRequest::new(conversation.system())
            .with_tools(self.registry.definitions())
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature);
        request.messages = conversation.messages().to_vec();
        request.model = self.config.model.clone();
        request
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}

async fn save_conversation(ctx: &ToolContext, path: &Path, conversation: &Conversation) -> Result<()> {
    let json = serde_json::to_string_pretty(conversation)?;
    ctx.store.write(path, &json).await
}

fn cancelled() -> RunOutcome {
    RunOutcome::OracleError("cancelled".to_string())
}
