//! LLM client trait and a scripted mock

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Result, SolvrError};
use crate::llm::types::{CompletionRequest, CompletionResponse};

/// Client for the reasoning oracle. Each call carries the full conversation.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Single completion request (blocking until complete)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Model used when a request does not name one
    fn model(&self) -> &str;
}

/// Mock client that replays scripted responses in order and records requests
pub struct MockLlmClient {
    responses: Mutex<VecDeque<CompletionResponse>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockLlmClient {
    pub fn new(responses: Vec<CompletionResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.requests
            .lock()
            .map_err(|_| SolvrError::Llm("mock request log poisoned".to_string()))?
            .push(request);

        self.responses
            .lock()
            .map_err(|_| SolvrError::Llm("mock script poisoned".to_string()))?
            .pop_front()
            .ok_or_else(|| SolvrError::Llm("mock script exhausted".to_string()))
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}
