//! LLM Client Layer - Anthropic API integration and tool-use parsing
//!
//! This module provides:
//! - Conversation and request/response types
//! - LlmClient trait for API abstraction
//! - AnthropicClient implementation
//! - Tool call parsing

pub mod anthropic;
pub mod client;
pub mod tool_parser;
pub mod types;

pub use anthropic::{AnthropicClient, AnthropicConfig};
pub use client::{LlmClient, MockLlmClient};
pub use tool_parser::parse_response;
pub use types::{
    CompletionRequest, CompletionResponse, ContentBlock, Message, MessageContent, Role, StopReason, ToolCall,
    ToolDefinition, ToolResult, Usage,
};
