//! Tool parser for extracting tool calls from Anthropic API responses
//!
//! Parses raw `/v1/messages` bodies into `CompletionResponse` values.

use serde_json::Value;

use crate::error::{Result, SolvrError};
use crate::llm::types::{CompletionResponse, StopReason, ToolCall, Usage};

/// Parse a raw Anthropic API response into a CompletionResponse
///
/// Handles both text and tool_use content blocks from the response.
pub fn parse_response(response: &Value) -> Result<CompletionResponse> {
    if response.get("type").and_then(|t| t.as_str()) == Some("error") {
        let message = response
            .pointer("/error/message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown error");
        return Err(SolvrError::Llm(format!("API returned error: {}", message)));
    }

    let content_blocks = response
        .get("content")
        .and_then(|c| c.as_array())
        .ok_or_else(|| SolvrError::Llm("Response has no content array".to_string()))?;

    let mut content = String::new();
    let mut tool_calls = Vec::new();

    for block in content_blocks {
        match block.get("type").and_then(|t| t.as_str()) {
            Some("text") => {
                if let Some(text) = block.get("text").and_then(|t| t.as_str()) {
                    if !content.is_empty() {
                        content.push('\n');
                    }
                    content.push_str(text);
                }
            }
            Some("tool_use") => {
                if let Some(call) = parse_tool_use_block(block) {
                    tool_calls.push(call);
                }
            }
            _ => {}
        }
    }

    let stop_reason = response
        .get("stop_reason")
        .and_then(|s| s.as_str())
        .map(parse_stop_reason)
        .unwrap_or(StopReason::EndTurn);

    let usage = response.get("usage").map(parse_usage).unwrap_or_default();

    Ok(CompletionResponse {
        content,
        tool_calls,
        stop_reason,
        usage,
    })
}

/// Parse a single tool_use content block into a ToolCall
fn parse_tool_use_block(block: &Value) -> Option<ToolCall> {
    let id = block.get("id").and_then(|v| v.as_str())?.to_string();
    let name = block.get("name").and_then(|v| v.as_str())?.to_string();
    let input = block.get("input").cloned().unwrap_or(Value::Object(Default::default()));

    Some(ToolCall { id, name, input })
}

fn parse_stop_reason(reason: &str) -> StopReason {
    match reason {
        "end_turn" => StopReason::EndTurn,
        "tool_use" => StopReason::ToolUse,
        "max_tokens" => StopReason::MaxTokens,
        "stop_sequence" => StopReason::StopSequence,
        _ => StopReason::Other,
    }
}

fn parse_usage(usage: &Value) -> Usage {
    Usage {
        input_tokens: usage.get("input_tokens").and_then(|v| v.as_u64()).unwrap_or(0),
        output_tokens: usage.get("output_tokens").and_then(|v| v.as_u64()).unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_response_text_only() {
        let response = json!({
            "content": [
                {"type": "text", "text": "The answer is 42"}
            ],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 10, "output_tokens": 5}
        });

        let parsed = parse_response(&response).unwrap();
        assert_eq!(parsed.content, "The answer is 42");
        assert!(parsed.tool_calls.is_empty());
        assert_eq!(parsed.stop_reason, StopReason::EndTurn);
        assert_eq!(parsed.usage.input_tokens, 10);
    }

    #[test]
    fn test_parse_response_with_tool_use() {
        let response = json!({
            "content": [
                {"type": "text", "text": "Let me write the test"},
                {
                    "type": "tool_use",
                    "id": "toolu_123",
                    "name": "create_test",
                    "input": {"test_source": "test('a', () => {})"}
                }
            ],
            "stop_reason": "tool_use"
        });

        let parsed = parse_response(&response).unwrap();
        assert_eq!(parsed.content, "Let me write the test");
        assert_eq!(parsed.tool_calls.len(), 1);
        assert_eq!(parsed.tool_calls[0].id, "toolu_123");
        assert_eq!(parsed.tool_calls[0].name, "create_test");
        assert_eq!(parsed.stop_reason, StopReason::ToolUse);
        assert_eq!(parsed.usage.total(), 0);
    }

    #[test]
    fn test_parse_response_multiple_tool_calls_keep_order() {
        let response = json!({
            "content": [
                {"type": "tool_use", "id": "toolu_1", "name": "create_test", "input": {}},
                {"type": "tool_use", "id": "toolu_2", "name": "run_test", "input": {}}
            ],
            "stop_reason": "tool_use"
        });

        let parsed = parse_response(&response).unwrap();
        assert_eq!(parsed.tool_calls[0].id, "toolu_1");
        assert_eq!(parsed.tool_calls[1].id, "toolu_2");
    }

    #[test]
    fn test_parse_tool_use_without_input_defaults_to_object() {
        let response = json!({
            "content": [{"type": "tool_use", "id": "toolu_1", "name": "run_solve"}],
            "stop_reason": "tool_use"
        });

        let parsed = parse_response(&response).unwrap();
        assert!(parsed.tool_calls[0].input.is_object());
    }

    #[test]
    fn test_parse_stop_reasons() {
        for (raw, expected) in [
            ("end_turn", StopReason::EndTurn),
            ("tool_use", StopReason::ToolUse),
            ("max_tokens", StopReason::MaxTokens),
            ("stop_sequence", StopReason::StopSequence),
            ("refusal", StopReason::Other),
            ("pause_turn", StopReason::Other),
        ] {
            let parsed = parse_response(&json!({"content": [], "stop_reason": raw})).unwrap();
            assert_eq!(parsed.stop_reason, expected);
        }
    }

    #[test]
    fn test_parse_error_body() {
        let response = json!({
            "type": "error",
            "error": {"type": "overloaded_error", "message": "Overloaded"}
        });
        let err = parse_response(&response).unwrap_err();
        assert!(err.to_string().contains("Overloaded"));
    }

    #[test]
    fn test_parse_missing_content() {
        assert!(parse_response(&json!({"stop_reason": "end_turn"})).is_err());
    }
}
