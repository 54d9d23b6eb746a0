// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response types for the Anthropic Messages API.
//!
//! Only the non-streaming text subset is modeled; the pipeline consumes
//! plain text and never requests tool use.

use serde::{Deserialize, Serialize};

/// A request to the Messages API.
#[derive(Debug, Clone, Serialize)]
pub struct MessageRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<ApiMessage>,
    pub max_tokens: u32,
}

/// A single conversation turn.
#[derive(Debug, Clone, Serialize)]
pub struct ApiMessage {
    pub role: String,
    pub content: String,
}

/// A full (non-streaming) response from the Messages API.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub content: Vec<ResponseContentBlock>,
    pub model: String,
    pub stop_reason: Option<String>,
    pub usage: Usage,
}

/// One content block in a response.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseContentBlock {
    Text { text: String },
}

/// Token accounting reported by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Error envelope returned by the API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail within [`ApiErrorResponse`].
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(rename = "type")]
    pub type_: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_absent_system_prompt() {
        let request = MessageRequest {
            model: "claude-sonnet-4-20250514".into(),
            system: None,
            messages: vec![ApiMessage {
                role: "user".into(),
                content: "hello".into(),
            }],
            max_tokens: 1024,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("\"system\""));
    }

    #[test]
    fn response_deserializes_text_blocks() {
        let json = r#"{
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "content": [{"type": "text", "text": "안녕하세요"}],
            "model": "claude-sonnet-4-20250514",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 12, "output_tokens": 4}
        }"#;
        let response: MessageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.content.len(), 1);
        let ResponseContentBlock::Text { text } = &response.content[0];
        assert_eq!(text, "안녕하세요");
    }

    #[test]
    fn error_envelope_deserializes() {
        let json = r#"{"error": {"type": "rate_limit_error", "message": "Rate limited"}}"#;
        let err: ApiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(err.error.type_, "rate_limit_error");
    }
}
