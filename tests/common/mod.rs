//! Shared test support: a scripted model client that captures requests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use switchboard::error::Result;
use switchboard::provider::{ChatProvider, ChatRequest, ChatResponse};
use switchboard::types::{FinishReason, ToolCall, Usage};

/// Test provider that captures requests and returns queued responses.
/// An exhausted queue yields a plain text reply with no tool calls.
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<ChatResponse>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_text(&self, text: &str) {
        self.responses.lock().unwrap().push_back(ChatResponse {
            text: text.to_string(),
            tool_calls: Vec::new(),
            finish_reason: Some(FinishReason::Stop),
            usage: Usage::default(),
        });
    }

    pub fn queue_tool_calls(&self, calls: Vec<ToolCall>) {
        self.responses.lock().unwrap().push_back(ChatResponse {
            text: String::new(),
            tool_calls: calls,
            finish_reason: Some(FinishReason::ToolCalls),
            usage: Usage::default(),
        });
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ChatProvider for ScriptedProvider {
    fn model_id(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ChatResponse {
                text: "ok".to_string(),
                tool_calls: Vec::new(),
                finish_reason: Some(FinishReason::Stop),
                usage: Usage::default(),
            }))
    }
}

/// Build a send_message tool call with the given id.
pub fn send_call(id: &str, recipient: &str, message: &str) -> ToolCall {
    ToolCall {
        id: id.to_string(),
        name: "send_message".to_string(),
        arguments: serde_json::json!({ "recipient": recipient, "message": message }),
    }
}
