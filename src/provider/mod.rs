//! Model client trait and the OpenRouter implementation.

pub mod http;
pub mod openrouter;

pub use openrouter::OpenRouterProvider;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{FinishReason, ModelMessage, ToolCall, Usage};

/// A request sent to the model client.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ModelMessage>,
    pub tools: Vec<ToolDefinition>,
}

/// Tool schema declared to the provider API.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Response from the model client: a final reply and/or tool-call requests.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub text: String,
    pub tool_calls: Vec<ToolCall>,
    pub finish_reason: Option<FinishReason>,
    pub usage: Usage,
}

/// Model client seam. One awaited call per invocation; no streaming, no
/// cancellation mid-flight.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// The model identifier this client serves.
    fn model_id(&self) -> &str;

    /// Send a message sequence and declared tools, await the full response.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse>;
}
