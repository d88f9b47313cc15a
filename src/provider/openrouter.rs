//! OpenRouter chat-completions provider (OpenAI wire shape).

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, SwitchboardError};
use crate::models::ModelName;
use crate::types::{ContentPart, FinishReason, ModelMessage, Role, ToolCall, Usage};

use super::http::{bearer_headers, shared_client, status_to_error};
use super::{ChatProvider, ChatRequest, ChatResponse};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

pub struct OpenRouterProvider {
    model: ModelName,
    api_key: String,
    base_url: String,
}

impl OpenRouterProvider {
    pub fn new(model: ModelName, api_key: String, base_url: Option<String>) -> Self {
        Self {
            model,
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    fn build_request_body(&self, request: &ChatRequest) -> serde_json::Value {
        let messages = request
            .messages
            .iter()
            .map(message_to_wire)
            .collect::<Vec<_>>();

        let mut body = serde_json::json!({
            "model": self.model.api_id(),
            "messages": messages,
            // OpenRouter routing hint: only use upstreams that honor the
            // declared tool parameters.
            "provider": { "require_parameters": true },
        });

        if !request.tools.is_empty() {
            let tool_defs: Vec<serde_json::Value> = request
                .tools
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "type": "function",
                        "function": {
                            "name": t.name,
                            "description": t.description,
                            "parameters": t.parameters,
                        }
                    })
                })
                .collect();
            body.as_object_mut()
                .expect("body is an object")
                .insert("tools".into(), tool_defs.into());
        }

        body
    }
}

#[async_trait]
impl ChatProvider for OpenRouterProvider {
    fn model_id(&self) -> &str {
        self.model.api_id()
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let body = self.build_request_body(request);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(
            model = self.model.api_id(),
            messages = request.messages.len(),
            "OpenRouter complete"
        );

        let resp = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: WireChatResponse = resp.json().await?;
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| SwitchboardError::api(200, "No choices in OpenRouter response"))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| ToolCall {
                id: tc.id,
                name: tc.function.name,
                arguments: serde_json::from_str(&tc.function.arguments)
                    .unwrap_or(serde_json::Value::String(tc.function.arguments)),
            })
            .collect();

        let finish_reason = choice.finish_reason.as_deref().and_then(parse_finish_reason);

        Ok(ChatResponse {
            text: choice.message.content.unwrap_or_default(),
            tool_calls,
            finish_reason,
            usage: data
                .usage
                .map(|u| Usage {
                    input_tokens: u.prompt_tokens,
                    output_tokens: u.completion_tokens,
                    total_tokens: u.total_tokens,
                })
                .unwrap_or_default(),
        })
    }
}

fn parse_finish_reason(s: &str) -> Option<FinishReason> {
    match s {
        "stop" => Some(FinishReason::Stop),
        "length" => Some(FinishReason::Length),
        "tool_calls" => Some(FinishReason::ToolCalls),
        "content_filter" => Some(FinishReason::ContentFilter),
        _ => None,
    }
}

fn message_to_wire(msg: &ModelMessage) -> serde_json::Value {
    let role = match msg.role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::Tool => "tool",
    };

    // Tool results go out as dedicated tool-role messages.
    if let Some(ContentPart::ToolResult(tr)) = msg.content.first() {
        let content = match &tr.result {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return serde_json::json!({
            "role": "tool",
            "tool_call_id": tr.tool_call_id,
            "content": content,
        });
    }

    // Assistant messages carrying tool calls.
    let tool_calls = msg.tool_calls();
    if !tool_calls.is_empty() {
        let tc_json: Vec<serde_json::Value> = tool_calls
            .iter()
            .map(|tc| {
                serde_json::json!({
                    "id": tc.id,
                    "type": "function",
                    "function": {
                        "name": tc.name,
                        "arguments": tc.arguments.to_string(),
                    }
                })
            })
            .collect();
        let text = msg.text();
        return serde_json::json!({
            "role": role,
            "content": if text.is_empty() { serde_json::Value::Null } else { serde_json::Value::String(text) },
            "tool_calls": tc_json,
        });
    }

    serde_json::json!({ "role": role, "content": msg.text() })
}

// OpenRouter API response types (internal)

#[derive(Deserialize)]
struct WireChatResponse {
    choices: Vec<WireChoice>,
    usage: Option<WireUsage>,
}

#[derive(Deserialize)]
struct WireChoice {
    message: WireMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct WireMessage {
    content: Option<String>,
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Deserialize)]
struct WireToolCall {
    id: String,
    function: WireFunction,
}

#[derive(Deserialize)]
struct WireFunction {
    name: String,
    arguments: String,
}

#[derive(Deserialize)]
struct WireUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}
