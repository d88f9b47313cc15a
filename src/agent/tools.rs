//! The send-message tool: schema, dispatch, and execution.
//!
//! Dispatch is a closed enum over known tool kinds. A tool invocation does
//! not touch conversation state itself; it returns the transcript append to
//! apply plus the acknowledgment text fed back to the model.

use crate::error::{Result, SwitchboardError};
use crate::provider::ToolDefinition;
use crate::state::TranscriptAppend;
use crate::types::ToolCall;

pub const SEND_MESSAGE: &str = "send_message";

/// Schema for `send_message(recipient, message)` as declared to the API.
pub fn send_message_definition() -> ToolDefinition {
    ToolDefinition {
        name: SEND_MESSAGE.to_string(),
        description: "Send a message to a person.".to_string(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "recipient": {
                    "type": "string",
                    "description": "User id of the person to message",
                },
                "message": {
                    "type": "string",
                    "description": "The message text to send",
                },
            },
            "required": ["recipient", "message"],
        }),
    }
}

/// A parsed, known tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolInvocation {
    SendMessage { recipient: String, message: String },
}

/// Result of executing a tool: the state mutation to apply and the textual
/// acknowledgment returned to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    pub effect: TranscriptAppend,
    pub ack: String,
}

impl ToolInvocation {
    /// Resolve a model-issued tool call against the known tool kinds.
    pub fn parse(call: &ToolCall) -> Result<Self> {
        match call.name.as_str() {
            SEND_MESSAGE => {
                let recipient = required_str(&call.arguments, "recipient")?;
                let message = required_str(&call.arguments, "message")?;
                Ok(Self::SendMessage { recipient, message })
            }
            other => Err(SwitchboardError::UnknownTool {
                name: other.to_string(),
            }),
        }
    }

    /// Execute against (a snapshot of) conversation state.
    ///
    /// `send_message` needs no prior state: its effect is a single append.
    pub fn execute(&self) -> ToolOutcome {
        match self {
            Self::SendMessage { recipient, message } => ToolOutcome {
                effect: TranscriptAppend {
                    recipient: recipient.clone(),
                    line: format!("you->{recipient}: {message}"),
                },
                ack: format!("Message sent to {recipient}"),
            },
        }
    }
}

fn required_str(arguments: &serde_json::Value, key: &str) -> Result<String> {
    arguments
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            SwitchboardError::InvalidArgument(format!(
                "{SEND_MESSAGE}: missing or non-string '{key}' in {arguments}"
            ))
        })
}
