//! Best-effort diagnostic dumps.
//!
//! On each turn the rendered message list and the full conversation tree are
//! overwritten to fixed paths under the dump directory. These are
//! observability aids, not part of the contract: a failed write logs a
//! warning and never aborts the turn.

use std::path::PathBuf;

use tracing::warn;

use crate::state::ConversationState;
use crate::types::{ContentPart, ModelMessage, Role};

const MESSAGES_DUMP: &str = "messages.dump.txt";
const CONVERSATIONS_DUMP: &str = "conversations.dump.txt";

pub struct Diag {
    dir: PathBuf,
}

impl Diag {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Overwrite the rendered message list dump.
    pub fn dump_messages(&self, messages: &[ModelMessage]) {
        let rendered = messages.iter().map(render_message).collect::<Vec<_>>();
        self.write(MESSAGES_DUMP, &rendered.join("\n"));
    }

    /// Overwrite the conversation history dump.
    pub fn dump_conversations(&self, state: &ConversationState) {
        let mut out = String::new();
        for user in state.users() {
            out.push_str(&format!("<{user}>\n"));
            if let Some(lines) = state.transcript(user) {
                for line in lines {
                    out.push_str(line);
                    out.push('\n');
                }
            }
            out.push_str(&format!("</{user}>\n"));
        }
        self.write(CONVERSATIONS_DUMP, &out);
    }

    fn write(&self, filename: &str, content: &str) {
        let result = std::fs::create_dir_all(&self.dir)
            .and_then(|()| std::fs::write(self.dir.join(filename), content));
        if let Err(e) = result {
            warn!(file = filename, error = %e, "diagnostic dump failed");
        }
    }
}

fn render_message(msg: &ModelMessage) -> String {
    let role = match msg.role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::Tool => "tool",
    };
    let mut out = format!("=== {role} ===\n");
    for part in &msg.content {
        match part {
            ContentPart::Text { text } => {
                out.push_str(text);
                out.push('\n');
            }
            ContentPart::ToolCall(tc) => {
                out.push_str(&format!("[tool call {} {}: {}]\n", tc.id, tc.name, tc.arguments));
            }
            ContentPart::ToolResult(tr) => {
                out.push_str(&format!("[tool result {}: {}]\n", tr.tool_call_id, tr.result));
            }
        }
    }
    out
}
