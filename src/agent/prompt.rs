//! Prompt construction for each turn.
//!
//! Every prompt aggregates ALL known users' transcripts, not just the
//! sender's, so the agent keeps cross-conversation awareness. Prompt size
//! therefore grows without bound; that is an accepted non-goal.

use crate::state::ConversationState;
use crate::types::ModelMessage;

use super::tools::SEND_MESSAGE;

/// System preamble sent on every turn.
pub fn system_message() -> ModelMessage {
    ModelMessage::system(format!(
        "You are speaking to multiple users at the same time.\n\
         You always have all history of conversations so you can reply in continuation to them.\n\
         If you reply to the user - you must use the {SEND_MESSAGE} tool.\n"
    ))
}

/// Render the user-facing turn input: all transcripts as tagged blocks,
/// then the new inbound message framed for reply.
///
/// `state` is the snapshot from before the inbound line is recorded; the
/// new message appears only in the framed section.
pub fn render_turn_input(from: &str, message: &str, state: &ConversationState) -> String {
    let mut blocks = Vec::new();
    for user in state.users() {
        let lines = state.transcript(user).unwrap_or_default().join("\n");
        blocks.push(format!("\n<{user}>\n{lines}\n</{user}>\n"));
    }
    let conversations = blocks.join("\n");
    let conversations = if conversations.is_empty() {
        "No conversations yet.".to_string()
    } else {
        conversations
    };

    format!(
        "Here are all the active conversations:\n\
         {conversations}\n\
         You got a message from {from}:\n\
         ---\n\
         {message}\n\
         ---\n\
         Please reply.\n"
    )
}
