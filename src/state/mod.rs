//! Per-user conversation transcripts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A mutation to apply to conversation state, produced by a tool.
///
/// Tools never mutate state in place; they describe the append and the
/// conversation loop applies it before the tool result is fed back to
/// the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptAppend {
    pub recipient: String,
    pub line: String,
}

/// Ordered transcripts of exchanged lines, keyed by user id.
///
/// Transcripts are created lazily on first contact. Line order per user is
/// insertion order and is never reordered or deduplicated. Keys iterate in
/// sorted order so prompt rendering and dumps are deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ConversationState {
    conversations: BTreeMap<String, Vec<String>>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a transcript exists for `user`, creating an empty one if absent.
    pub fn touch(&mut self, user: &str) {
        self.conversations.entry(user.to_string()).or_default();
    }

    /// Record an inbound line from `from`, creating the transcript if absent.
    pub fn record_inbound(&mut self, from: &str, message: &str) {
        self.conversations
            .entry(from.to_string())
            .or_default()
            .push(format!("{from}->You: {message}"));
    }

    /// Apply an outbound append produced by a tool.
    pub fn apply(&mut self, append: &TranscriptAppend) {
        self.conversations
            .entry(append.recipient.clone())
            .or_default()
            .push(append.line.clone());
    }

    /// All known users, in sorted order.
    pub fn users(&self) -> impl Iterator<Item = &str> {
        self.conversations.keys().map(String::as_str)
    }

    /// The transcript for `user`, if one exists.
    pub fn transcript(&self, user: &str) -> Option<&[String]> {
        self.conversations.get(user).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}
