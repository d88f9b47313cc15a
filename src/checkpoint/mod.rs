//! Durable workflow state machine records and the checkpoint store seam.
//!
//! The suspend/resume mechanism is plain data: a [`Checkpoint`] holds the
//! workflow state tag, the conversation map, and the pending interrupt (if
//! any), and is written atomically to the store at each suspension boundary.
//! The store itself is an external collaborator behind [`CheckpointStore`].

pub mod file_store;
pub mod memory_store;

pub use file_store::FileCheckpointStore;
pub use memory_store::MemoryCheckpointStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SwitchboardError};
use crate::state::ConversationState;

/// Current checkpoint record format version.
pub const CHECKPOINT_FORMAT: u32 = 1;

/// Workflow state tag persisted in each checkpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    AwaitingInput,
    Terminated,
}

/// Interrupt actions the conversation loop can suspend on.
///
/// Stored as a plain tag so the driver can detect (and refuse) tags written
/// by a newer or foreign workflow instead of guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptAction {
    GetUserMessage,
}

impl InterruptAction {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::GetUserMessage => "get_user_message",
        }
    }

    /// Parse a stored action tag. An unrecognized tag is a fatal,
    /// unrecoverable condition.
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            "get_user_message" => Ok(Self::GetUserMessage),
            other => Err(SwitchboardError::UnknownInterrupt {
                action: other.to_string(),
            }),
        }
    }
}

/// A suspension point declared by the conversation loop.
///
/// Consumed exactly once by the driver, which must supply a matching
/// [`ResumeValue`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingInterrupt {
    pub action: String,
    pub resumable: bool,
}

impl PendingInterrupt {
    /// The interrupt requesting the next inbound message.
    pub fn get_user_message() -> Self {
        Self {
            action: InterruptAction::GetUserMessage.tag().to_string(),
            resumable: true,
        }
    }
}

/// Externally supplied data satisfying a pending interrupt.
///
/// Blank or missing console input is translated to `End` by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeValue {
    Message { from: String, message: String },
    End,
}

/// Durable snapshot of one conversation thread.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Checkpoint {
    pub format: u32,
    pub thread_id: String,
    pub state: WorkflowState,
    pub conversations: ConversationState,
    pub pending_interrupt: Option<PendingInterrupt>,
    pub updated_at: DateTime<Utc>,
}

impl Checkpoint {
    /// Initial record for a fresh thread: awaiting input, empty transcripts.
    pub fn new(thread_id: impl Into<String>) -> Self {
        Self {
            format: CHECKPOINT_FORMAT,
            thread_id: thread_id.into(),
            state: WorkflowState::AwaitingInput,
            conversations: ConversationState::new(),
            pending_interrupt: Some(PendingInterrupt::get_user_message()),
            updated_at: Utc::now(),
        }
    }

    /// Re-suspend: back to awaiting input with a fresh pending interrupt.
    pub fn suspend(&mut self) {
        self.state = WorkflowState::AwaitingInput;
        self.pending_interrupt = Some(PendingInterrupt::get_user_message());
        self.updated_at = Utc::now();
    }

    /// Graceful termination: no further interrupts will be raised.
    pub fn terminate(&mut self) {
        self.state = WorkflowState::Terminated;
        self.pending_interrupt = None;
        self.updated_at = Utc::now();
    }

    pub fn is_terminated(&self) -> bool {
        self.state == WorkflowState::Terminated
    }
}

/// Durable store mapping a thread id to its latest checkpoint.
///
/// Only one driver is expected to resume a given thread at a time;
/// concurrent resumes of the same thread are out of scope.
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    /// Idempotently initialize the store (schema, directories).
    async fn setup(&self) -> Result<()>;

    /// Fetch the latest persisted checkpoint for a thread, if any.
    async fn load(&self, thread_id: &str) -> Result<Option<Checkpoint>>;

    /// Persist a new latest checkpoint for the record's thread.
    async fn save(&self, checkpoint: &Checkpoint) -> Result<()>;
}
