//! Checkpoint/resume driver: bridges console input to the workflow.

use std::io::Write;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::checkpoint::{Checkpoint, CheckpointStore, InterruptAction, PendingInterrupt, ResumeValue};
use crate::diag::Diag;
use crate::error::{Result, SwitchboardError};
use crate::provider::ChatProvider;

use super::turn::{run_turn, TurnOutcome};

/// Source of resume values for pending interrupts. A trait seam so tests
/// can script input instead of reading stdin.
#[async_trait]
pub trait ResumePrompt: Send {
    async fn resume(&mut self, interrupt: &PendingInterrupt) -> Result<ResumeValue>;
}

/// Interactive prompt reading `Who:` / `Msg:` pairs from stdin.
pub struct ConsolePrompt;

#[async_trait]
impl ResumePrompt for ConsolePrompt {
    async fn resume(&mut self, _interrupt: &PendingInterrupt) -> Result<ResumeValue> {
        let who = read_field("Who: ")?;
        let msg = read_field("Msg: ")?;
        Ok(resume_from_fields(&who, &msg))
    }
}

fn read_field(label: &str) -> Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Blank sender or blank message means graceful termination.
pub fn resume_from_fields(who: &str, msg: &str) -> ResumeValue {
    if who.is_empty() || msg.is_empty() {
        ResumeValue::End
    } else {
        ResumeValue::Message {
            from: who.to_string(),
            message: msg.to_string(),
        }
    }
}

/// Resume (or begin) a thread and run it to completion.
///
/// Fresh threads get an initial awaiting-input checkpoint persisted before
/// the first prompt; there is no prior interrupt to satisfy. Each loop
/// iteration fetches the latest checkpoint, validates its pending
/// interrupt, obtains a resume value, runs one turn, and persists the
/// result. Work done since the last persisted checkpoint is replayed if
/// the process dies mid-turn (at-least-once).
pub async fn drive_thread(
    store: &dyn CheckpointStore,
    provider: &dyn ChatProvider,
    diag: &Diag,
    thread_id: &str,
    prompt: &mut dyn ResumePrompt,
) -> Result<()> {
    loop {
        let mut checkpoint = match store.load(thread_id).await? {
            Some(cp) => cp,
            None => {
                info!(thread_id, "starting fresh thread");
                let cp = Checkpoint::new(thread_id);
                store.save(&cp).await?;
                cp
            }
        };

        if checkpoint.is_terminated() {
            info!(thread_id, "thread already terminated");
            return Ok(());
        }

        let interrupt = checkpoint.pending_interrupt.clone().ok_or_else(|| {
            SwitchboardError::Checkpoint(format!(
                "thread {thread_id} is awaiting input but has no pending interrupt"
            ))
        })?;
        // Abort rather than guess at interrupts this driver does not know.
        InterruptAction::from_tag(&interrupt.action)?;

        let resume = prompt.resume(&interrupt).await?;
        debug!(thread_id, ?resume, "resuming workflow");

        let outcome = run_turn(&mut checkpoint, resume, provider, diag).await?;
        store.save(&checkpoint).await?;
        diag.dump_conversations(&checkpoint.conversations);

        if outcome == TurnOutcome::Completed {
            info!(thread_id, "thread completed");
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_sender_terminates() {
        assert_eq!(resume_from_fields("", "hello"), ResumeValue::End);
    }

    #[test]
    fn blank_message_terminates() {
        assert_eq!(resume_from_fields("alice", ""), ResumeValue::End);
    }

    #[test]
    fn both_fields_present_resumes_with_message() {
        assert_eq!(
            resume_from_fields("alice", "hi"),
            ResumeValue::Message {
                from: "alice".to_string(),
                message: "hi".to_string(),
            },
        );
    }
}
