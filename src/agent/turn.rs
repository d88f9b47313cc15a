//! One resume of the conversation loop: PROCESSING plus the tool loop.
//!
//! The loop is a persisted state machine: `AWAITING_INPUT` -> `PROCESSING`
//! -> `TOOL_LOOP` -> `AWAITING_INPUT`, with `TERMINATED` reachable only from
//! `AWAITING_INPUT` on a termination resume. One call to [`run_turn`]
//! consumes one resume value and runs until the next suspension (or
//! termination); the caller persists the mutated checkpoint.

use tracing::{debug, info};

use crate::checkpoint::{Checkpoint, ResumeValue};
use crate::diag::Diag;
use crate::error::Result;
use crate::provider::{ChatProvider, ChatRequest};
use crate::types::{ModelMessage, ToolResult};

use super::prompt;
use super::tools::{send_message_definition, ToolInvocation};

/// A model that keeps requesting tools past this many rounds is aborted.
const MAX_TOOL_ROUNDS: usize = 20;

/// How a turn left the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Re-suspended awaiting the next inbound message.
    Suspended,
    /// Gracefully terminated; the completion marker for the driver.
    Completed,
}

/// Consume one resume value and advance the workflow to its next
/// suspension point.
///
/// Termination resumes never invoke the model. Message resumes run the
/// full tool-calling loop; every tool call mutates conversation state
/// before its result is produced, and results are fed back strictly in
/// call order. Transient tool round-trip messages are not persisted.
pub async fn run_turn(
    checkpoint: &mut Checkpoint,
    resume: ResumeValue,
    provider: &dyn ChatProvider,
    diag: &Diag,
) -> Result<TurnOutcome> {
    let (from, inbound) = match resume {
        ResumeValue::End => {
            info!(thread_id = %checkpoint.thread_id, "termination requested");
            checkpoint.terminate();
            return Ok(TurnOutcome::Completed);
        }
        ResumeValue::Message { from, message } => (from, message),
    };

    // The prompt aggregates the pre-append snapshot; the new message only
    // appears in the framed section.
    checkpoint.conversations.touch(&from);
    let turn_input = prompt::render_turn_input(&from, &inbound, &checkpoint.conversations);
    checkpoint.conversations.record_inbound(&from, &inbound);

    let mut messages = vec![prompt::system_message(), ModelMessage::user(turn_input)];
    diag.dump_messages(&messages);

    let tools = vec![send_message_definition()];
    let mut response = provider
        .complete(&ChatRequest {
            messages: messages.clone(),
            tools: tools.clone(),
        })
        .await?;

    let mut rounds = 0usize;
    while !response.tool_calls.is_empty() {
        rounds += 1;
        if rounds > MAX_TOOL_ROUNDS {
            return Err(crate::error::SwitchboardError::ToolLoopOverflow {
                rounds: MAX_TOOL_ROUNDS,
            });
        }

        let calls = std::mem::take(&mut response.tool_calls);
        debug!(
            thread_id = %checkpoint.thread_id,
            round = rounds,
            calls = calls.len(),
            "executing tool calls"
        );

        // Execute strictly in the order the model issued the calls. Each
        // append is applied before the next call is considered, so results
        // always reflect post-mutation state.
        let mut results = Vec::with_capacity(calls.len());
        for call in &calls {
            let result = match ToolInvocation::parse(call) {
                Ok(invocation) => {
                    let outcome = invocation.execute();
                    checkpoint.conversations.apply(&outcome.effect);
                    println!("{}", outcome.effect.line);
                    ToolResult {
                        tool_call_id: call.id.clone(),
                        result: serde_json::Value::String(outcome.ack),
                        is_error: false,
                    }
                }
                Err(e) => {
                    debug!(tool = %call.name, error = %e, "tool call rejected");
                    ToolResult {
                        tool_call_id: call.id.clone(),
                        result: serde_json::json!({ "error": e.to_string() }),
                        is_error: true,
                    }
                }
            };
            results.push(result);
        }

        messages.push(ModelMessage::assistant_with_tool_calls(
            response.text.clone(),
            calls,
        ));
        messages.extend(results.into_iter().map(ModelMessage::tool_result));
        diag.dump_messages(&messages);

        response = provider
            .complete(&ChatRequest {
                messages: messages.clone(),
                tools: tools.clone(),
            })
            .await?;
    }

    checkpoint.suspend();
    Ok(TurnOutcome::Suspended)
}
