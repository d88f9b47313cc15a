//! Conversation-loop semantics: one resume through the tool-calling loop.

mod common;

use common::{send_call, ScriptedProvider};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use switchboard::agent::{run_turn, TurnOutcome};
use switchboard::checkpoint::{Checkpoint, ResumeValue, WorkflowState};
use switchboard::diag::Diag;
use switchboard::error::SwitchboardError;
use switchboard::types::{ContentPart, Role, ToolCall};

fn message(from: &str, text: &str) -> ResumeValue {
    ResumeValue::Message {
        from: from.to_string(),
        message: text.to_string(),
    }
}

fn test_diag() -> (TempDir, Diag) {
    let dir = TempDir::new().unwrap();
    let diag = Diag::new(dir.path());
    (dir, diag)
}

#[tokio::test]
async fn termination_resume_completes_without_model_call() {
    let provider = ScriptedProvider::new();
    let (_dir, diag) = test_diag();
    let mut cp = Checkpoint::new("t1");

    let outcome = run_turn(&mut cp, ResumeValue::End, &provider, &diag)
        .await
        .unwrap();

    assert_eq!(outcome, TurnOutcome::Completed);
    assert_eq!(cp.state, WorkflowState::Terminated);
    assert!(cp.pending_interrupt.is_none());
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test]
async fn zero_tool_calls_leaves_only_the_inbound_line() {
    let provider = ScriptedProvider::new();
    provider.queue_text("noted");
    let (_dir, diag) = test_diag();
    let mut cp = Checkpoint::new("t1");

    let outcome = run_turn(&mut cp, message("alice", "hi"), &provider, &diag)
        .await
        .unwrap();

    assert_eq!(outcome, TurnOutcome::Suspended);
    assert_eq!(cp.state, WorkflowState::AwaitingInput);
    assert_eq!(
        cp.conversations.transcript("alice").unwrap(),
        &["alice->You: hi".to_string()],
    );
    assert_eq!(provider.request_count(), 1);

    let request = &provider.requests()[0];
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, Role::System);
    assert_eq!(request.messages[1].role, Role::User);
    assert_eq!(request.tools.len(), 1);
    assert_eq!(request.tools[0].name, "send_message");
}

#[tokio::test]
async fn worked_example_alice_hi_gets_hello_back() {
    let provider = ScriptedProvider::new();
    provider.queue_tool_calls(vec![send_call("call_1", "alice", "hello!")]);
    provider.queue_text("done");
    let (_dir, diag) = test_diag();
    let mut cp = Checkpoint::new("t1");

    let outcome = run_turn(&mut cp, message("alice", "hi"), &provider, &diag)
        .await
        .unwrap();

    assert_eq!(outcome, TurnOutcome::Suspended);
    assert_eq!(
        cp.conversations.transcript("alice").unwrap(),
        &[
            "alice->You: hi".to_string(),
            "you->alice: hello!".to_string(),
        ],
    );
}

#[tokio::test]
async fn tool_results_feed_back_in_call_order() {
    let provider = ScriptedProvider::new();
    provider.queue_tool_calls(vec![
        send_call("call_a", "alice", "one"),
        send_call("call_b", "bob", "two"),
    ]);
    provider.queue_text("done");
    let (_dir, diag) = test_diag();
    let mut cp = Checkpoint::new("t1");

    run_turn(&mut cp, message("alice", "hi"), &provider, &diag)
        .await
        .unwrap();

    // Both transcripts were mutated before the follow-up invocation.
    assert_eq!(
        cp.conversations.transcript("alice").unwrap(),
        &["alice->You: hi".to_string(), "you->alice: one".to_string()],
    );
    assert_eq!(
        cp.conversations.transcript("bob").unwrap(),
        &["you->bob: two".to_string()],
    );

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);

    // Second request: system, user, assistant tool calls, then results in
    // the order the model issued the calls.
    let follow_up = &requests[1].messages;
    assert_eq!(follow_up.len(), 5);
    assert_eq!(follow_up[2].role, Role::Assistant);
    assert_eq!(
        follow_up[2]
            .tool_calls()
            .iter()
            .map(|tc| tc.id.as_str())
            .collect::<Vec<_>>(),
        vec!["call_a", "call_b"],
    );
    for (msg, (id, ack)) in follow_up[3..].iter().zip([
        ("call_a", "Message sent to alice"),
        ("call_b", "Message sent to bob"),
    ]) {
        assert_eq!(msg.role, Role::Tool);
        match &msg.content[0] {
            ContentPart::ToolResult(tr) => {
                assert_eq!(tr.tool_call_id, id);
                assert_eq!(tr.result, serde_json::json!(ack));
                assert!(!tr.is_error);
            }
            other => panic!("expected tool result, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn unknown_tool_yields_error_result_without_mutation() {
    let provider = ScriptedProvider::new();
    provider.queue_tool_calls(vec![ToolCall {
        id: "call_x".to_string(),
        name: "get_weather".to_string(),
        arguments: serde_json::json!({"city": "berlin"}),
    }]);
    provider.queue_text("done");
    let (_dir, diag) = test_diag();
    let mut cp = Checkpoint::new("t1");

    let outcome = run_turn(&mut cp, message("alice", "hi"), &provider, &diag)
        .await
        .unwrap();

    assert_eq!(outcome, TurnOutcome::Suspended);
    // Only the inbound line; the bad call mutated nothing.
    assert_eq!(cp.conversations.transcript("alice").unwrap().len(), 1);

    let follow_up = &provider.requests()[1].messages;
    match &follow_up[3].content[0] {
        ContentPart::ToolResult(tr) => {
            assert_eq!(tr.tool_call_id, "call_x");
            assert!(tr.is_error);
            assert!(tr.result["error"].as_str().unwrap().contains("get_weather"));
        }
        other => panic!("expected tool result, got {other:?}"),
    }
}

#[tokio::test]
async fn prompt_aggregates_other_users_histories() {
    let provider = ScriptedProvider::new();
    provider.queue_text("noted");
    let (_dir, diag) = test_diag();
    let mut cp = Checkpoint::new("t1");
    cp.conversations.record_inbound("bob", "yo");

    run_turn(&mut cp, message("alice", "hi"), &provider, &diag)
        .await
        .unwrap();

    let user_prompt = provider.requests()[0].messages[1].text();
    assert!(user_prompt.contains("<bob>\nbob->You: yo\n</bob>"));
    // New sender appears as an empty block; the new message only in the frame.
    assert!(user_prompt.contains("<alice>\n\n</alice>"));
    assert!(user_prompt.contains("You got a message from alice:\n---\nhi\n---"));
}

#[tokio::test]
async fn runaway_tool_loop_is_aborted() {
    let provider = ScriptedProvider::new();
    for i in 0..25 {
        provider.queue_tool_calls(vec![send_call(&format!("call_{i}"), "alice", "again")]);
    }
    let (_dir, diag) = test_diag();
    let mut cp = Checkpoint::new("t1");

    let err = run_turn(&mut cp, message("alice", "hi"), &provider, &diag)
        .await
        .unwrap_err();
    assert!(matches!(err, SwitchboardError::ToolLoopOverflow { .. }));
}
