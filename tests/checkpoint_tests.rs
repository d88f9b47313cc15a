//! File-backed checkpoint store behavior.

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use switchboard::checkpoint::{
    Checkpoint, CheckpointStore, FileCheckpointStore, WorkflowState,
};
use switchboard::error::SwitchboardError;

#[tokio::test]
async fn setup_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = FileCheckpointStore::new(dir.path().join("threads"));

    store.setup().await.unwrap();
    store.setup().await.unwrap();

    let cp = Checkpoint::new("t1");
    store.save(&cp).await.unwrap();
    assert!(store.load("t1").await.unwrap().is_some());
}

#[tokio::test]
async fn save_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = FileCheckpointStore::new(dir.path());

    let mut cp = Checkpoint::new("t1");
    cp.conversations.record_inbound("alice", "hi");
    store.save(&cp).await.unwrap();

    let loaded = store.load("t1").await.unwrap().unwrap();
    assert_eq!(loaded, cp);
    assert_eq!(loaded.state, WorkflowState::AwaitingInput);
}

#[tokio::test]
async fn latest_save_wins_across_store_instances() {
    let dir = TempDir::new().unwrap();

    let mut cp = Checkpoint::new("t1");
    {
        let store = FileCheckpointStore::new(dir.path());
        store.save(&cp).await.unwrap();
        cp.conversations.record_inbound("alice", "first");
        cp.suspend();
        store.save(&cp).await.unwrap();
    }

    // Fresh instance over the same directory sees the latest record.
    let store = FileCheckpointStore::new(dir.path());
    let loaded = store.load("t1").await.unwrap().unwrap();
    assert_eq!(
        loaded.conversations.transcript("alice").unwrap(),
        &["alice->You: first".to_string()],
    );
}

#[tokio::test]
async fn terminated_state_survives_restart() {
    let dir = TempDir::new().unwrap();
    let store = FileCheckpointStore::new(dir.path());

    let mut cp = Checkpoint::new("t1");
    cp.terminate();
    store.save(&cp).await.unwrap();

    let loaded = store.load("t1").await.unwrap().unwrap();
    assert!(loaded.is_terminated());
    assert!(loaded.pending_interrupt.is_none());
}

#[tokio::test]
async fn missing_thread_loads_none() {
    let dir = TempDir::new().unwrap();
    let store = FileCheckpointStore::new(dir.path());
    assert!(store.load("absent").await.unwrap().is_none());
}

#[tokio::test]
async fn unsupported_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = FileCheckpointStore::new(dir.path());

    let cp = Checkpoint::new("t1");
    let mut value = serde_json::to_value(&cp).unwrap();
    value["format"] = serde_json::json!(99);
    std::fs::write(
        dir.path().join("t1.json"),
        serde_json::to_string(&value).unwrap(),
    )
    .unwrap();

    let err = store.load("t1").await.unwrap_err();
    assert!(matches!(err, SwitchboardError::Checkpoint(_)));
}

#[tokio::test]
async fn invalid_thread_id_is_rejected_on_save() {
    let dir = TempDir::new().unwrap();
    let store = FileCheckpointStore::new(dir.path());

    let cp = Checkpoint::new("../escape");
    let err = store.save(&cp).await.unwrap_err();
    assert!(matches!(err, SwitchboardError::InvalidThreadId(_)));
}

#[tokio::test]
async fn corrupt_record_surfaces_serialization_error() {
    let dir = TempDir::new().unwrap();
    let store = FileCheckpointStore::new(dir.path());
    std::fs::write(dir.path().join("t1.json"), "{not json").unwrap();

    let err = store.load("t1").await.unwrap_err();
    assert!(matches!(err, SwitchboardError::Serialization(_)));
}
