//! In-memory checkpoint store for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{Checkpoint, CheckpointStore};
use crate::error::Result;

/// Volatile store; contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryCheckpointStore {
    threads: Mutex<HashMap<String, Checkpoint>>,
}

impl MemoryCheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CheckpointStore for MemoryCheckpointStore {
    async fn setup(&self) -> Result<()> {
        Ok(())
    }

    async fn load(&self, thread_id: &str) -> Result<Option<Checkpoint>> {
        Ok(self.threads.lock().unwrap().get(thread_id).cloned())
    }

    async fn save(&self, checkpoint: &Checkpoint) -> Result<()> {
        self.threads
            .lock()
            .unwrap()
            .insert(checkpoint.thread_id.clone(), checkpoint.clone());
        Ok(())
    }
}
