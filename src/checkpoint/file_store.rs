//! File-backed checkpoint store: one JSON record per thread.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::{Checkpoint, CheckpointStore, CHECKPOINT_FORMAT};
use crate::error::{Result, SwitchboardError};

/// Durable checkpoint store writing `{thread_id}.json` files under a base
/// directory. Writes go through a temp file and an atomic rename so a crash
/// mid-write never corrupts the latest record.
pub struct FileCheckpointStore {
    base_path: PathBuf,
}

impl FileCheckpointStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn thread_path(&self, thread_id: &str) -> Result<PathBuf> {
        validate_thread_id(thread_id)?;
        Ok(self.base_path.join(format!("{thread_id}.json")))
    }
}

/// Reject thread ids that are unsafe as file names: empty, path separators,
/// `..`, NUL, or control characters.
fn validate_thread_id(thread_id: &str) -> Result<()> {
    if thread_id.is_empty() {
        return Err(SwitchboardError::InvalidThreadId(
            "thread id cannot be empty".to_string(),
        ));
    }
    if thread_id.contains('/')
        || thread_id.contains('\\')
        || thread_id.contains("..")
        || thread_id.contains('\0')
    {
        return Err(SwitchboardError::InvalidThreadId(format!(
            "thread id contains invalid characters: {thread_id:?}"
        )));
    }
    if thread_id.chars().any(|c| c.is_control()) {
        return Err(SwitchboardError::InvalidThreadId(format!(
            "thread id contains control characters: {thread_id:?}"
        )));
    }
    Ok(())
}

#[async_trait]
impl CheckpointStore for FileCheckpointStore {
    async fn setup(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_path).await?;
        debug!(path = %self.base_path.display(), "checkpoint store ready");
        Ok(())
    }

    async fn load(&self, thread_id: &str) -> Result<Option<Checkpoint>> {
        let path = self.thread_path(thread_id)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = tokio::fs::read_to_string(&path).await?;
        let checkpoint: Checkpoint = serde_json::from_str(&content)?;
        if checkpoint.format != CHECKPOINT_FORMAT {
            return Err(SwitchboardError::Checkpoint(format!(
                "unsupported checkpoint format {} for thread {thread_id} (expected {CHECKPOINT_FORMAT})",
                checkpoint.format
            )));
        }
        Ok(Some(checkpoint))
    }

    async fn save(&self, checkpoint: &Checkpoint) -> Result<()> {
        let path = self.thread_path(&checkpoint.thread_id)?;
        if !self.base_path.exists() {
            tokio::fs::create_dir_all(&self.base_path).await?;
        }

        let content = serde_json::to_string_pretty(checkpoint)?;
        let tmp_path = self.base_path.join(format!(
            ".{}.{}.tmp",
            checkpoint.thread_id,
            uuid::Uuid::new_v4().simple()
        ));

        let write_result = async {
            let mut file = tokio::fs::File::create(&tmp_path).await?;
            file.write_all(content.as_bytes()).await?;
            file.flush().await?;
            file.sync_all().await?;
            drop(file);
            match tokio::fs::rename(&tmp_path, &path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    tokio::fs::remove_file(&path).await?;
                    tokio::fs::rename(&tmp_path, &path).await?;
                }
                Err(e) => return Err(e),
            }
            Ok::<(), std::io::Error>(())
        }
        .await;

        if let Err(e) = write_result {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(SwitchboardError::Io(e));
        }
        debug!(thread_id = %checkpoint.thread_id, state = ?checkpoint.state, "checkpoint saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_path_traversal_ids() {
        let store = FileCheckpointStore::new("/base/path");
        assert!(store.thread_path("../../etc/passwd").is_err());
        assert!(store.thread_path("foo/bar").is_err());
        assert!(store.thread_path("foo\\bar").is_err());
        assert!(store.thread_path("").is_err());
        assert!(store.thread_path("foo\0bar").is_err());
        assert!(store.thread_path("foo\nbar").is_err());
    }

    #[test]
    fn accepts_uuid_style_ids() {
        let store = FileCheckpointStore::new("/base/path");
        let path = store
            .thread_path("7f2d1a90-3c4b-4c6e-9a2f-0b1c2d3e4f50")
            .unwrap();
        assert!(path
            .to_str()
            .unwrap()
            .ends_with("7f2d1a90-3c4b-4c6e-9a2f-0b1c2d3e4f50.json"));
    }
}
