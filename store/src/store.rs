//! Atomic checkpoint persistence.

use crate::checkpoint::{Checkpoint, CHECKPOINT_VERSION};
use crate::error::StoreError;
use std::fs;
use std::path::{Path, PathBuf};

/// Persists checkpoints to a single JSON file.
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The checkpoint file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a checkpoint file currently exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Atomically persist a checkpoint.
    ///
    /// The snapshot is serialized to `<path>.tmp` in the same directory and
    /// renamed over the target, so an interrupted save leaves the previous
    /// checkpoint intact.
    pub fn save(&self, checkpoint: &Checkpoint) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_vec_pretty(checkpoint)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            processed = checkpoint.processed_count,
            frontier = checkpoint.frontier.len(),
            discovered = checkpoint.discovered.len(),
            "checkpoint saved"
        );
        Ok(())
    }

    /// Load the checkpoint, if one exists.
    ///
    /// Returns `Ok(None)` when the file is absent. A present file that
    /// cannot be parsed, or whose schema version does not match, is an
    /// error — a half-usable checkpoint must never silently restart a run
    /// from scratch.
    pub fn load(&self) -> Result<Option<Checkpoint>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;
        let checkpoint: Checkpoint = serde_json::from_str(&json)?;
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(StoreError::VersionMismatch {
                found: checkpoint.version,
                expected: CHECKPOINT_VERSION,
            });
        }
        Ok(Some(checkpoint))
    }

    /// Archive the checkpoint after a clean termination.
    ///
    /// The file is renamed to `<path>.done` so the final map remains
    /// inspectable while a fresh run starts from scratch. Returns the
    /// archive path, or `None` if there was nothing to archive.
    pub fn archive(&self) -> Result<Option<PathBuf>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let done = self.suffixed_path("done");
        fs::rename(&self.path, &done)?;
        tracing::info!(path = %done.display(), "checkpoint archived");
        Ok(Some(done))
    }

    fn tmp_path(&self) -> PathBuf {
        self.suffixed_path("tmp")
    }

    fn suffixed_path(&self, suffix: &str) -> PathBuf {
        let mut os = self.path.clone().into_os_string();
        os.push(".");
        os.push(suffix);
        PathBuf::from(os)
    }
}
