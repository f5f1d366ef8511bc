//! Engine errors.
//!
//! Ledger failures and malformed inputs never surface here — they degrade
//! individual nodes to `Unknown`/leaf. What does surface is anything that
//! breaks the durability guarantee or the run setup itself.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Checkpoint I/O failed. Fatal: resumability can no longer be
    /// guaranteed, so the run must stop rather than continue undurably.
    #[error("checkpoint store failure (no guaranteed resume point): {0}")]
    Store(#[from] layermap_store::StoreError),

    #[error("config error: {0}")]
    Config(String),

    #[error("no traversal roots: frontier is empty and no checkpoint exists")]
    NoRoots,
}
