//! Checkpoint storage errors.
//!
//! Unlike ledger failures, these are fatal to a run: without a working
//! checkpoint the engine cannot guarantee resumability and must stop rather
//! than silently continue without durability.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("checkpoint I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("checkpoint serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("checkpoint schema version {found} is not supported (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },
}
