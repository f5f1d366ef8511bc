//! Checkpoint Store: a single save/load boundary for all traversal state.
//!
//! One explicit [`Checkpoint`] value object replaces ad hoc global state.
//! Saves are atomic (write-to-temp, then rename), so a crash mid-write can
//! never corrupt the previously-good checkpoint.

pub mod checkpoint;
pub mod error;
pub mod store;

pub use checkpoint::{Checkpoint, FrontierEntry, CHECKPOINT_VERSION};
pub use error::StoreError;
pub use store::CheckpointStore;
