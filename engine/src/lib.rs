//! Traversal Engine: bounded breadth-first exploration of the identity chain.
//!
//! A single logical worker pops nodes from the FIFO [`Frontier`], verifies
//! them against the ledger (through the retry policy and shared rate
//! budget), derives children for ledger-confirmed nodes, and periodically
//! snapshots all state through the checkpoint store.

pub mod config;
pub mod engine;
pub mod error;
pub mod frontier;
pub mod shutdown;
pub mod summary;
pub mod visited;

pub use config::{EngineConfig, RetryConfig};
pub use engine::TraversalEngine;
pub use error::EngineError;
pub use frontier::{Frontier, PendingNode};
pub use shutdown::{StopHandle, StopSignal};
pub use summary::{RunSummary, TerminationReason};
pub use visited::VisitedSet;
