//! Nullable infrastructure for deterministic testing.
//!
//! Scripted stand-ins for the two external collaborators: the ledger and
//! the derivation function. No network, no crypto, fully deterministic.

pub mod deriver;
pub mod ledger;

pub use deriver::ScriptedDeriver;
pub use ledger::ScriptedLedger;
