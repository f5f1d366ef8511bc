//! Fundamental types for the layermap chain explorer.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: identities, seeds, layer nodes, on-chain status, and timestamps.

pub mod identity;
pub mod node;
pub mod time;

pub use identity::{Identity, IdentityParseError, Seed, SeedParseError};
pub use node::{AccountInfo, ChainStatus, LayerNode};
pub use time::Timestamp;
