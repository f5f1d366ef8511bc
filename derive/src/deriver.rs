//! The derivation seam.

use layermap_types::{Identity, Seed};
use thiserror::Error;

/// Error from a derivation backend.
///
/// Derivation is pure computation — a failure is permanent for that input
/// and is never retried.
#[derive(Debug, Error)]
pub enum DeriveError {
    #[error("derivation backend failed: {0}")]
    Backend(String),

    #[error("backend produced a malformed identity: {0}")]
    MalformedOutput(String),
}

/// A deterministic, side-effect-free seed-to-identity derivation function.
///
/// Implementations must return the same identity for the same seed on every
/// call. The engine treats any error as "this node is a dead end", not as a
/// run-level failure.
pub trait Deriver {
    fn derive(&self, seed: &Seed) -> Result<Identity, DeriveError>;
}

impl<D: Deriver + ?Sized> Deriver for &D {
    fn derive(&self, seed: &Seed) -> Result<Identity, DeriveError> {
        (**self).derive(seed)
    }
}
