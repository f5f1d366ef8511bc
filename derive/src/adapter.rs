//! Validating wrapper around a derivation backend.

use crate::deriver::Deriver;
use layermap_types::{Identity, Seed};

/// Derivation Adapter: validates inputs locally before calling the backend
/// and classifies every failure as a dead end rather than an error.
///
/// A seed that is not exactly 55 lowercase alphabetic characters is rejected
/// without touching the backend at all.
#[derive(Clone, Debug)]
pub struct DerivationAdapter<D> {
    inner: D,
}

impl<D: Deriver> DerivationAdapter<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }

    /// Derive the next identity from a raw seed string.
    ///
    /// Returns `None` when the seed fails local validation, when the backend
    /// errors, or when the backend returns a malformed identity. None of
    /// these are escalated: the chain simply stops at this node.
    pub fn derive(&self, raw_seed: &str) -> Option<Identity> {
        let seed = match Seed::parse(raw_seed.to_string()) {
            Ok(seed) => seed,
            Err(e) => {
                tracing::debug!(error = %e, "seed rejected before derivation");
                return None;
            }
        };
        self.derive_seed(&seed)
    }

    /// Derive the next identity from an already-validated seed.
    pub fn derive_seed(&self, seed: &Seed) -> Option<Identity> {
        match self.inner.derive(seed) {
            Ok(identity) => Some(identity),
            Err(e) => {
                tracing::debug!(error = %e, "derivation backend declined seed");
                None
            }
        }
    }
}
