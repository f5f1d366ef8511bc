//! The ledger lookup seam.

use crate::error::LedgerError;
use layermap_types::{AccountInfo, Identity};

/// Outcome of a successful existence lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Existence {
    /// The identity is registered on the ledger.
    Found(AccountInfo),
    /// The identity is not on the ledger.
    NotFound,
}

/// A remote existence/balance lookup.
///
/// Implementations classify remote failures into the [`LedgerError`]
/// taxonomy and never retry internally — that is the retry policy's job.
#[allow(async_fn_in_trait)]
pub trait LedgerClient {
    async fn exists(&self, identity: &Identity) -> Result<Existence, LedgerError>;
}

impl<L: LedgerClient> LedgerClient for &L {
    async fn exists(&self, identity: &Identity) -> Result<Existence, LedgerError> {
        (**self).exists(identity).await
    }
}
