//! Failure taxonomy for ledger lookups.

use thiserror::Error;

/// How a ledger lookup failed.
///
/// The taxonomy is what the retry policy keys on: `RateLimited` and
/// `Transient` may succeed on retry, `Fatal` never will.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The remote signaled backpressure (HTTP 429 or equivalent).
    #[error("ledger rate-limited the request")]
    RateLimited,

    /// Timeout, connection reset, server error — may succeed on retry.
    #[error("transient ledger failure: {0}")]
    Transient(String),

    /// Malformed request or protocol violation — will never succeed.
    #[error("fatal ledger failure: {0}")]
    Fatal(String),
}

impl LedgerError {
    /// Whether the retry policy may re-issue the call.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited | Self::Transient(_))
    }
}
