//! Ledger Adapter: remote existence lookups and the discipline around them.
//!
//! The adapter itself ([`HttpLedgerClient`]) never retries — retries and
//! backoff belong to [`RetryPolicy`], and every attempt draws from a shared
//! [`RateBudget`] so the external request-per-second ceiling is never
//! collectively exceeded.

pub mod budget;
pub mod client;
pub mod error;
pub mod http;
pub mod retry;

pub use budget::RateBudget;
pub use client::{Existence, LedgerClient};
pub use error::LedgerError;
pub use http::HttpLedgerClient;
pub use retry::{RetryOutcome, RetryPolicy};
