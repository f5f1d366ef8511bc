//! Seed-to-identity derivation.
//!
//! The cryptographic derivation function is an external collaborator: the
//! traversal engine only ever sees the [`Deriver`] trait and the validating
//! [`DerivationAdapter`] wrapper around it. The [`Blake2Deriver`] is the
//! built-in backend used for the dev chain and for tests.

pub mod adapter;
pub mod blake2_chain;
pub mod deriver;

pub use adapter::DerivationAdapter;
pub use blake2_chain::Blake2Deriver;
pub use deriver::{DeriveError, Deriver};
