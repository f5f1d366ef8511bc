//! Built-in derivation backend for the dev chain.
//!
//! Derives a 60-character base-26 identity from the Blake2b-512 digest of
//! the seed bytes. Deterministic and self-contained, so the whole chain can
//! be explored without the production cryptographic library.

use crate::deriver::{DeriveError, Deriver};
use blake2::{Blake2b512, Digest};
use layermap_types::{Identity, Seed};

/// Blake2b-based seed-to-identity derivation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake2Deriver;

impl Blake2Deriver {
    pub fn new() -> Self {
        Self
    }
}

impl Deriver for Blake2Deriver {
    fn derive(&self, seed: &Seed) -> Result<Identity, DeriveError> {
        let digest = Blake2b512::digest(seed.as_str().as_bytes());

        // Map the first 60 digest bytes onto A-Z. The modulo bias is
        // irrelevant here: the output only needs to be deterministic and
        // well-formed, not uniformly distributed.
        let body: String = digest[..Identity::LEN]
            .iter()
            .map(|b| (b'A' + b % 26) as char)
            .collect();

        Identity::parse(body).map_err(|e| DeriveError::MalformedOutput(e.to_string()))
    }
}
