//! Scripted deriver — deterministic seed-to-identity mapping for tests.

use layermap_derive::{DeriveError, Deriver};
use layermap_types::{Identity, Seed};
use std::collections::HashMap;
use std::sync::Mutex;

/// A deriver backed by an explicit seed-to-identity table.
///
/// Seeds not in the table fail derivation (a dead end in the chain), which
/// lets tests build chains of any exact shape. Calls are counted so tests
/// can assert when derivation was (or was not) attempted.
pub struct ScriptedDeriver {
    table: HashMap<Seed, Identity>,
    calls: Mutex<u64>,
}

impl ScriptedDeriver {
    /// A deriver that knows no seeds: every chain ends immediately.
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
            calls: Mutex::new(0),
        }
    }

    /// Add a chain link: deriving `parent`'s seed yields `child`.
    pub fn link(mut self, parent: &Identity, child: Identity) -> Self {
        self.table.insert(parent.seed(), child);
        self
    }

    /// Add an explicit seed-to-identity mapping.
    pub fn map(mut self, seed: Seed, identity: Identity) -> Self {
        self.table.insert(seed, identity);
        self
    }

    /// Total number of derivations attempted so far.
    pub fn call_count(&self) -> u64 {
        *self.calls.lock().unwrap()
    }
}

impl Deriver for ScriptedDeriver {
    fn derive(&self, seed: &Seed) -> Result<Identity, DeriveError> {
        *self.calls.lock().unwrap() += 1;
        self.table
            .get(seed)
            .cloned()
            .ok_or_else(|| DeriveError::Backend("seed not in script".into()))
    }
}
