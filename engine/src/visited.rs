//! Deduplication across the whole run.

use layermap_types::Identity;
use std::collections::HashSet;

/// Set of every identity ever enqueued or discovered.
///
/// Membership here is the sole dedup guard: a node may be reachable via
/// multiple derivation paths, but it enters the traversal exactly once.
/// Insertion order is kept so checkpoints serialize deterministically.
#[derive(Debug, Default)]
pub struct VisitedSet {
    set: HashSet<Identity>,
    order: Vec<Identity>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an identity. Returns `false` if it was already present.
    pub fn insert(&mut self, identity: Identity) -> bool {
        if self.set.insert(identity.clone()) {
            self.order.push(identity);
            true
        } else {
            false
        }
    }

    /// Snapshot in insertion order for a checkpoint.
    pub fn to_vec(&self) -> Vec<Identity> {
        self.order.clone()
    }

    /// Rebuild from a checkpoint snapshot.
    pub fn from_vec(identities: Vec<Identity>) -> Self {
        let mut visited = Self::new();
        for identity in identities {
            visited.insert(identity);
        }
        visited
    }
}
