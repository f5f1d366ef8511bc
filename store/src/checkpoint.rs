//! The checkpoint schema.

use layermap_types::{Identity, LayerNode, Seed, Timestamp};
use serde::{Deserialize, Serialize};

/// Current checkpoint schema version. Bump on any incompatible change;
/// loading a mismatched version is an explicit error, never structural
/// guessing.
pub const CHECKPOINT_VERSION: u32 = 1;

/// A node awaiting expansion, as persisted in the frontier.
///
/// The seed is stored alongside the identity so the file is self-sufficient
/// for inspection, even though it is recomputable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontierEntry {
    pub identity: Identity,
    pub seed: Seed,
    pub layer: u32,
    pub parent: Option<Identity>,
}

/// A point-in-time, self-sufficient snapshot of a traversal run.
///
/// Loading a checkpoint reconstructs the frontier and visited set exactly,
/// so a resumed run reaches the same final discovered set as an
/// uninterrupted one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Schema version, checked on load.
    pub version: u32,
    /// Number of nodes fully verified so far.
    pub processed_count: u64,
    /// When the run (not this snapshot) started.
    pub started_at: Timestamp,
    /// When this snapshot was taken.
    pub last_update: Timestamp,
    /// Every identity ever enqueued or discovered, in discovery order.
    pub visited: Vec<Identity>,
    /// Nodes awaiting expansion, in FIFO order.
    pub frontier: Vec<FrontierEntry>,
    /// All fully-verified nodes, append-only.
    pub discovered: Vec<LayerNode>,
}

impl Checkpoint {
    /// Create an empty checkpoint for a run starting now.
    pub fn new(started_at: Timestamp) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            processed_count: 0,
            started_at,
            last_update: started_at,
            visited: Vec::new(),
            frontier: Vec::new(),
            discovered: Vec::new(),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use layermap_types::ChainStatus;

    fn id(c: char) -> Identity {
        Identity::parse(c.to_string().repeat(Identity::LEN)).unwrap()
    }

    #[test]
    fn new_checkpoint_is_empty_at_the_current_version() {
        let cp = Checkpoint::new(Timestamp::new(1_000));
        assert_eq!(cp.version, CHECKPOINT_VERSION);
        assert_eq!(cp.processed_count, 0);
        assert!(cp.visited.is_empty());
        assert!(cp.frontier.is_empty());
        assert!(cp.discovered.is_empty());
    }

    #[test]
    fn checkpoint_json_roundtrip() {
        let mut cp = Checkpoint::new(Timestamp::new(5));
        cp.processed_count = 3;
        cp.visited.push(id('A'));
        cp.frontier.push(FrontierEntry {
            identity: id('A'),
            seed: id('A').seed(),
            layer: 1,
            parent: None,
        });
        let mut node = LayerNode::root(id('A'));
        node.status = ChainStatus::Present {
            balance: 9,
            valid_for_tick: None,
        };
        cp.discovered.push(node);

        let json = serde_json::to_string_pretty(&cp).unwrap();
        let back: Checkpoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cp);
    }
}
