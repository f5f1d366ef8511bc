//! Discovered-node model: layer nodes and their on-chain status.

use crate::identity::Identity;
use serde::{Deserialize, Serialize};

/// Ledger-reported metadata for an identity that exists on-chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    /// Account balance as reported by the ledger.
    pub balance: u64,
    /// The tick the balance snapshot is valid for, when the ledger reports it.
    pub valid_for_tick: Option<u64>,
}

/// Tri-state on-chain status of a discovered node.
///
/// `Unknown` is not a transient in-memory state: it is recorded when
/// verification exhausted its retry budget (or hit a fatal protocol error),
/// so a later run can selectively re-verify just those nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChainStatus {
    /// The identity exists on the ledger.
    Present {
        balance: u64,
        valid_for_tick: Option<u64>,
    },
    /// The identity does not exist on the ledger.
    Absent,
    /// Verification was attempted but gave up; eligible for re-verification.
    Unknown,
}

impl ChainStatus {
    /// Build a `Present` status from ledger account info.
    pub fn present(info: AccountInfo) -> Self {
        Self::Present {
            balance: info.balance,
            valid_for_tick: info.valid_for_tick,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present { .. })
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

/// A node in the discovered layer structure.
///
/// `parent` is a purely informational back-reference used to reconstruct
/// lineage; traversal never follows it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerNode {
    pub identity: Identity,
    /// Depth from a traversal root. Roots are layer 1.
    pub layer: u32,
    /// The identity whose seed derived this node, if any.
    pub parent: Option<Identity>,
    #[serde(flatten)]
    pub status: ChainStatus,
}

impl LayerNode {
    /// Create a root node (layer 1, no parent) pending verification.
    pub fn root(identity: Identity) -> Self {
        Self {
            identity,
            layer: 1,
            parent: None,
            status: ChainStatus::Unknown,
        }
    }

    /// Create the child derived from `parent`, one layer deeper.
    pub fn child_of(parent: &LayerNode, identity: Identity) -> Self {
        Self {
            identity,
            layer: parent.layer + 1,
            parent: Some(parent.identity.clone()),
            status: ChainStatus::Unknown,
        }
    }
}
