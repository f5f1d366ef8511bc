//! FIFO frontier of nodes awaiting verification and expansion.

use layermap_store::FrontierEntry;
use layermap_types::Identity;
use std::collections::VecDeque;

/// A node sitting in the frontier: discovered but not yet verified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingNode {
    pub identity: Identity,
    pub layer: u32,
    pub parent: Option<Identity>,
}

impl PendingNode {
    /// A traversal root at layer 1.
    pub fn root(identity: Identity) -> Self {
        Self {
            identity,
            layer: 1,
            parent: None,
        }
    }
}

/// FIFO queue of pending nodes.
///
/// Insertion order is discovery order, which makes the traversal strictly
/// breadth-first: every layer-k node is verified before any layer-k+1 node
/// is dequeued. The order must survive checkpoint round-trips.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<PendingNode>,
}

impl Frontier {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Enqueue a newly discovered node at the back.
    pub fn push(&mut self, node: PendingNode) {
        self.queue.push_back(node);
    }

    /// Return a node to the front of the queue.
    ///
    /// Used when an in-flight verification is aborted by shutdown: the node
    /// goes back exactly where it was, so it is still `Enqueued` in the
    /// persisted state and BFS order is preserved on resume.
    pub fn push_front(&mut self, node: PendingNode) {
        self.queue.push_front(node);
    }

    /// Dequeue the oldest pending node.
    pub fn pop(&mut self) -> Option<PendingNode> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Snapshot the queue for a checkpoint, preserving order.
    pub fn to_entries(&self) -> Vec<FrontierEntry> {
        self.queue
            .iter()
            .map(|node| FrontierEntry {
                identity: node.identity.clone(),
                seed: node.identity.seed(),
                layer: node.layer,
                parent: node.parent.clone(),
            })
            .collect()
    }

    /// Rebuild the queue from checkpoint entries, preserving order.
    pub fn from_entries(entries: Vec<FrontierEntry>) -> Self {
        Self {
            queue: entries
                .into_iter()
                .map(|e| PendingNode {
                    identity: e.identity,
                    layer: e.layer,
                    parent: e.parent,
                })
                .collect(),
        }
    }
}
