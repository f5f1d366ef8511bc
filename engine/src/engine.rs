//! The traversal loop.
//!
//! Node lifecycle: `Enqueued → Verifying → {Present, Absent, Unknown} →
//! Expanded | Leaf`. Absent and Unknown nodes are terminal; Present nodes
//! derive exactly one child, which is enqueued iff it is new to the visited
//! set and the layer cap allows it.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::frontier::{Frontier, PendingNode};
use crate::shutdown::StopSignal;
use crate::summary::{RunSummary, TerminationReason};
use crate::visited::VisitedSet;
use layermap_derive::{DerivationAdapter, Deriver};
use layermap_ledger::{Existence, LedgerClient, RateBudget, RetryOutcome, RetryPolicy};
use layermap_store::{Checkpoint, CheckpointStore};
use layermap_types::{ChainStatus, Identity, LayerNode, Timestamp};

/// Bounded breadth-first traversal of the identity chain.
///
/// Owns all mutable traversal state; the frontier and visited set have no
/// other writers, so the dedup invariant cannot race.
pub struct TraversalEngine<L, D> {
    config: EngineConfig,
    ledger: L,
    deriver: DerivationAdapter<D>,
    budget: RateBudget,
    retry: RetryPolicy,
    store: CheckpointStore,
    frontier: Frontier,
    visited: VisitedSet,
    discovered: Vec<LayerNode>,
    processed_count: u64,
    started_at: Timestamp,
    resumed: bool,
}

impl<L: LedgerClient, D: Deriver> TraversalEngine<L, D> {
    /// Create an engine, resuming automatically from an existing checkpoint.
    ///
    /// A present-but-unreadable checkpoint is an error: silently restarting
    /// from scratch would discard hours of rate-limited work.
    pub fn new(config: EngineConfig, ledger: L, deriver: D) -> Result<Self, EngineError> {
        let store = CheckpointStore::new(&config.checkpoint_path);
        let budget = RateBudget::new(config.requests_per_second);
        let retry = config.retry.policy();
        let deriver = DerivationAdapter::new(deriver);

        match store.load()? {
            Some(cp) => {
                tracing::info!(
                    path = %config.checkpoint_path.display(),
                    processed = cp.processed_count,
                    frontier = cp.frontier.len(),
                    discovered = cp.discovered.len(),
                    "resuming from checkpoint"
                );
                Ok(Self {
                    config,
                    ledger,
                    deriver,
                    budget,
                    retry,
                    store,
                    frontier: Frontier::from_entries(cp.frontier),
                    visited: VisitedSet::from_vec(cp.visited),
                    discovered: cp.discovered,
                    processed_count: cp.processed_count,
                    started_at: cp.started_at,
                    resumed: true,
                })
            }
            None => Ok(Self {
                config,
                ledger,
                deriver,
                budget,
                retry,
                store,
                frontier: Frontier::new(),
                visited: VisitedSet::new(),
                discovered: Vec::new(),
                processed_count: 0,
                started_at: Timestamp::now(),
                resumed: false,
            }),
        }
    }

    /// Whether this engine picked up an existing checkpoint.
    pub fn resumed(&self) -> bool {
        self.resumed
    }

    /// Seed traversal roots at layer 1.
    ///
    /// Roots already known to the run (e.g. after a resume) are skipped, so
    /// seeding is idempotent.
    pub fn seed_roots(&mut self, roots: impl IntoIterator<Item = Identity>) {
        for root in roots {
            if self.visited.insert(root.clone()) {
                self.frontier.push(PendingNode::root(root));
            } else {
                tracing::debug!(identity = ?root, "root already visited, skipping");
            }
        }
    }

    /// Re-enqueue every node that previously degraded to `Unknown`.
    ///
    /// Returns how many nodes were re-enqueued. Their earlier verification
    /// attempts are refunded against `max_nodes` so a re-verification pass
    /// is not immediately capped.
    pub fn reverify_unknown(&mut self) -> usize {
        let (unknown, kept): (Vec<LayerNode>, Vec<LayerNode>) = self
            .discovered
            .drain(..)
            .partition(|n| n.status.is_unknown());
        self.discovered = kept;

        let mut pending: Vec<PendingNode> = unknown
            .into_iter()
            .map(|n| PendingNode {
                identity: n.identity,
                layer: n.layer,
                parent: n.parent,
            })
            .collect();
        let count = pending.len();
        // Merge with whatever the frontier already holds: a resumed
        // interrupted run can carry deeper pending nodes, and a requeued
        // shallow node must still be dequeued before them. The stable sort
        // keeps discovery order within a layer, requeued nodes first.
        while let Some(node) = self.frontier.pop() {
            pending.push(node);
        }
        pending.sort_by_key(|n| n.layer);
        for node in pending {
            self.frontier.push(node);
        }
        self.processed_count = self.processed_count.saturating_sub(count as u64);
        if count > 0 {
            tracing::info!(count, "re-enqueued unknown nodes for verification");
        }
        count
    }

    /// Run to termination: frontier empty, node cap hit, or stop requested.
    pub async fn run(&mut self, stop: &mut StopSignal) -> Result<RunSummary, EngineError> {
        if self.frontier.is_empty() && self.discovered.is_empty() {
            return Err(EngineError::NoRoots);
        }

        let reason = loop {
            if self.processed_count >= self.config.max_nodes {
                break TerminationReason::NodeCapReached;
            }
            let Some(node) = self.frontier.pop() else {
                break TerminationReason::FrontierExhausted;
            };

            // The ledger call and its backoff sleeps are the only suspension
            // points; aborting here leaves the node fully Enqueued.
            let status = tokio::select! {
                biased;
                _ = stop.stopped() => None,
                status = self.verify(&node.identity) => Some(status),
            };

            match status {
                Some(status) => self.finish_node(node, status)?,
                None => {
                    self.frontier.push_front(node);
                    break TerminationReason::Interrupted;
                }
            }
        };

        self.save_checkpoint()?;
        if reason.is_complete() {
            self.store.archive()?;
        }

        let summary = self.summary(reason);
        tracing::info!(
            processed = summary.processed,
            discovered = summary.discovered,
            max_layer = summary.max_layer,
            reason = ?reason,
            "traversal finished"
        );
        Ok(summary)
    }

    /// Verify and expand a single node. Returns `false` when there is
    /// nothing left to do (frontier empty or node cap reached).
    pub async fn process_next(&mut self) -> Result<bool, EngineError> {
        if self.processed_count >= self.config.max_nodes {
            return Ok(false);
        }
        let Some(node) = self.frontier.pop() else {
            return Ok(false);
        };
        let status = self.verify(&node.identity).await;
        self.finish_node(node, status)?;
        Ok(true)
    }

    /// Ask the ledger whether this identity exists, under the retry policy
    /// and the shared rate budget.
    async fn verify(&self, identity: &Identity) -> ChainStatus {
        let outcome = self
            .retry
            .execute(&self.budget, || self.ledger.exists(identity))
            .await;
        match outcome {
            RetryOutcome::Success(Existence::Found(info)) => ChainStatus::present(info),
            RetryOutcome::Success(Existence::NotFound) => ChainStatus::Absent,
            RetryOutcome::GivenUp {
                attempts,
                last_error,
            } => {
                tracing::warn!(
                    identity = ?identity,
                    attempts,
                    error = %last_error,
                    "verification abandoned, recording unknown"
                );
                ChainStatus::Unknown
            }
        }
    }

    /// Record a verified node and, if it exists on-chain, try to expand it.
    fn finish_node(&mut self, node: PendingNode, status: ChainStatus) -> Result<(), EngineError> {
        if status.is_present() {
            self.expand(&node);
        }

        self.discovered.push(LayerNode {
            identity: node.identity,
            layer: node.layer,
            parent: node.parent,
            status,
        });
        self.processed_count += 1;

        if self.config.checkpoint_interval > 0
            && self.processed_count % self.config.checkpoint_interval == 0
        {
            self.save_checkpoint()?;
        }
        Ok(())
    }

    /// Derive the child of a ledger-confirmed node and enqueue it if new.
    ///
    /// Absent nodes never reach this point: the chain stops at nodes the
    /// ledger does not confirm.
    fn expand(&mut self, node: &PendingNode) {
        if node.layer >= self.config.max_layers {
            tracing::debug!(identity = ?node.identity, layer = node.layer, "layer cap, leaf");
            return;
        }
        let Some(child) = self.deriver.derive_seed(&node.identity.seed()) else {
            tracing::debug!(identity = ?node.identity, "derivation dead end, leaf");
            return;
        };
        if !self.visited.insert(child.clone()) {
            tracing::debug!(identity = ?node.identity, child = ?child, "child already visited, leaf");
            return;
        }
        tracing::info!(
            layer = node.layer,
            parent = ?node.identity,
            child = ?child,
            "expanded to next layer"
        );
        self.frontier.push(PendingNode {
            identity: child,
            layer: node.layer + 1,
            parent: Some(node.identity.clone()),
        });
    }

    /// Snapshot the complete engine state.
    fn snapshot(&self) -> Checkpoint {
        Checkpoint {
            version: layermap_store::CHECKPOINT_VERSION,
            processed_count: self.processed_count,
            started_at: self.started_at,
            last_update: Timestamp::now(),
            visited: self.visited.to_vec(),
            frontier: self.frontier.to_entries(),
            discovered: self.discovered.clone(),
        }
    }

    /// Persist the current state. Failure here aborts the run.
    pub fn save_checkpoint(&self) -> Result<(), EngineError> {
        self.store.save(&self.snapshot())?;
        Ok(())
    }

    fn summary(&self, reason: TerminationReason) -> RunSummary {
        let mut on_chain = 0;
        let mut off_chain = 0;
        let mut unknown = 0;
        for node in &self.discovered {
            match node.status {
                ChainStatus::Present { .. } => on_chain += 1,
                ChainStatus::Absent => off_chain += 1,
                ChainStatus::Unknown => unknown += 1,
            }
        }
        RunSummary {
            reason,
            processed: self.processed_count,
            discovered: self.discovered.len() as u64,
            on_chain,
            off_chain,
            unknown,
            max_layer: self.max_layer(),
            frontier_remaining: self.frontier.len() as u64,
            elapsed_secs: self.started_at.elapsed_since(Timestamp::now()),
        }
    }

    /// Highest layer among discovered nodes.
    pub fn max_layer(&self) -> u32 {
        self.discovered.iter().map(|n| n.layer).max().unwrap_or(0)
    }

    /// All fully-verified nodes, in processing order.
    pub fn discovered(&self) -> &[LayerNode] {
        &self.discovered
    }

    /// Number of nodes verified so far (across resumed runs).
    pub fn processed_count(&self) -> u64 {
        self.processed_count
    }

    /// Number of nodes still awaiting verification.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }
}
