//! End-of-run summary.

use std::fmt;

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminationReason {
    /// Every reachable node within the layer cap was processed.
    FrontierExhausted,
    /// The `max_nodes` hard cap was hit.
    NodeCapReached,
    /// An external stop signal arrived; a checkpoint was saved.
    Interrupted,
}

impl TerminationReason {
    /// Whether this is a clean completion (frontier drained or cap hit),
    /// after which the checkpoint is archived rather than kept live.
    pub fn is_complete(&self) -> bool {
        !matches!(self, Self::Interrupted)
    }
}

/// Counts and bounds reached by a traversal run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub reason: TerminationReason,
    /// Nodes fully verified (across all runs, if resumed).
    pub processed: u64,
    pub discovered: u64,
    pub on_chain: u64,
    pub off_chain: u64,
    pub unknown: u64,
    pub max_layer: u32,
    /// Nodes still waiting in the frontier (non-zero only when interrupted
    /// or capped).
    pub frontier_remaining: u64,
    pub elapsed_secs: u64,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.reason {
            TerminationReason::FrontierExhausted => "frontier exhausted",
            TerminationReason::NodeCapReached => "node cap reached",
            TerminationReason::Interrupted => "interrupted (checkpoint saved, resumable)",
        };
        writeln!(f, "run finished: {reason}")?;
        writeln!(f, "  nodes processed:   {}", self.processed)?;
        writeln!(f, "  nodes discovered:  {}", self.discovered)?;
        writeln!(f, "  on-chain:          {}", self.on_chain)?;
        writeln!(f, "  off-chain:         {}", self.off_chain)?;
        writeln!(f, "  unknown:           {}", self.unknown)?;
        writeln!(f, "  max layer reached: {}", self.max_layer)?;
        write!(f, "  frontier pending:  {}", self.frontier_remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupted_is_not_complete() {
        assert!(TerminationReason::FrontierExhausted.is_complete());
        assert!(TerminationReason::NodeCapReached.is_complete());
        assert!(!TerminationReason::Interrupted.is_complete());
    }

    #[test]
    fn display_mentions_resumability_on_interrupt() {
        let summary = RunSummary {
            reason: TerminationReason::Interrupted,
            processed: 7,
            discovered: 7,
            on_chain: 3,
            off_chain: 2,
            unknown: 2,
            max_layer: 4,
            frontier_remaining: 1,
            elapsed_secs: 12,
        };
        let text = summary.to_string();
        assert!(text.contains("resumable"));
        assert!(text.contains("max layer reached: 4"));
    }
}
