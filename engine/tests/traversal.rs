//! Checkpoint/resume behavior across engine restarts.
//!
//! Scripted collaborators rebuild the same chain shape in every run, so an
//! interrupted-then-resumed traversal can be compared node-for-node against
//! an uninterrupted one.

use layermap_engine::{EngineConfig, RetryConfig, StopHandle, TerminationReason, TraversalEngine};
use layermap_ledger::{Existence, LedgerError};
use layermap_nullables::{ScriptedDeriver, ScriptedLedger};
use layermap_types::{AccountInfo, ChainStatus, Identity, LayerNode};
use std::path::Path;
use tempfile::tempdir;

fn id(c: char) -> Identity {
    Identity::parse(c.to_string().repeat(Identity::LEN)).unwrap()
}

fn found(balance: u64) -> Result<Existence, LedgerError> {
    Ok(Existence::Found(AccountInfo {
        balance,
        valid_for_tick: None,
    }))
}

fn config(dir: &Path) -> EngineConfig {
    EngineConfig {
        checkpoint_path: dir.join("cp.json"),
        checkpoint_interval: 1,
        requests_per_second: 1_000_000,
        retry: RetryConfig {
            max_attempts: 2,
            base_delay_ms: 1,
            max_delay_ms: 2,
        },
        ..EngineConfig::default()
    }
}

/// Chain A → B → C → D where A..C exist on the ledger and D does not.
fn chain_ledger() -> ScriptedLedger {
    ScriptedLedger::always_not_found()
        .respond(id('A'), found(10))
        .respond(id('B'), found(20))
        .respond(id('C'), found(30))
}

fn chain_deriver() -> ScriptedDeriver {
    ScriptedDeriver::empty()
        .link(&id('A'), id('B'))
        .link(&id('B'), id('C'))
        .link(&id('C'), id('D'))
}

fn node_shape(nodes: &[LayerNode]) -> Vec<(Identity, u32, ChainStatus)> {
    nodes
        .iter()
        .map(|n| (n.identity.clone(), n.layer, n.status))
        .collect()
}

#[tokio::test]
async fn interrupted_run_resumes_to_the_same_result() {
    // Reference: an uninterrupted run over the whole chain.
    let ref_dir = tempdir().unwrap();
    let mut reference =
        TraversalEngine::new(config(ref_dir.path()), chain_ledger(), chain_deriver()).unwrap();
    reference.seed_roots([id('A')]);
    let mut stop = StopHandle::new().signal();
    let ref_summary = reference.run(&mut stop).await.unwrap();
    assert_eq!(ref_summary.reason, TerminationReason::FrontierExhausted);
    assert_eq!(ref_summary.discovered, 4);

    // Interrupted run: process two nodes, then drop the engine entirely.
    let dir = tempdir().unwrap();
    {
        let mut engine =
            TraversalEngine::new(config(dir.path()), chain_ledger(), chain_deriver()).unwrap();
        assert!(!engine.resumed());
        engine.seed_roots([id('A')]);
        assert!(engine.process_next().await.unwrap());
        assert!(engine.process_next().await.unwrap());
        assert_eq!(engine.processed_count(), 2);
        // checkpoint_interval = 1, so state is already on disk.
    }

    // A fresh engine picks up the checkpoint and finishes the traversal.
    let mut resumed =
        TraversalEngine::new(config(dir.path()), chain_ledger(), chain_deriver()).unwrap();
    assert!(resumed.resumed());
    // Re-seeding the same root is a no-op after resume.
    resumed.seed_roots([id('A')]);

    let mut stop = StopHandle::new().signal();
    let summary = resumed.run(&mut stop).await.unwrap();

    assert_eq!(summary.reason, TerminationReason::FrontierExhausted);
    assert_eq!(summary.processed, ref_summary.processed);
    assert_eq!(node_shape(resumed.discovered()), node_shape(reference.discovered()));
}

#[tokio::test]
async fn resume_does_not_repeat_ledger_calls_for_processed_nodes() {
    let dir = tempdir().unwrap();
    {
        let mut engine =
            TraversalEngine::new(config(dir.path()), chain_ledger(), chain_deriver()).unwrap();
        engine.seed_roots([id('A')]);
        engine.process_next().await.unwrap();
        engine.process_next().await.unwrap();
    }

    let ledger = chain_ledger();
    let mut resumed =
        TraversalEngine::new(config(dir.path()), &ledger, chain_deriver()).unwrap();
    let mut stop = StopHandle::new().signal();
    resumed.run(&mut stop).await.unwrap();

    // Only C and D were left in the frontier; A and B are never re-verified.
    assert_eq!(ledger.call_count(), 2);
}

#[tokio::test]
async fn clean_completion_archives_and_next_run_starts_fresh() {
    let dir = tempdir().unwrap();
    let cfg = config(dir.path());

    let mut engine =
        TraversalEngine::new(cfg.clone(), chain_ledger(), chain_deriver()).unwrap();
    engine.seed_roots([id('A')]);
    let mut stop = StopHandle::new().signal();
    engine.run(&mut stop).await.unwrap();

    assert!(!cfg.checkpoint_path.exists());
    assert!(dir.path().join("cp.json.done").exists());

    // With the live checkpoint archived, a new engine starts from scratch.
    let fresh = TraversalEngine::new(cfg, chain_ledger(), chain_deriver()).unwrap();
    assert!(!fresh.resumed());
    assert_eq!(fresh.processed_count(), 0);
}

#[tokio::test]
async fn unknown_nodes_can_be_reverified_on_a_later_run() {
    let dir = tempdir().unwrap();

    // First run: the ledger is down, so both A and nothing beyond it resolve.
    {
        let ledger = ScriptedLedger::always_err(LedgerError::Transient("gateway down".into()));
        let mut engine =
            TraversalEngine::new(config(dir.path()), ledger, chain_deriver()).unwrap();
        engine.seed_roots([id('A')]);
        let mut stop = StopHandle::new().signal();
        let summary = engine.run(&mut stop).await.unwrap();
        assert_eq!(summary.unknown, 1);
        assert_eq!(summary.discovered, 1);
    }

    // The clean completion archived the checkpoint; a re-verification pass
    // works from the archived state restored by the operator.
    std::fs::rename(
        dir.path().join("cp.json.done"),
        dir.path().join("cp.json"),
    )
    .unwrap();

    // Second run: ledger recovered. The Unknown root is re-verified and the
    // chain grows from it.
    let mut engine =
        TraversalEngine::new(config(dir.path()), chain_ledger(), chain_deriver()).unwrap();
    assert!(engine.resumed());
    assert_eq!(engine.reverify_unknown(), 1);

    let mut stop = StopHandle::new().signal();
    let summary = engine.run(&mut stop).await.unwrap();

    assert_eq!(summary.unknown, 0);
    assert_eq!(summary.on_chain, 3);
    assert_eq!(summary.off_chain, 1);
    assert_eq!(summary.max_layer, 4);
}
