//! layermap — entry point for chain traversal runs.

mod roots;

use clap::Parser;
use layermap_derive::{Blake2Deriver, DerivationAdapter};
use layermap_engine::{EngineConfig, StopHandle, TraversalEngine};
use layermap_ledger::HttpLedgerClient;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "layermap", about = "Layered identity-chain explorer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Explore the identity chain from a set of roots, verifying each
    /// discovered identity against the ledger.
    Run(RunArgs),

    /// Derive the next identity from a seed and print it.
    Derive {
        /// Seed: exactly 55 lowercase a-z characters.
        seed: String,
    },
}

#[derive(clap::Args)]
struct RunArgs {
    /// File of root identities, one per line (`#` comments allowed).
    #[arg(long, env = "LAYERMAP_ROOTS")]
    roots: PathBuf,

    /// Base URL of the ledger RPC gateway.
    #[arg(long, env = "LAYERMAP_BASE_URL")]
    base_url: Option<String>,

    /// Hard cap on traversal depth.
    #[arg(long)]
    max_layers: Option<u32>,

    /// Hard cap on nodes processed in this run.
    #[arg(long)]
    max_nodes: Option<u64>,

    /// Save a checkpoint every this many processed nodes.
    #[arg(long)]
    checkpoint_interval: Option<u64>,

    /// Checkpoint file path. If the file exists, the run resumes from it.
    #[arg(long, env = "LAYERMAP_CHECKPOINT_PATH")]
    checkpoint_path: Option<PathBuf>,

    /// Request-per-second ceiling of the remote gateway.
    #[arg(long)]
    requests_per_second: Option<u64>,

    /// Path to a TOML configuration file. File settings are the base;
    /// CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Re-enqueue nodes recorded as unknown in the checkpoint for another
    /// verification pass.
    #[arg(long)]
    reverify_unknown: bool,
}

impl RunArgs {
    /// Resolve the effective configuration: TOML file (or defaults)
    /// overridden by whichever flags were given.
    fn resolve_config(&self) -> anyhow::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let cfg = EngineConfig::from_toml_file(path)?;
                tracing::info!("loaded config from {}", path.display());
                cfg
            }
            None => EngineConfig::default(),
        };
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(max_layers) = self.max_layers {
            config.max_layers = max_layers;
        }
        if let Some(max_nodes) = self.max_nodes {
            config.max_nodes = max_nodes;
        }
        if let Some(interval) = self.checkpoint_interval {
            config.checkpoint_interval = interval;
        }
        if let Some(path) = &self.checkpoint_path {
            config.checkpoint_path = path.clone();
        }
        if let Some(rps) = self.requests_per_second {
            config.requests_per_second = rps;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    layermap_utils::init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run(args).await,
        Command::Derive { seed } => derive_once(&seed),
    }
}

async fn run(args: RunArgs) -> anyhow::Result<()> {
    let config = args.resolve_config()?;
    let roots = roots::load_roots(&args.roots)?;

    tracing::info!(
        roots = roots.len(),
        base_url = %config.base_url,
        max_layers = config.max_layers,
        max_nodes = config.max_nodes,
        rps = config.requests_per_second,
        "starting traversal"
    );

    let ledger = HttpLedgerClient::with_url(&config.base_url)?;
    let mut engine = TraversalEngine::new(config, ledger, Blake2Deriver::new())?;
    engine.seed_roots(roots);
    if args.reverify_unknown {
        let count = engine.reverify_unknown();
        tracing::info!(count, "unknown nodes queued for re-verification");
    }

    let stopper = StopHandle::new();
    let mut stop = stopper.signal();
    tokio::spawn(async move { stopper.stop_on_signal().await });

    let summary = engine.run(&mut stop).await?;
    println!("{summary}");
    println!(
        "  elapsed:           {}",
        layermap_utils::format_duration(summary.elapsed_secs)
    );
    Ok(())
}

fn derive_once(raw_seed: &str) -> anyhow::Result<()> {
    let adapter = DerivationAdapter::new(Blake2Deriver::new());
    match adapter.derive(raw_seed) {
        Some(identity) => {
            println!("{identity}");
            Ok(())
        }
        None => anyhow::bail!(
            "seed rejected: expected exactly 55 lowercase a-z characters"
        ),
    }
}
