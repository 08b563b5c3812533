use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use recovery_core::params::DEFAULT_MAX_COMBINATIONS;
use recovery_core::{ConsensusReconstructor, ReconstructionResult, ShareSet};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

/// Recover secrets from JSON share documents by majority vote over every
/// k-subset of shares.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Share documents, each processed independently.
    #[arg(default_values = ["testcase1.json", "testcase2.json"])]
    files: Vec<PathBuf>,

    /// Refuse documents whose C(n, k) exceeds this.
    #[arg(long, env = "RECOVER_MAX_COMBINATIONS", default_value_t = DEFAULT_MAX_COMBINATIONS)]
    max_combinations: u64,

    /// Tally on the calling thread only.
    #[arg(long)]
    sequential: bool,

    /// Fail instead of tie-breaking when no candidate has a strict majority.
    #[arg(long)]
    strict: bool,
}

fn recover_file(cli: &Cli, path: &Path) -> anyhow::Result<ReconstructionResult> {
    let set = ShareSet::from_path(path)
        .with_context(|| format!("failed to decode {}", path.display()))?;
    for rejected in &set.rejected {
        warn!(file = %path.display(), key = %rejected.key, reason = %rejected.reason, "share skipped");
    }

    let params = set
        .params()
        .with_max_combinations(cli.max_combinations)
        .with_parallel(!cli.sequential)
        .with_decisive_majority(cli.strict);
    ConsensusReconstructor::new(params)
        .reconstruct(&set.shares)
        .with_context(|| format!("failed to reconstruct {}", path.display()))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut failed = false;

    for path in &cli.files {
        match recover_file(&cli, path) {
            Ok(result) => {
                println!("Secret from {}: {}", path.display(), result.secret);
                if !result.false_secrets.is_empty() {
                    let rendered: Vec<String> = result
                        .false_secrets
                        .iter()
                        .map(ToString::to_string)
                        .collect();
                    println!(
                        "False secrets from {}: {}",
                        path.display(),
                        rendered.join(", ")
                    );
                }
                if !result.suspect_indices.is_empty() {
                    warn!(file = %path.display(), suspects = ?result.suspect_indices, "shares disagree with the majority");
                }
            }
            Err(err) => {
                error!("{err:#}");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
