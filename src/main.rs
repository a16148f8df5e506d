use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use svgalign::{AlignConfig, MalformedPolicy, MergeStrategy};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "svgalign", about = "Snap shared borders of adjacent SVG path outlines")]
struct Cli {
    /// Input SVG document
    input: PathBuf,

    /// Output SVG path
    #[arg(short, long, default_value = "output.svg")]
    output: PathBuf,

    /// Cross-path vertices closer than this (user units) are merged
    #[arg(short, long, default_value = "0.3")]
    threshold: f64,

    /// Decimal digits kept in rewritten path data
    #[arg(short, long, default_value = "2")]
    precision: usize,

    /// Neighbours fetched per vertex lookup (at least 2)
    #[arg(short = 'k', long, default_value = "2")]
    neighbors: usize,

    /// How near-coincident vertices are grouped
    #[arg(long, value_enum, default_value_t = Strategy::Pairwise)]
    strategy: Strategy,

    /// Fail on the first malformed path instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Re-serialize every path, not only the ones that moved
    #[arg(long)]
    rewrite_all: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Strategy {
    /// Nearest cross-path neighbour, one merge per vertex
    Pairwise,
    /// Collapse every near-coincident group to its mean
    Cluster,
}

impl From<Strategy> for MergeStrategy {
    fn from(s: Strategy) -> Self {
        match s {
            Strategy::Pairwise => MergeStrategy::Pairwise,
            Strategy::Cluster => MergeStrategy::Cluster,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = AlignConfig {
        threshold: cli.threshold,
        neighbors: cli.neighbors,
        strategy: cli.strategy.into(),
        on_malformed: if cli.strict {
            MalformedPolicy::Abort
        } else {
            MalformedPolicy::Skip
        },
        precision: cli.precision,
        rewrite_all: cli.rewrite_all,
    };

    eprintln!();
    eprintln!("  svgalign \u{00b7} {}", cli.input.display());
    eprintln!();

    let report = svgalign::align_file(&cli.input, &cli.output, &config)
        .with_context(|| format!("aligning {}", cli.input.display()))?;

    eprintln!("  Result      {report}");
    eprintln!();
    eprintln!("  \u{2713} {}", cli.output.display());
    eprintln!();

    Ok(())
}
