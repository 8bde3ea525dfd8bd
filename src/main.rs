use anyhow::Context;
use clap::Parser;
use page_rank::{
    crawl,
    page_rank::{
        iterated, sampled, IteratedPageRank, PageRank, PageRankResult, SampledPageRank, DAMPING,
        EPSILON, SAMPLES,
    },
    Report,
};
use rand::{rngs::SmallRng, SeedableRng};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Rank a corpus of HTML pages by sampling and by iteration",
    long_about = None
)]
struct Cli {
    /// Directory holding the `*.html` pages.
    corpus: PathBuf,

    /// Probability of following a link instead of jumping to a random page.
    #[arg(short, long, default_value_t = DAMPING, value_parser = parse_damping)]
    damping: f64,

    /// Length of the random walk.
    #[arg(short = 'n', long, default_value_t = SAMPLES, value_parser = parse_samples)]
    samples: usize,

    /// Seed of the random walk; drawn from the OS when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Per-page change under which iteration stops.
    #[arg(long, default_value_t = EPSILON, value_parser = parse_epsilon)]
    epsilon: f64,

    /// Give up iterating after this many passes.
    #[arg(long)]
    max_passes: Option<usize>,
}

fn parse_damping(s: &str) -> Result<f64, String> {
    let d: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if d > 0.0 && d < 1.0 {
        Ok(d)
    } else {
        Err(format!("damping must lie strictly between 0 and 1, got {d}"))
    }
}

fn parse_epsilon(s: &str) -> Result<f64, String> {
    let e: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if e.is_finite() && e > 0.0 {
        Ok(e)
    } else {
        Err(format!("epsilon must be a positive number, got {e}"))
    }
}

fn parse_samples(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|e| format!("{e}"))?;
    if n > 0 {
        Ok(n)
    } else {
        Err("samples must be positive".to_string())
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PAGE_RANK_LOG")
        .unwrap_or_else(|_| EnvFilter::new("page_rank=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let graph = crawl(&cli.corpus)
        .with_context(|| format!("cannot load corpus {}", cli.corpus.display()))?;

    let rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let cfg = sampled::Config {
        damping: cli.damping,
        samples: cli.samples,
    };
    let ranks = SampledPageRank::new(&graph, &cfg, rng).calc().named(&graph);
    print!("{}", Report::sampling(cli.samples, &ranks));

    let cfg = iterated::Config {
        damping: cli.damping,
        epsilon: cli.epsilon,
        max_passes: cli.max_passes,
    };
    let result = IteratedPageRank::new(&graph, &cfg).calc();
    debug!(passes = result.passes, ranks = ?result.debug(&graph), "iteration finished");
    let ranks = result.named(&graph);
    print!("{}", Report::iteration(&ranks));
    Ok(())
}
