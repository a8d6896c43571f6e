use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use urlbloom_core::{
    consts::{DEFAULT_BITS, DEFAULT_HASHES, DEFAULT_INPUT, DEFAULT_OUTPUT},
    process_file, theoretical_fp_rate, Bloom, FilterConfig,
};

#[derive(Parser)]
#[command(name = "urlbloom", version, about = "URL membership checks over a Bloom filter")]
struct Cli {
    /// Log every record at debug level
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Apply ADD / CONTAINS records from a file and write the results
    Run {
        #[arg(long, default_value = DEFAULT_INPUT)]
        input: PathBuf,
        #[arg(long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
        /// JSON file with `bits` and/or `hashes`
        #[arg(long)]
        config: Option<PathBuf>,
        /// Bit-vector length (overrides config)
        #[arg(long)]
        bits: Option<u64>,
        /// Number of hash functions (overrides config)
        #[arg(long)]
        hashes: Option<u32>,
    },

    /// Print the expected false-positive rate for a sizing
    Estimate {
        #[arg(long, default_value_t = DEFAULT_BITS)]
        bits: u64,
        #[arg(long, default_value_t = DEFAULT_HASHES)]
        hashes: u32,
        #[arg(long)]
        items: u64,
    },
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>, bits: Option<u64>, hashes: Option<u32>) -> Result<FilterConfig> {
    let base = match path {
        Some(p) => FilterConfig::load(p).with_context(|| format!("loading config {}", p.display()))?,
        None => FilterConfig::default(),
    };
    let cfg = base.with_overrides(bits, hashes);
    cfg.validate()?;
    Ok(cfg)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Cmd::Run { input, output, config, bits, hashes } => {
            let cfg = load_config(config.as_ref(), bits, hashes)?;
            let mut filter = Bloom::from_config(&cfg)?;
            tracing::debug!(bits = cfg.bits, hashes = cfg.hashes, "filter ready");
            let stats = process_file(&mut filter, &input, &output)?;
            println!(
                "processed {} -> {}: {} fill≈{:.6} est_fp≈{:.6}",
                input.display(),
                output.display(),
                stats,
                filter.fill_ratio(),
                filter.estimated_fp_rate()
            );
        }
        Cmd::Estimate { bits, hashes, items } => {
            FilterConfig::new(bits, hashes).validate()?;
            let p = theoretical_fp_rate(bits, hashes, items);
            println!("fp_rate≈{p:.6} (m={bits}, k={hashes}, n={items})");
        }
    }
    Ok(())
}
