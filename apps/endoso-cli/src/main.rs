//! Endoso comparison CLI
//!
//! Compares a Modelo policy document against a Verificación document.

use clap::Parser;
use clause_engine::ClauseComparator;
use endoso_cli::{compare_files, load_config, render, OutputFormat};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "endoso-cli")]
#[command(
    version,
    about = "Clause-by-clause comparison of two insurance policy documents"
)]
struct Args {
    /// Reference document (PDF or plain text)
    #[arg(long)]
    modelo: PathBuf,

    /// Document checked against the reference (PDF or plain text)
    #[arg(long)]
    verificacion: PathBuf,

    /// TOML file with noise patterns, context size and scorer
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Text similarity backend: sequence, tf_idf or embedding
    #[arg(long)]
    scorer: Option<String>,

    /// Characters captured on each side of a number
    #[arg(long)]
    context_size: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout carries the report only
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting endoso-cli v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(
        args.config.as_deref(),
        args.scorer.as_deref(),
        args.context_size,
    )?;
    let comparator = ClauseComparator::new(config)?;
    tracing::info!(
        scorer = comparator.scorer_name(),
        noise_patterns = comparator.noise_pattern_count(),
        "comparator ready"
    );

    let outcome = compare_files(&comparator, &args.modelo, &args.verificacion);

    for failure in &outcome.failures {
        eprintln!("{}", failure);
    }
    if outcome.failures.len() == 2 {
        anyhow::bail!("neither document could be processed");
    }

    println!("{}", render(&outcome, comparator.scorer_name(), args.format)?);

    Ok(())
}
