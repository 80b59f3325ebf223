mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use flvmerge_media::MergeEngine;
use std::fs::File;
use std::io::{BufReader, BufWriter};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let sink = BufWriter::new(
        File::create(&cli.output)
            .with_context(|| format!("can't write to file '{}'", cli.output.display()))?,
    );
    let mut engine = MergeEngine::new(sink);

    for input in &cli.inputs {
        let source = BufReader::new(
            File::open(input)
                .with_context(|| format!("can't open file '{}'", input.display()))?,
        );
        let summary = engine
            .append(source)
            .with_context(|| format!("failed to merge '{}'", input.display()))?;
        tracing::debug!(
            tags = summary.tags_written,
            duration_secs = summary.duration_secs,
            "source appended"
        );
        println!(
            "merged '{}' into '{}'",
            input.display(),
            cli.output.display()
        );
    }

    let summary = engine
        .finish()
        .with_context(|| format!("failed to finalize '{}'", cli.output.display()))?;
    tracing::info!(
        sources = summary.sources,
        duration_secs = summary.total_duration_secs,
        bytes = summary.bytes_written,
        "merge complete"
    );
    Ok(())
}
