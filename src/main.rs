use clap::Parser;
use peak_alloc::PeakAlloc;
use refgtf::{rewrite_gtf_file, RewriteOptions};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::debug;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

#[global_allocator]
static PEAK_ALLOC: PeakAlloc = PeakAlloc;

/// Update gene_id and transcript_id using reference_id and ref_gene_id when present,
/// and update strand (column 7) if it is '.' in a GTF file.
#[derive(Parser, Debug)]
#[command(name = "refgtf")]
#[command(author, version, about)]
struct Cli {
    /// Input GTF file (plain or gzipped)
    #[arg(short, long)]
    input: PathBuf,

    /// Output (updated) GTF file
    #[arg(short, long)]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    rewrite_gtf_file(&cli.input, &cli.output, RewriteOptions::default())?;
    let duration: Duration = start.elapsed();

    debug!("rewrote GTF in {:?}", duration);
    debug!(
        "Peak Memory usage was {} MB",
        PEAK_ALLOC.peak_usage_as_mb()
    );
    Ok(())
}
