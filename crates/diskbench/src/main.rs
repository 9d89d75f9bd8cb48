//! diskbench - concurrent block-write throughput and latency benchmark.

// Use mimalloc for reduced allocation latency (enabled by default).
// Disable with `--no-default-features` if debugging allocator issues.
#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use diskbench::{
    BenchmarkConfig, BenchmarkPrinter, DirTarget, JobScheduler,
    cli::Cli,
    results::{export_json, job_progress},
};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Set up logging with indicatif integration
    // Respect RUST_LOG if set, otherwise use default based on verbose flag
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("warn")
        }
    });

    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(indicatif_layer.get_stderr_writer()),
        )
        .with(indicatif_layer)
        .with(filter)
        .init();

    // Extract JSON output path before consuming cli
    let json_output = cli.json.clone();

    // Invalid values stop the run here, before any file exists
    let config = cli.into_config().context("Invalid benchmark configuration")?;

    print_banner(&config);

    let target = DirTarget::new(config.dir.clone(), config.sync);
    if !target.dir().is_dir() {
        tracing::warn!(
            "Benchmark directory {} does not exist; every job will fail to open its file",
            target.dir().display()
        );
    }

    let progress = job_progress(config.num_tests, config.color);
    let scheduler = JobScheduler::new(config.clone(), target)
        .context("Invalid benchmark configuration")?
        .with_progress(progress.clone());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let report = runtime.block_on(scheduler.run());
    progress.finish_and_clear();

    BenchmarkPrinter::new(config.color).print_report(&report);

    // Export JSON if requested
    if let Some(path) = json_output {
        export_json(&report, &config, &path).context("Failed to export JSON")?;
        println!("Results exported to: {}", path.display());
    }

    Ok(())
}

/// Print a one-line banner with the run parameters.
fn print_banner(config: &BenchmarkConfig) {
    use owo_colors::OwoColorize;

    let line = format!(
        "blocksize: {}, filesize: {}, numjobs: {} numtests: {}",
        config.block_size, config.file_size, config.num_jobs, config.num_tests
    );
    if config.color {
        println!("{}", line.cyan().bold());
    } else {
        println!("{line}");
    }
}
