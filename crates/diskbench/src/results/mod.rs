//! Results processing and output.
//!
//! - `aggregate` reduces one job's samples into an `AggregateResult`
//! - `BenchmarkPrinter` renders results for the console
//! - `export_json` writes a machine-readable report

pub mod live;
pub mod printer;
pub mod stats;

pub use live::job_progress;
pub use printer::BenchmarkPrinter;
pub use stats::aggregate;

use crate::bench::{JobFailure, RunReport};
use crate::config::BenchmarkConfig;
use serde::Serialize;
use std::path::Path;

/// Aggregate statistics for one successfully completed job.
///
/// Throughput is in KB/s (1000 bytes), latency in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateResult {
    pub job_id: usize,
    pub throughput_avg: f64,
    pub latency_avg: f64,
    pub throughput_best: f64,
    pub latency_best: f64,
    pub throughput_worst: f64,
    pub latency_worst: f64,
}

/// JSON-serializable benchmark report
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport<'a> {
    pub metadata: ReportMetadata,
    pub results: Vec<AggregateResult>,
    pub failures: &'a [JobFailure],
}

/// Report metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub timestamp: String,
    pub platform: String,
    pub diskbench_version: String,
    pub block_size: u64,
    pub file_size: u64,
    pub num_jobs: usize,
    pub num_tests: usize,
    pub sync: bool,
}

/// Export results to JSON file
pub fn export_json(
    report: &RunReport,
    config: &BenchmarkConfig,
    path: &Path,
) -> anyhow::Result<()> {
    let json = render_json(report, config)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Render the report as pretty-printed JSON, results ordered by job id.
pub fn render_json(report: &RunReport, config: &BenchmarkConfig) -> serde_json::Result<String> {
    let report = BenchmarkReport {
        metadata: ReportMetadata {
            timestamp: chrono::Utc::now().to_rfc3339(),
            platform: format!("{} {}", std::env::consts::OS, std::env::consts::ARCH),
            diskbench_version: env!("CARGO_PKG_VERSION").to_string(),
            block_size: config.block_size,
            file_size: config.file_size,
            num_jobs: config.num_jobs,
            num_tests: config.num_tests,
            sync: config.sync,
        },
        results: report.sorted_results(),
        failures: &report.failures,
    };

    serde_json::to_string_pretty(&report)
}
