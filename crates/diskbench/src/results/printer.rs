//! Console output for benchmark results.

use crate::bench::{JobFailure, RunReport};
use crate::results::AggregateResult;
use owo_colors::OwoColorize;

/// Formats and prints benchmark results.
pub struct BenchmarkPrinter {
    /// Whether color output is enabled.
    color: bool,
}

impl BenchmarkPrinter {
    /// Create a new printer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Print every result ordered by job id, then any failures.
    pub fn print_report(&self, report: &RunReport) {
        for result in report.sorted_results() {
            self.print_result(&result);
        }
        if !report.failures.is_empty() {
            let total = report.results.len() + report.failures.len();
            self.print_failures(&report.failures, total);
        }
    }

    /// Print a single job result.
    ///
    /// Example output:
    /// ```text
    /// ID: 0
    /// Throughput_avg: 1523.441 kb/s, Throughput_best: 2011.004 kb/s, Throughput_worst: 1035.878 kb/s
    /// Latency_avg: 0.364 ms, Latency_best: 0.255 ms, Latency_worst: 0.494 ms
    /// ```
    pub fn print_result(&self, result: &AggregateResult) {
        let [id, throughput, latency] = render_result(result);
        if self.color {
            println!("{}", id.bold());
            println!("{}", throughput.cyan());
            println!("{}", latency.green());
        } else {
            println!("{id}");
            println!("{throughput}");
            println!("{latency}");
        }
    }

    fn print_failures(&self, failures: &[JobFailure], total: usize) {
        let summary = format!("{} of {} jobs failed", failures.len(), total);
        if self.color {
            println!("{}", summary.red().bold());
        } else {
            println!("{summary}");
        }
        for failure in failures {
            println!("  ID {}: {}", failure.job_id, failure.error);
        }
    }
}

/// The three output lines for one result, values to three decimals.
pub fn render_result(result: &AggregateResult) -> [String; 3] {
    [
        format!("ID: {}", result.job_id),
        format!(
            "Throughput_avg: {:.3} kb/s, Throughput_best: {:.3} kb/s, Throughput_worst: {:.3} kb/s",
            result.throughput_avg, result.throughput_best, result.throughput_worst
        ),
        format!(
            "Latency_avg: {:.3} ms, Latency_best: {:.3} ms, Latency_worst: {:.3} ms",
            result.latency_avg, result.latency_best, result.latency_worst
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(job_id: usize) -> AggregateResult {
        AggregateResult {
            job_id,
            throughput_avg: 1523.44149,
            latency_avg: 0.36419,
            throughput_best: 2011.0039,
            latency_best: 0.2551,
            throughput_worst: 1035.8777,
            latency_worst: 0.4937,
        }
    }

    #[test]
    fn test_render_result_three_decimals() {
        let [id, throughput, latency] = render_result(&make_result(0));
        assert_eq!(id, "ID: 0");
        assert_eq!(
            throughput,
            "Throughput_avg: 1523.441 kb/s, Throughput_best: 2011.004 kb/s, \
             Throughput_worst: 1035.878 kb/s"
        );
        assert_eq!(
            latency,
            "Latency_avg: 0.364 ms, Latency_best: 0.255 ms, Latency_worst: 0.494 ms"
        );
    }

    #[test]
    fn test_print_report_no_panic() {
        let report = RunReport {
            results: vec![make_result(1), make_result(0)],
            failures: vec![JobFailure { job_id: 2, error: "device error".to_string() }],
        };
        BenchmarkPrinter::new(false).print_report(&report);
        BenchmarkPrinter::new(true).print_report(&report);
    }
}
