//! Benchmark definitions and execution.

mod runner;
pub mod target;
pub mod writer;

pub use runner::{JobFailure, JobScheduler, RunReport};
pub use target::{DirTarget, Target, artifact_name};
pub use writer::write_blocks;

use std::time::Duration;

/// Floor applied to a measured write duration.
///
/// A write faster than the clock can resolve would otherwise report infinite
/// throughput and poison every average it touches.
pub const MIN_ELAPSED: Duration = Duration::from_nanos(1);

/// Parameters of one benchmark job, fixed at launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobSpec {
    /// Job id, unique within a run.
    pub id: usize,
    /// Size of each write chunk in bytes.
    pub block_size: u64,
    /// Total bytes the job writes.
    pub file_size: u64,
}

/// Throughput and latency of a single block write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Kilobytes (1000 bytes) per second.
    pub throughput_kbps: f64,
    /// Milliseconds spent inside the write call.
    pub latency_ms: f64,
}

impl Sample {
    /// Build a sample from the bytes one write call accepted and how long it took.
    pub fn from_write(bytes: usize, elapsed: Duration) -> Self {
        let secs = elapsed.max(MIN_ELAPSED).as_secs_f64();
        Self {
            throughput_kbps: bytes as f64 / 1000.0 / secs,
            latency_ms: secs * 1000.0,
        }
    }
}
