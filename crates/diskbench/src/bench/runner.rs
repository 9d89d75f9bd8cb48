//! Benchmark execution runner.

use crate::bench::{JobSpec, Sample, Target, artifact_name, writer};
use crate::config::{BenchmarkConfig, ConfigError};
use crate::error::JobError;
use crate::results::{AggregateResult, aggregate};
use indicatif::ProgressBar;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// A job that produced no result, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobFailure {
    pub job_id: usize,
    pub error: String,
}

/// Everything a finished run produced.
///
/// `results` is in completion order and may hold fewer entries than jobs were
/// run; every missing job has an entry in `failures`.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub results: Vec<AggregateResult>,
    pub failures: Vec<JobFailure>,
}

impl RunReport {
    /// Results ordered by job id.
    pub fn sorted_results(&self) -> Vec<AggregateResult> {
        let mut results = self.results.clone();
        results.sort_by_key(|r| r.job_id);
        results
    }
}

/// Outcome sent from a job task to the collector.
type JobOutcome = (usize, Result<AggregateResult, JobError>);

/// Runs `num_tests` benchmark jobs with at most `num_jobs` executing at once.
///
/// All jobs are launched immediately and wait on an admission gate holding
/// `num_jobs` permits. A job keeps its permit while its artifact is open,
/// written, closed, and removed; aggregation happens after the permit is
/// released. Failed jobs are logged and reported, never retried, and never
/// stop their siblings.
pub struct JobScheduler<T: Target> {
    config: BenchmarkConfig,
    target: Arc<T>,
    run_token: u32,
    progress: ProgressBar,
}

impl<T: Target> JobScheduler<T> {
    /// Create a scheduler, rejecting an invalid configuration before any job exists.
    pub fn new(config: BenchmarkConfig, target: T) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            target: Arc::new(target),
            run_token: rand::random(),
            progress: ProgressBar::hidden(),
        })
    }

    /// Advance `progress` once per finished job.
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// The jobs this scheduler runs, in launch order.
    pub fn jobs(&self) -> impl Iterator<Item = JobSpec> + '_ {
        (0..self.config.num_tests).map(|id| JobSpec {
            id,
            block_size: self.config.block_size,
            file_size: self.config.file_size,
        })
    }

    /// Run every job and wait for all of them to finish.
    pub async fn run(&self) -> RunReport {
        info!(
            block_size = self.config.block_size,
            file_size = self.config.file_size,
            num_jobs = self.config.num_jobs,
            num_tests = self.config.num_tests,
            chunks_per_job = self.config.chunks_per_job(),
            "Starting benchmark run"
        );

        // No more than num_tests permits can ever be held at once.
        let slots = self.config.num_jobs.min(self.config.num_tests).min(Semaphore::MAX_PERMITS);
        let gate = Arc::new(Semaphore::new(slots));
        // Sized to the job count so no job ever waits on the collector.
        let capacity = self.config.num_tests.min(Semaphore::MAX_PERMITS);
        let (tx, mut rx) = mpsc::channel::<JobOutcome>(capacity);
        let mut tasks = JoinSet::new();

        for spec in self.jobs() {
            let gate = Arc::clone(&gate);
            let target = Arc::clone(&self.target);
            let tx = tx.clone();
            let run_token = self.run_token;

            tasks.spawn(async move {
                let outcome = run_job(spec, target, gate, run_token).await;
                // The receiver outlives every task.
                let _ = tx.send((spec.id, outcome)).await;
            });
        }
        drop(tx);

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "Benchmark task aborted");
            }
            self.progress.inc(1);
        }

        let mut report = RunReport::default();
        while let Some((job_id, outcome)) = rx.recv().await {
            match outcome {
                Ok(result) => report.results.push(result),
                Err(error) => {
                    warn!(
                        job_id,
                        artifact = error.artifact().unwrap_or("-"),
                        error = %error,
                        "Benchmark job failed"
                    );
                    report.failures.push(JobFailure {
                        job_id,
                        error: error.to_string(),
                    });
                }
            }
        }

        info!(
            completed = report.results.len(),
            failed = report.failures.len(),
            "Benchmark run finished"
        );
        report
    }
}

/// Wait for admission, run the job on the blocking pool, then aggregate.
async fn run_job<T: Target>(
    spec: JobSpec,
    target: Arc<T>,
    gate: Arc<Semaphore>,
    run_token: u32,
) -> Result<AggregateResult, JobError> {
    let permit = gate
        .acquire_owned()
        .await
        .map_err(|e| JobError::Worker(e.to_string()))?;

    let samples = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        execute_job(&spec, target.as_ref(), run_token)
    })
    .await
    .map_err(|e| JobError::Worker(e.to_string()))??;

    aggregate(spec.id, &samples).ok_or(JobError::NoSamples(spec.id))
}

/// Create, write, close and remove one artifact.
///
/// Removal is attempted whether or not the write succeeded; a removal failure
/// is logged and does not change the outcome.
fn execute_job<T: Target>(
    spec: &JobSpec,
    target: &T,
    run_token: u32,
) -> Result<Vec<Sample>, JobError> {
    let name = artifact_name(spec.id, chrono::Utc::now().timestamp(), run_token);

    let mut handle = target.open(&name).map_err(|source| JobError::Open {
        name: name.clone(),
        source,
    })?;
    debug!(job_id = spec.id, artifact = %name, "Job started");

    let written = writer::write_blocks(&mut handle, spec.file_size, spec.block_size);
    drop(handle);

    if let Err(e) = target.remove(&name) {
        warn!(
            job_id = spec.id,
            artifact = %name,
            error = %e,
            "Failed to remove benchmark file"
        );
    }

    let samples = written.map_err(|source| JobError::Write { name, source })?;
    debug!(job_id = spec.id, samples = samples.len(), "Job finished");
    Ok(samples)
}
