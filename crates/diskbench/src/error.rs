//! Per-job error types.
//!
//! A `JobError` is local to the job that raised it: the job contributes no
//! result, and sibling jobs keep running.

use std::io;
use thiserror::Error;

/// Why a single benchmark job produced no result.
#[derive(Debug, Error)]
pub enum JobError {
    /// The output artifact could not be created.
    #[error("failed to open file {name}: {source}")]
    Open {
        name: String,
        #[source]
        source: io::Error,
    },
    /// A block write failed partway through the file.
    #[error("failed to write data to {name}: {source}")]
    Write {
        name: String,
        #[source]
        source: io::Error,
    },
    /// The job finished without recording a single write.
    ///
    /// A validated config never produces this: `file_size > 0` and every
    /// accepted write is non-empty.
    #[error("job {0} recorded no samples")]
    NoSamples(usize),
    /// The blocking worker running the job panicked or was cancelled.
    #[error("job worker did not complete: {0}")]
    Worker(String),
}

impl JobError {
    /// Name of the artifact involved, if the failure got that far.
    pub fn artifact(&self) -> Option<&str> {
        match self {
            Self::Open { name, .. } | Self::Write { name, .. } => Some(name),
            Self::NoSamples(_) | Self::Worker(_) => None,
        }
    }
}
