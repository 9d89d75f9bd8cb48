//! Concurrent block-write throughput and latency benchmark.
//!
//! Each benchmark job creates one ephemeral file, fills it to the target size in
//! fixed-size blocks, times every block write, and reduces the timings into
//! average, best and worst throughput (KB/s) and latency (ms). Jobs run in
//! parallel behind an admission gate that caps how many hold a file open.
//!
//! # Usage
//!
//! ```text
//! diskbench [OPTIONS]
//!
//! Options:
//!   -b, --blocksize <BYTES>   Size of each write (default: 512)
//!   -f, --filesize <BYTES>    Total size of each benchmark file (default: 1024)
//!   -j, --numjobs <N>         Jobs allowed to run at once (default: 4)
//!   -n, --numtests <N>        Number of jobs to run (default: 4)
//!   -d, --dir <PATH>          Directory for benchmark files (default: .)
//!       --no-sync             Open files without O_SYNC
//!       --json <PATH>         Export results to JSON
//!   -v, --verbose             Verbose output
//!   -h, --help                Print help
//! ```

pub mod bench;
pub mod cli;
pub mod config;
pub mod error;
pub mod results;

pub use bench::{DirTarget, JobScheduler, JobSpec, RunReport, Sample, Target};
pub use cli::Cli;
pub use config::{BenchmarkConfig, ConfigError};
pub use error::JobError;
pub use results::{AggregateResult, BenchmarkPrinter, aggregate};
