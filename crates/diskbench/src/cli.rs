//! Command-line interface for the benchmark harness.

use crate::config::{
    BenchmarkConfig, ConfigError, DEFAULT_BLOCK_SIZE, DEFAULT_FILE_SIZE, DEFAULT_NUM_JOBS,
    DEFAULT_NUM_TESTS,
};
use clap::Parser;
use std::path::PathBuf;

/// Concurrent block-write throughput and latency benchmark.
///
/// Runs NUMTESTS jobs, at most NUMJOBS at a time. Each job writes one file of
/// FILESIZE bytes in BLOCKSIZE writes, timing every write, then deletes it.
#[derive(Parser, Debug)]
#[command(name = "diskbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Block size in bytes.
    #[arg(
        short = 'b',
        long = "blocksize",
        visible_alias = "block-size",
        default_value_t = DEFAULT_BLOCK_SIZE
    )]
    pub block_size: u64,

    /// File size in bytes.
    #[arg(
        short = 'f',
        long = "filesize",
        visible_alias = "file-size",
        default_value_t = DEFAULT_FILE_SIZE
    )]
    pub file_size: u64,

    /// The number of jobs to run in parallel.
    #[arg(
        short = 'j',
        long = "numjobs",
        visible_alias = "jobs",
        default_value_t = DEFAULT_NUM_JOBS
    )]
    pub num_jobs: usize,

    /// The number of times to run the test.
    #[arg(
        short = 'n',
        long = "numtests",
        visible_alias = "tests",
        default_value_t = DEFAULT_NUM_TESTS
    )]
    pub num_tests: usize,

    /// Directory for the benchmark files.
    ///
    /// Files are named bench_write_<id>_<timestamp>_<token> and removed when
    /// each job ends.
    #[arg(short = 'd', long, env = "DISKBENCH_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Open benchmark files without O_SYNC.
    ///
    /// Writes then land in the page cache and mostly measure memory bandwidth.
    #[arg(long)]
    pub no_sync: bool,

    /// Export results to JSON file.
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, conflicts_with = "color")]
    pub no_color: bool,

    /// Force colored output (even when not a TTY).
    #[arg(long, conflicts_with = "no_color")]
    pub color: bool,

    /// Verbose output.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Build and validate the run configuration.
    pub fn into_config(self) -> Result<BenchmarkConfig, ConfigError> {
        let color = if self.color {
            true
        } else {
            !self.no_color && supports_color()
        };

        let config = BenchmarkConfig {
            block_size: self.block_size,
            file_size: self.file_size,
            num_jobs: self.num_jobs,
            num_tests: self.num_tests,
            dir: self.dir,
            sync: !self.no_sync,
            color,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Check if the terminal supports colors.
fn supports_color() -> bool {
    // Check NO_COLOR environment variable (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check FORCE_COLOR environment variable (common convention)
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Check if stdout is a TTY
    #[cfg(unix)]
    {
        use std::os::unix::io::AsRawFd;
        unsafe { libc::isatty(std::io::stdout().as_raw_fd()) != 0 }
    }

    #[cfg(not(unix))]
    {
        true
    }
}
