//! Configuration types for the benchmark harness.

use std::path::PathBuf;
use thiserror::Error;

/// Default size of each write, in bytes.
pub const DEFAULT_BLOCK_SIZE: u64 = 512;
/// Default size of each benchmark file, in bytes.
pub const DEFAULT_FILE_SIZE: u64 = 1024;
/// Default number of jobs allowed to run at once.
pub const DEFAULT_NUM_JOBS: usize = 4;
/// Default number of jobs per run.
pub const DEFAULT_NUM_TESTS: usize = 4;

/// A configuration value that rejects the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("blocksize must be greater than 0")]
    BlockSize,
    #[error("filesize must be greater than 0")]
    FileSize,
    #[error("numjobs must be at least 1")]
    NumJobs,
    #[error("numtests must be at least 1")]
    NumTests,
}

/// Configuration for a benchmark run.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Size of each write chunk in bytes.
    pub block_size: u64,
    /// Total size of each benchmark file in bytes.
    pub file_size: u64,
    /// Maximum number of jobs executing at once.
    pub num_jobs: usize,
    /// Total number of jobs to run.
    pub num_tests: usize,
    /// Directory that holds the ephemeral benchmark files.
    pub dir: PathBuf,
    /// Open benchmark files with O_SYNC so each write reaches the device.
    pub sync: bool,
    /// Enable colored output.
    pub color: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            file_size: DEFAULT_FILE_SIZE,
            num_jobs: DEFAULT_NUM_JOBS,
            num_tests: DEFAULT_NUM_TESTS,
            dir: PathBuf::from("."),
            sync: true,
            color: false,
        }
    }
}

impl BenchmarkConfig {
    /// Check every constraint, reporting the first one violated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_size == 0 {
            return Err(ConfigError::BlockSize);
        }
        if self.file_size == 0 {
            return Err(ConfigError::FileSize);
        }
        if self.num_jobs < 1 {
            return Err(ConfigError::NumJobs);
        }
        if self.num_tests < 1 {
            return Err(ConfigError::NumTests);
        }
        Ok(())
    }

    /// Number of block writes each job performs.
    pub fn chunks_per_job(&self) -> u64 {
        self.file_size.div_ceil(self.block_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.block_size, 512);
        assert_eq!(config.file_size, 1024);
        assert_eq!(config.num_jobs, 4);
        assert_eq!(config.num_tests, 4);
        assert!(config.sync);
    }

    #[test]
    fn test_validate_rejects_each_zero() {
        let base = BenchmarkConfig::default();

        let config = BenchmarkConfig { block_size: 0, ..base.clone() };
        assert_eq!(config.validate(), Err(ConfigError::BlockSize));

        let config = BenchmarkConfig { file_size: 0, ..base.clone() };
        assert_eq!(config.validate(), Err(ConfigError::FileSize));

        let config = BenchmarkConfig { num_jobs: 0, ..base.clone() };
        assert_eq!(config.validate(), Err(ConfigError::NumJobs));

        let config = BenchmarkConfig { num_tests: 0, ..base };
        assert_eq!(config.validate(), Err(ConfigError::NumTests));
    }

    #[test]
    fn test_validate_reports_block_size_first() {
        let config = BenchmarkConfig {
            block_size: 0,
            file_size: 0,
            num_jobs: 0,
            num_tests: 0,
            ..BenchmarkConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::BlockSize));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ConfigError::FileSize.to_string(), "filesize must be greater than 0");
        assert_eq!(ConfigError::NumTests.to_string(), "numtests must be at least 1");
    }

    #[test]
    fn test_chunks_per_job() {
        let config = BenchmarkConfig {
            block_size: 512,
            file_size: 1024,
            ..BenchmarkConfig::default()
        };
        assert_eq!(config.chunks_per_job(), 2);

        let config = BenchmarkConfig {
            block_size: 1000,
            file_size: 1024,
            ..BenchmarkConfig::default()
        };
        assert_eq!(config.chunks_per_job(), 2);

        let config = BenchmarkConfig {
            block_size: 4096,
            file_size: 1024,
            ..BenchmarkConfig::default()
        };
        assert_eq!(config.chunks_per_job(), 1);
    }
}
