//! Output artifacts that benchmark jobs write into.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Prefix shared by every artifact a run creates.
pub const ARTIFACT_PREFIX: &str = "bench_write_";

/// Where benchmark jobs create, write, and remove their artifacts.
///
/// Each job opens exactly one artifact under a name unique to the run, writes
/// it sequentially, drops the handle, then removes it.
pub trait Target: Send + Sync + 'static {
    /// Writable handle to an open artifact.
    type Handle: Write + Send + 'static;

    /// Create the artifact `name` and open it for writing.
    fn open(&self, name: &str) -> io::Result<Self::Handle>;

    /// Delete the artifact `name`.
    fn remove(&self, name: &str) -> io::Result<()>;
}

impl<T: Target> Target for Arc<T> {
    type Handle = T::Handle;

    fn open(&self, name: &str) -> io::Result<Self::Handle> {
        (**self).open(name)
    }

    fn remove(&self, name: &str) -> io::Result<()> {
        (**self).remove(name)
    }
}

/// Artifacts as regular files in a directory.
#[derive(Debug, Clone)]
pub struct DirTarget {
    dir: PathBuf,
    sync: bool,
}

impl DirTarget {
    /// Create a target writing into `dir`.
    ///
    /// With `sync` set, files are opened O_SYNC (Unix) so every timed write
    /// includes getting the data to the device.
    pub fn new(dir: impl Into<PathBuf>, sync: bool) -> Self {
        Self { dir: dir.into(), sync }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of artifact `name`.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl Target for DirTarget {
    type Handle = File;

    fn open(&self, name: &str) -> io::Result<File> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o644);
            if self.sync {
                options.custom_flags(libc::O_SYNC);
            }
        }

        options.open(self.path(name))
    }

    fn remove(&self, name: &str) -> io::Result<()> {
        fs::remove_file(self.path(name))
    }
}

/// Name of the artifact for `job_id`.
///
/// `timestamp` is the creation time in Unix seconds. `run_token` is drawn once
/// per run, keeping two runs started in the same second apart.
pub fn artifact_name(job_id: usize, timestamp: i64, run_token: u32) -> String {
    format!("{ARTIFACT_PREFIX}{job_id}_{timestamp}_{run_token:08x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_artifact_name_format() {
        assert_eq!(artifact_name(3, 1_700_000_000, 0xbeef), "bench_write_3_1700000000_0000beef");
    }

    #[test]
    fn test_artifact_names_distinct() {
        let a = artifact_name(1, 100, 7);
        let b = artifact_name(11, 100, 7);
        let c = artifact_name(1, 100, 8);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_dir_target_open_write_remove() {
        let temp_dir = TempDir::new().unwrap();
        for sync in [true, false] {
            let target = DirTarget::new(temp_dir.path(), sync);
            let name = artifact_name(0, 0, u32::from(sync));

            let mut file = target.open(&name).unwrap();
            file.write_all(&[0u8; 128]).unwrap();
            drop(file);
            assert_eq!(fs::metadata(target.path(&name)).unwrap().len(), 128);

            target.remove(&name).unwrap();
            assert!(!target.path(&name).exists());
        }
    }

    #[test]
    fn test_dir_target_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let target = DirTarget::new(temp_dir.path().join("missing"), true);
        assert!(target.open("bench_write_0").is_err());
        assert!(target.remove("bench_write_0").is_err());
    }
}
