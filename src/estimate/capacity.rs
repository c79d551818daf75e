//! Pre-flight capacity checks against the target volume

use num_bigint::BigUint;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use sysinfo::Disks;

use crate::error::{Result, WordlistError};

/// Size of the write-speed trial
pub const BENCHMARK_BYTES: u64 = 1_000_000;

const BENCHMARK_CHUNK: usize = 64 * 1024;
const BENCHMARK_FILE: &str = ".wordlist_io_test.tmp";

/// Source of free-space information for a path
pub trait SpaceProbe {
    /// Free bytes on the volume holding `path`, or `None` if unknown
    fn free_bytes(&self, path: &Path) -> Option<u64>;
}

/// Queries the operating system's mounted disks
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSpaceProbe;

impl SpaceProbe for SystemSpaceProbe {
    fn free_bytes(&self, path: &Path) -> Option<u64> {
        let target = fs::canonicalize(path).ok()?;
        let disks = Disks::new_with_refreshed_list();

        // Deepest mount point that contains the target wins
        disks
            .list()
            .iter()
            .filter(|disk| target.starts_with(disk.mount_point()))
            .max_by_key(|disk| disk.mount_point().components().count())
            .map(|disk| disk.available_space())
    }
}

/// Outcome of comparing the estimate against free space
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapacityVerdict {
    Sufficient { required: BigUint, free: u64 },
    Insufficient { required: BigUint, free: u64 },
    Unknown { required: BigUint, path: PathBuf },
}

impl CapacityVerdict {
    /// Compare `required` bytes against what `probe` reports for `dir`
    pub fn check(probe: &dyn SpaceProbe, dir: &Path, required: &BigUint) -> Self {
        Self::evaluate(required, probe.free_bytes(dir), dir)
    }

    pub fn evaluate(required: &BigUint, free: Option<u64>, dir: &Path) -> Self {
        match free {
            Some(free) if BigUint::from(free) < *required => Self::Insufficient {
                required: required.clone(),
                free,
            },
            Some(free) => Self::Sufficient {
                required: required.clone(),
                free,
            },
            None => Self::Unknown {
                required: required.clone(),
                path: dir.to_path_buf(),
            },
        }
    }

    pub fn free(&self) -> Option<u64> {
        match self {
            Self::Sufficient { free, .. } | Self::Insufficient { free, .. } => Some(*free),
            Self::Unknown { .. } => None,
        }
    }

    /// Whether the run may start without an explicit override
    pub fn is_sufficient(&self) -> bool {
        matches!(self, Self::Sufficient { .. })
    }
}

/// Decide whether generation may start.
///
/// A sufficient verdict passes. Otherwise the run only proceeds if `force`
/// is set or `confirm` returns true; `confirm` is not consulted when
/// `force` is set.
pub fn preflight<F>(verdict: &CapacityVerdict, force: bool, confirm: F) -> Result<()>
where
    F: FnOnce(&CapacityVerdict) -> bool,
{
    if verdict.is_sufficient() {
        return Ok(());
    }

    if force || confirm(verdict) {
        tracing::warn!(?verdict, force, "Proceeding despite capacity check");
        return Ok(());
    }

    match verdict {
        CapacityVerdict::Insufficient { required, free } => {
            Err(WordlistError::insufficient_space(required, *free))
        }
        CapacityVerdict::Unknown { path, .. } => {
            Err(WordlistError::space_unknown(path.display().to_string()))
        }
        CapacityVerdict::Sufficient { .. } => Ok(()),
    }
}

/// Removes the trial file however the benchmark exits
struct TrialFile(PathBuf);

impl Drop for TrialFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

/// Measure local write throughput in bytes per second.
///
/// Writes roughly `trial_bytes` to a hidden file in `dir` and deletes it
/// afterwards. Returns `None` if the trial fails or is too fast to time.
pub fn benchmark_write_speed(dir: &Path, trial_bytes: u64) -> Option<f64> {
    let trial = TrialFile(dir.join(BENCHMARK_FILE));
    let chunk = vec![b'0'; BENCHMARK_CHUNK];

    let run = || -> std::io::Result<(u64, f64)> {
        let start = Instant::now();
        let mut file = File::create(&trial.0)?;
        let mut written = 0u64;
        while written < trial_bytes {
            file.write_all(&chunk)?;
            written += chunk.len() as u64;
        }
        file.sync_all()?;
        let size = fs::metadata(&trial.0)?.len();
        Ok((size, start.elapsed().as_secs_f64()))
    };

    match run() {
        Ok((size, elapsed)) if elapsed > 0.0 => Some(size as f64 / elapsed),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "Write speed benchmark failed");
            None
        }
    }
}
