//! Core types and structures for wordlist-forge

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::alphabet::Alphabet;
use crate::error::Result;
use crate::validation_error;

/// Default number of entries between progress reports
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10_000;

/// Default output file name
pub const DEFAULT_OUTPUT: &str = "wordlist.txt";

/// Extension appended to output names that lack it
pub const OUTPUT_EXTENSION: &str = ".txt";

/// Inclusive range of entry lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthRange {
    min: usize,
    max: usize,
}

impl LengthRange {
    /// Create a validated range; `min` must be at least 1 and not above `max`
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min < 1 {
            return Err(validation_error!("min length must be at least 1, got {}", min));
        }
        if max < min {
            return Err(validation_error!(
                "max length {} is smaller than min length {}",
                max,
                min
            ));
        }
        Ok(Self { min, max })
    }

    /// Fixed-length mode
    pub fn fixed(length: usize) -> Result<Self> {
        Self::new(length, length)
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn is_fixed(&self) -> bool {
        self.min == self.max
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<usize> {
        self.min..=self.max
    }
}

impl std::fmt::Display for LengthRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_fixed() {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}..={}", self.min, self.max)
        }
    }
}

/// Append the conventional extension if `name` lacks it; empty means default
pub fn normalize_output_name(name: &str) -> PathBuf {
    let name = name.trim();
    if name.is_empty() {
        return PathBuf::from(DEFAULT_OUTPUT);
    }
    if name.ends_with(OUTPUT_EXTENSION) {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{}{}", name, OUTPUT_EXTENSION))
    }
}

/// Configuration for one generation run
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub alphabet: Alphabet,
    pub lengths: LengthRange,
    pub output: PathBuf,
    pub progress_interval: u64,
    /// Echo each entry to the console as it is written
    pub echo: bool,
}

impl GenerationConfig {
    /// Create a config with the default progress interval and no echo
    pub fn new(alphabet: Alphabet, lengths: LengthRange, output: impl Into<PathBuf>) -> Self {
        Self {
            alphabet,
            lengths,
            output: output.into(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            echo: false,
        }
    }

    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Check invariants that the typed fields cannot enforce on their own
    pub fn validate(&self) -> Result<()> {
        if self.alphabet.is_empty() {
            return Err(validation_error!("alphabet cannot be empty"));
        }
        if self.progress_interval < 1 {
            return Err(validation_error!("progress interval must be at least 1"));
        }
        if self.output.as_os_str().is_empty() {
            return Err(validation_error!("output path cannot be empty"));
        }
        Ok(())
    }

    /// Directory the output file will live in
    pub fn output_dir(&self) -> PathBuf {
        match self.output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        }
    }
}

/// Terminal status of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Completed,
    Interrupted,
    Failed { reason: String },
}

impl std::fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationStatus::Completed => write!(f, "completed"),
            GenerationStatus::Interrupted => write!(f, "interrupted"),
            GenerationStatus::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}

/// Outcome of one generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub entries_written: u64,
    pub elapsed: Duration,
    pub status: GenerationStatus,
    pub output: PathBuf,
    pub started_at: DateTime<Utc>,
}

impl GenerationResult {
    pub fn is_completed(&self) -> bool {
        self.status == GenerationStatus::Completed
    }

    /// Turn a failed run into an IO error carrying the written count
    pub fn into_result(self) -> Result<Self> {
        match &self.status {
            GenerationStatus::Failed { reason } => Err(crate::WordlistError::io(
                reason.clone(),
                Some(self.output.display().to_string()),
                self.entries_written,
            )),
            _ => Ok(self),
        }
    }
}
