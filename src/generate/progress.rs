//! Progress accumulation and ETA extrapolation for a single run

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use std::time::{Duration, Instant};

use crate::estimate::{format_hms, group_digits};

/// Snapshot emitted at each progress checkpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    pub written: u64,
    pub total: BigUint,
    pub elapsed: Duration,
    /// `None` while throughput cannot be measured yet
    pub eta: Option<Duration>,
}

impl ProgressReport {
    /// Fraction of the run completed, in `0.0..=1.0`
    pub fn fraction(&self) -> f64 {
        match self.total.to_f64() {
            Some(total) if total > 0.0 => (self.written as f64 / total).min(1.0),
            _ => 1.0,
        }
    }

    pub fn eta_display(&self) -> String {
        self.eta.map_or_else(|| "unknown".to_string(), format_hms)
    }
}

impl std::fmt::Display for ProgressReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[Progress] written {}/{} entries. Elapsed: {:.1}s. ETA: {}",
            group_digits(&self.written),
            group_digits(&self.total),
            self.elapsed.as_secs_f64(),
            self.eta_display()
        )
    }
}

/// Remaining time at the throughput observed so far
pub fn estimate_remaining(written: u64, total: &BigUint, elapsed: Duration) -> Option<Duration> {
    let elapsed = elapsed.as_secs_f64();
    if written == 0 || elapsed <= 0.0 {
        return None;
    }

    let done = BigUint::from(written);
    let remaining = if done >= *total {
        BigUint::zero()
    } else {
        total - &done
    };

    let rate = written as f64 / elapsed;
    Duration::try_from_secs_f64(remaining.to_f64()? / rate).ok()
}

/// Running counter owned by one generation run
pub struct ProgressTracker {
    total: BigUint,
    interval: u64,
    written: u64,
    last_reported: u64,
    start: Instant,
}

impl ProgressTracker {
    pub fn new(total: BigUint, interval: u64) -> Self {
        Self {
            total,
            interval: interval.max(1),
            written: 0,
            last_reported: 0,
            start: Instant::now(),
        }
    }

    /// Count one written entry; true when a checkpoint is due
    pub fn record(&mut self) -> bool {
        self.written += 1;
        self.written % self.interval == 0
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Build a report for the current count and mark it reported
    pub fn report(&mut self) -> ProgressReport {
        let elapsed = self.start.elapsed();
        self.last_reported = self.written;
        ProgressReport {
            written: self.written,
            total: self.total.clone(),
            elapsed,
            eta: estimate_remaining(self.written, &self.total, elapsed),
        }
    }

    /// Closing report, unless the last checkpoint already covered it
    pub fn finish(&mut self) -> Option<ProgressReport> {
        (self.written != self.last_reported).then(|| self.report())
    }
}
