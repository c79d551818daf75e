//! Capacity estimation - entry counts and output sizes without enumerating
//!
//! Counts grow as `alphabet^length`, which passes `u64::MAX` for realistic
//! inputs (94 printable characters at length 10 is about 5.4e19), so every
//! count and size here is a `BigUint`.

mod capacity;

pub use capacity::{
    benchmark_write_speed, preflight, CapacityVerdict, SpaceProbe, SystemSpaceProbe,
    BENCHMARK_BYTES,
};

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::Result;
use crate::types::LengthRange;
use crate::validation_error;

fn serialize_decimal<S: Serializer>(value: &BigUint, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_str_radix(10))
}

/// Count and byte contribution of a single length
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LengthStats {
    #[serde(serialize_with = "serialize_decimal")]
    pub entries: BigUint,
    #[serde(serialize_with = "serialize_decimal")]
    pub bytes: BigUint,
}

/// Per-length breakdown of a length range
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LengthBreakdown {
    by_length: BTreeMap<usize, LengthStats>,
}

impl LengthBreakdown {
    pub fn get(&self, length: usize) -> Option<&LengthStats> {
        self.by_length.get(&length)
    }

    /// Lengths in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &LengthStats)> {
        self.by_length.iter().map(|(l, s)| (*l, s))
    }

    pub fn len(&self) -> usize {
        self.by_length.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_length.is_empty()
    }
}

/// Pre-flight estimate for a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapacityEstimate {
    pub alphabet_size: usize,
    pub lengths: LengthRange,
    #[serde(serialize_with = "serialize_decimal")]
    pub total_entries: BigUint,
    #[serde(serialize_with = "serialize_decimal")]
    pub total_bytes: BigUint,
    pub per_length: LengthBreakdown,
}

impl CapacityEstimate {
    /// Human readable total size
    pub fn human_size(&self) -> String {
        human_readable_bytes(&self.total_bytes)
    }

    /// Complete entries held in the first `bytes` bytes of the output,
    /// with the offset just past the last of them.
    ///
    /// Entries of one length all take `length + 1` bytes, so the split
    /// follows from the per-length sizes alone.
    pub fn complete_entries_within(&self, bytes: u64) -> (u64, u64) {
        let mut remaining = bytes;
        let mut entries = 0_u64;

        for (length, stats) in self.per_length.iter() {
            let line = length as u64 + 1;
            match stats.bytes.to_u64() {
                Some(block) if block <= remaining => {
                    entries += block / line;
                    remaining -= block;
                }
                _ => {
                    entries += remaining / line;
                    remaining %= line;
                    break;
                }
            }
        }

        (entries, bytes - remaining)
    }
}

/// Estimate entries and bytes for every length in `min..=max`.
///
/// Each entry of length `L` takes `L + 1` bytes: the symbols plus one
/// newline. Pure; performs no I/O.
pub fn estimate(alphabet_size: usize, min_length: usize, max_length: usize) -> Result<CapacityEstimate> {
    if alphabet_size < 1 {
        return Err(validation_error!("alphabet size must be at least 1"));
    }
    let lengths = LengthRange::new(min_length, max_length)?;
    Ok(estimate_range(alphabet_size, lengths))
}

/// Same as [`estimate`] for an already validated range
pub fn estimate_range(alphabet_size: usize, lengths: LengthRange) -> CapacityEstimate {
    let base = BigUint::from(alphabet_size);
    let mut by_length = BTreeMap::new();
    let mut total_entries = BigUint::zero();
    let mut total_bytes = BigUint::zero();

    for length in lengths.iter() {
        let entries = num_traits::pow(base.clone(), length);
        let bytes = &entries * BigUint::from(length + 1);
        total_entries += &entries;
        total_bytes += &bytes;
        by_length.insert(length, LengthStats { entries, bytes });
    }

    CapacityEstimate {
        alphabet_size,
        lengths,
        total_entries,
        total_bytes,
        per_length: LengthBreakdown { by_length },
    }
}

/// Format a byte count with binary units and two decimals (`1.50 KB`)
pub fn human_readable_bytes(bytes: &BigUint) -> String {
    let mut n = bytes.to_f64().unwrap_or(f64::INFINITY);
    for unit in ["B", "KB", "MB", "GB", "TB"] {
        if n < 1024.0 {
            return format!("{:.2} {}", n, unit);
        }
        n /= 1024.0;
    }
    format!("{:.2} PB", n)
}

/// Format a duration as `HH:MM:SS`; hours are not wrapped at 24
pub fn format_hms(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Insert thousands separators into a decimal number
pub fn group_digits(value: &impl std::fmt::Display) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
