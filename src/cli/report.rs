//! Console presentation of estimates, progress and results

use indicatif::{ProgressBar, ProgressStyle};
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::Serialize;
use std::cell::Cell;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use crate::alphabet::Alphabet;
use crate::error::Result;
use crate::estimate::{format_hms, group_digits, human_readable_bytes, CapacityEstimate, CapacityVerdict};
use crate::generate::ProgressReport;
use crate::types::{GenerationConfig, GenerationResult};

const BAR_SCALE: u64 = 10_000;

/// Machine-readable estimate
#[derive(Debug, Serialize)]
pub struct EstimateReport<'a> {
    pub alphabet: String,
    pub output: String,
    #[serde(flatten)]
    pub estimate: &'a CapacityEstimate,
    pub free_bytes: Option<u64>,
}

impl<'a> EstimateReport<'a> {
    pub fn new(config: &GenerationConfig, estimate: &'a CapacityEstimate, verdict: &CapacityVerdict) -> Self {
        Self {
            alphabet: config.alphabet.to_string(),
            output: config.output.display().to_string(),
            estimate,
            free_bytes: verdict.free(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Display the pre-flight estimate
pub fn print_estimate(alphabet: &Alphabet, estimate: &CapacityEstimate) {
    println!();
    println!("📊 Estimate");
    println!("═══════════");
    println!("   Charset length: {}", alphabet.len());
    println!("   Per-length counts:");
    for (length, stats) in estimate.per_length.iter() {
        println!("     length {}: {} entries", length, group_digits(&stats.entries));
    }
    println!("   Total entries: {}", group_digits(&estimate.total_entries));
    println!(
        "   Estimated output size: {} ({} bytes)",
        estimate.human_size(),
        group_digits(&estimate.total_bytes)
    );
}

/// Display the free space verdict
pub fn print_capacity(verdict: &CapacityVerdict) {
    match verdict {
        CapacityVerdict::Sufficient { free, .. } => {
            println!("   Free disk space at target: {}", human_readable_bytes(&BigUint::from(*free)));
        }
        CapacityVerdict::Insufficient { free, .. } => {
            println!("   Free disk space at target: {}", human_readable_bytes(&BigUint::from(*free)));
            println!();
            println!("⚠️  WARNING: free space is smaller than the estimated output size.");
        }
        CapacityVerdict::Unknown { path, .. } => {
            println!("⚠️  Could not determine free disk space at '{}'.", path.display());
        }
    }
}

/// Display the write speed measurement and the runtime it implies
pub fn print_benchmark(speed: Option<f64>, total_bytes: &BigUint) {
    match speed {
        Some(speed) if speed > 0.0 => {
            println!(
                "⚡ Measured write speed: {}/s (approx.)",
                human_readable_bytes(&BigUint::from(speed as u64))
            );
            let estimated = total_bytes
                .to_f64()
                .and_then(|bytes| Duration::try_from_secs_f64(bytes / speed).ok());
            match estimated {
                Some(duration) => println!("⏱️  Estimated run time: {} (HH:MM:SS)", format_hms(duration)),
                None => println!("⏱️  Estimated run time: too large to display"),
            }
        }
        _ => println!("⚠️  Could not measure write speed. Time estimate unavailable."),
    }
}

/// Where progress lines go during a run.
///
/// With echo off and a terminal attached, lines are printed above an
/// indicatif bar; otherwise they go straight to stdout between entries.
/// Once stdout stops accepting writes (a closed pipe), console lines are
/// dropped for the rest of the run.
pub struct ProgressDisplay {
    bar: Option<ProgressBar>,
    console: Cell<bool>,
}

impl ProgressDisplay {
    pub fn new(echo: bool) -> Self {
        let bar = (!echo && io::stderr().is_terminal()).then(|| {
            let bar = ProgressBar::new(BAR_SCALE);
            if let Ok(style) = ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {percent}% {msg}",
            ) {
                bar.set_style(style.progress_chars("#>-"));
            }
            bar.enable_steady_tick(Duration::from_millis(120));
            bar
        });
        Self {
            bar,
            console: Cell::new(true),
        }
    }

    pub fn update(&self, report: &ProgressReport) {
        match &self.bar {
            Some(bar) => {
                bar.set_position((report.fraction() * BAR_SCALE as f64) as u64);
                bar.set_message(format!("ETA {}", report.eta_display()));
                bar.println(report.to_string());
            }
            None if self.console.get() => {
                if let Err(e) = writeln!(io::stdout().lock(), "{}", report) {
                    tracing::warn!(error = %e, "Console output failed; progress lines disabled");
                    self.console.set(false);
                }
            }
            None => {}
        }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

/// Display the summary of a completed run
pub fn print_summary(result: &GenerationResult) {
    let mut out = io::stdout().lock();
    let written = writeln!(
        out,
        "\n✅ Done. Wrote {} entries to {} in {:.1} seconds.",
        group_digits(&result.entries_written),
        result.output.display(),
        result.elapsed.as_secs_f64()
    );
    if let Err(e) = written {
        tracing::warn!(error = %e, "Could not print the run summary");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::estimate;
    use crate::types::LengthRange;
    use std::path::Path;

    #[test]
    fn test_estimate_report_json() {
        let config = GenerationConfig::new(
            Alphabet::new("01".chars()).unwrap(),
            LengthRange::new(1, 2).unwrap(),
            "bits.txt",
        );
        let est = estimate(2, 1, 2).unwrap();
        let verdict = CapacityVerdict::evaluate(&est.total_bytes, Some(4096), Path::new("."));

        let json = EstimateReport::new(&config, &est, &verdict).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["alphabet"], "01");
        assert_eq!(value["output"], "bits.txt");
        assert_eq!(value["total_entries"], "6");
        assert_eq!(value["total_bytes"], "16");
        assert_eq!(value["free_bytes"], 4096);
    }
}
