//! Main wordlist-forge workflow

use crate::error::{Result, WordlistError};
use crate::estimate::{
    benchmark_write_speed, estimate_range, preflight, CapacityVerdict, SpaceProbe, BENCHMARK_BYTES,
};
use crate::generate::{CancellationToken, WordlistGenerator};
use crate::types::GenerationStatus;

use super::args::Cli;
use super::prompt;
use super::report::{self, EstimateReport, ProgressDisplay};

/// Configure, estimate, check capacity, then generate
pub fn run(cli: &Cli, probe: &dyn SpaceProbe, cancel: CancellationToken) -> Result<()> {
    let interactive = cli.is_interactive();

    let config = if interactive {
        println!("🔥 Wordlist Forge - exhaustive wordlist generator");
        println!("═════════════════════════════════════════════════");
        prompt::prompt_config(cli)?
    } else {
        cli.generation_config()?
    };

    let estimate = estimate_range(config.alphabet.len(), config.lengths);
    let output_dir = config.output_dir();
    let verdict = CapacityVerdict::check(probe, &output_dir, &estimate.total_bytes);

    if cli.json {
        println!("{}", EstimateReport::new(&config, &estimate, &verdict).to_json()?);
    } else {
        report::print_estimate(&config.alphabet, &estimate);
        report::print_capacity(&verdict);
    }

    if cli.dry_run || cli.json {
        return Ok(());
    }

    preflight(&verdict, cli.force, |verdict| {
        interactive
            && match verdict {
                CapacityVerdict::Insufficient { .. } => {
                    prompt::confirm("Force and continue despite low disk space?")
                }
                _ => prompt::confirm("Continue without knowing the free space?"),
            }
    })?;

    if !cli.no_benchmark {
        println!();
        println!("🧪 Benchmarking local write speed (small test) ...");
        let speed = benchmark_write_speed(&output_dir, BENCHMARK_BYTES);
        report::print_benchmark(speed, &estimate.total_bytes);
    }

    println!();
    println!("📁 Output file: {}", config.output.display());
    if config.echo {
        println!("❗ Every entry will also be printed to the terminal.");
    }
    if interactive && !cli.yes && !prompt::confirm("Start now?") {
        return Err(WordlistError::aborted("start declined"));
    }

    println!();
    println!("🚀 Starting generation");
    let display = ProgressDisplay::new(config.echo);
    let mut generator = WordlistGenerator::new(config).with_cancellation(cancel);
    let result = generator.run(|progress| display.update(progress))?;
    display.finish();

    if result.is_completed() {
        report::print_summary(&result);
        return Ok(());
    }
    if result.status == GenerationStatus::Interrupted {
        return Err(WordlistError::interrupted(result.entries_written));
    }
    result.into_result().map(|_| ())
}
