//! Wordlist generation - lexicographic enumeration streamed to disk
//!
//! Lengths are walked in ascending order; within a length, entries follow
//! odometer order over the alphabet. Nothing but the current entry is held
//! in memory.

mod cancel;
mod enumerator;
mod odometer;
mod progress;

pub use cancel::CancellationToken;
pub use enumerator::{RunState, WordlistGenerator};
pub use odometer::CombinationGenerator;
pub use progress::{estimate_remaining, ProgressReport, ProgressTracker};

use crate::error::Result;
use crate::types::{GenerationConfig, GenerationResult};

/// Generate the wordlist described by `config` into its output file.
///
/// Completed and interrupted runs return `Ok`; check
/// [`GenerationResult::status`]. Failing to open or write the output is
/// returned as [`WordlistError::Io`](crate::WordlistError::Io) with the
/// number of entries written before the failure.
pub fn generate<F>(config: GenerationConfig, cancel: CancellationToken, on_progress: F) -> Result<GenerationResult>
where
    F: FnMut(&ProgressReport),
{
    WordlistGenerator::new(config)
        .with_cancellation(cancel)
        .run(on_progress)?
        .into_result()
}
