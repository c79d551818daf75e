//! Wordlist Forge - exhaustive character-combination wordlist generation
//!
//! Enumerates every string over an alphabet for a range of lengths, streams
//! them to a file one per line, and estimates counts, sizes and disk space
//! before anything is written.

pub mod alphabet;
pub mod cli;
pub mod error;
pub mod estimate;
pub mod generate;
pub mod types;

// Re-export commonly used types
pub use alphabet::{Alphabet, AlphabetSource, Charset};
pub use error::{Result, WordlistError};
pub use estimate::{estimate, CapacityEstimate, CapacityVerdict, LengthBreakdown};
pub use generate::{generate, CancellationToken, ProgressReport, RunState, WordlistGenerator};
pub use types::{GenerationConfig, GenerationResult, GenerationStatus, LengthRange};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
