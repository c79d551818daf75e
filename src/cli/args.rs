//! Command line flags and environment

use clap::Parser;

use crate::alphabet::{AlphabetSource, Charset};
use crate::error::{Result, WordlistError};
use crate::types::{
    normalize_output_name, GenerationConfig, LengthRange, DEFAULT_OUTPUT,
    DEFAULT_PROGRESS_INTERVAL,
};

/// Wordlist Forge - exhaustive character-combination wordlist generator.
#[derive(Parser, Debug, Clone)]
#[command(name = "wordlist-forge", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Character set entries are built from.
    #[arg(long, value_enum, default_value_t = Charset::Digits, env = "WORDLIST_CHARSET")]
    pub charset: Charset,

    /// Use only these characters of the set (e.g. "135" or "1,3,5").
    #[arg(long, env = "WORDLIST_ONLY")]
    pub only: Option<String>,

    /// Fixed entry length.
    #[arg(short, long, conflicts_with_all = ["min", "max"])]
    pub length: Option<usize>,

    /// Minimum entry length (range mode).
    #[arg(long, requires = "max")]
    pub min: Option<usize>,

    /// Maximum entry length (range mode).
    #[arg(long, requires = "min")]
    pub max: Option<usize>,

    /// Output file; ".txt" is appended when missing.
    #[arg(short, long, default_value = DEFAULT_OUTPUT, env = "WORDLIST_OUTPUT")]
    pub output: String,

    /// Entries between progress reports.
    #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL, env = "WORDLIST_PROGRESS_INTERVAL")]
    pub progress_interval: u64,

    /// Print every entry to the terminal as it is written.
    #[arg(long)]
    pub echo: bool,

    /// Continue even if free disk space is too low or unknown.
    #[arg(long)]
    pub force: bool,

    /// Show the estimate and exit without writing.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the estimate as JSON and exit without writing (implies --dry-run).
    #[arg(long)]
    pub json: bool,

    /// Skip the write speed benchmark.
    #[arg(long)]
    pub no_benchmark: bool,

    /// Do not ask for confirmation before starting.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Ask for every setting interactively.
    #[arg(short, long)]
    pub interactive: bool,

    /// Verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Prompts are used when asked for or when no length was given
    pub fn is_interactive(&self) -> bool {
        self.interactive || (self.length.is_none() && self.min.is_none())
    }

    pub fn alphabet_source(&self) -> AlphabetSource {
        match &self.only {
            Some(input) => AlphabetSource::Subset {
                charset: self.charset,
                input: input.clone(),
            },
            None => AlphabetSource::Preset(self.charset),
        }
    }

    pub fn length_range(&self) -> Result<LengthRange> {
        match (self.length, self.min, self.max) {
            (Some(length), _, _) => LengthRange::fixed(length),
            (None, Some(min), Some(max)) => LengthRange::new(min, max),
            _ => Err(WordlistError::cli("give --length, or both --min and --max")),
        }
    }

    /// Build a validated config from flags alone
    pub fn generation_config(&self) -> Result<GenerationConfig> {
        let alphabet = self.alphabet_source().resolve()?;
        let lengths = self.length_range()?;
        let config = GenerationConfig::new(alphabet, lengths, normalize_output_name(&self.output))
            .with_progress_interval(self.progress_interval)
            .with_echo(self.echo);
        config.validate()?;
        Ok(config)
    }
}
