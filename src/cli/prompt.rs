//! Interactive front end - beautiful prompts that re-ask until input is valid

use inquire::{Confirm, CustomType, Select, Text};

use super::args::Cli;
use crate::alphabet::{Alphabet, AlphabetSource};
use crate::error::{Result, WordlistError};
use crate::types::{normalize_output_name, GenerationConfig, LengthRange, DEFAULT_OUTPUT};

const ALL: &str = "all";
const SPECIFIC: &str = "specific";
const FIXED: &str = "fixed";
const RANGE: &str = "range";

/// Collect a full generation config from the terminal.
///
/// Flag values act as defaults where a prompt has one.
pub fn prompt_config(defaults: &Cli) -> Result<GenerationConfig> {
    let alphabet = prompt_alphabet(defaults)?;
    println!("🔤 Using characters: {}", alphabet.display_list());

    let lengths = prompt_lengths()?;

    let output = Text::new("Output filename:")
        .with_default(if defaults.output.is_empty() {
            DEFAULT_OUTPUT
        } else {
            defaults.output.as_str()
        })
        .prompt()?;

    let echo = Confirm::new("Print each entry to the terminal as well?")
        .with_default(defaults.echo)
        .with_help_message("This can flood the terminal for large lists")
        .prompt()?;

    let config = GenerationConfig::new(alphabet, lengths, normalize_output_name(&output))
        .with_progress_interval(defaults.progress_interval)
        .with_echo(echo);
    config.validate()?;
    Ok(config)
}

fn prompt_alphabet(defaults: &Cli) -> Result<Alphabet> {
    let charset = defaults.charset;
    let choice = Select::new(
        &format!("Include all {} characters or specific ones?", charset),
        vec![ALL, SPECIFIC],
    )
    .prompt()?;

    if choice == ALL {
        return AlphabetSource::Preset(charset).resolve();
    }

    loop {
        let input = Text::new("Enter the characters to include (e.g. 135 or 1,3,5):").prompt()?;
        match Alphabet::subset(charset, &input) {
            Ok(alphabet) => return Ok(alphabet),
            Err(e) => println!("{}", e.user_message()),
        }
    }
}

fn prompt_lengths() -> Result<LengthRange> {
    let mode = Select::new("Length mode:", vec![FIXED, RANGE]).prompt()?;

    loop {
        let attempt = if mode == FIXED {
            let length = CustomType::<usize>::new("Enter fixed length (e.g. 5):")
                .with_error_message("Please type a whole number")
                .prompt()?;
            LengthRange::fixed(length)
        } else {
            let min = CustomType::<usize>::new("Enter min length (>= 1):")
                .with_error_message("Please type a whole number")
                .prompt()?;
            let max = CustomType::<usize>::new("Enter max length (>= min):")
                .with_error_message("Please type a whole number")
                .prompt()?;
            LengthRange::new(min, max)
        };

        match attempt {
            Ok(lengths) => return Ok(lengths),
            Err(WordlistError::Validation { message }) => println!("❌ {}", message),
            Err(e) => return Err(e),
        }
    }
}

/// Yes/no question defaulting to no; a failed prompt counts as no
pub fn confirm(message: &str) -> bool {
    Confirm::new(message).with_default(false).prompt().unwrap_or(false)
}
