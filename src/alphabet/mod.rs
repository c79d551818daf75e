//! Alphabets - the ordered symbol sets wordlist entries are built from

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::Result;
use crate::validation_error;

const DIGITS: &str = "0123456789";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Built-in character set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Charset {
    /// Decimal digits (0-9)
    Digits,
    /// Lowercase letters (a-z)
    Lower,
    /// Uppercase letters (A-Z)
    Upper,
    /// Lower then upper case letters
    Letters,
    /// Letters then digits
    Alnum,
    /// Letters, digits and ASCII punctuation
    Printable,
}

impl Default for Charset {
    fn default() -> Self {
        Self::Digits
    }
}

impl std::fmt::Display for Charset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Charset::Digits => write!(f, "digits"),
            Charset::Lower => write!(f, "lower"),
            Charset::Upper => write!(f, "upper"),
            Charset::Letters => write!(f, "letters"),
            Charset::Alnum => write!(f, "alnum"),
            Charset::Printable => write!(f, "printable"),
        }
    }
}

impl Charset {
    /// Symbols of this set in enumeration order
    pub fn chars(&self) -> Vec<char> {
        let parts: &[&str] = match self {
            Charset::Digits => &[DIGITS],
            Charset::Lower => &[LOWERCASE],
            Charset::Upper => &[UPPERCASE],
            Charset::Letters => &[LOWERCASE, UPPERCASE],
            Charset::Alnum => &[LOWERCASE, UPPERCASE, DIGITS],
            Charset::Printable => &[LOWERCASE, UPPERCASE, DIGITS, PUNCTUATION],
        };
        parts.iter().flat_map(|p| p.chars()).collect()
    }

    pub fn contains(&self, c: char) -> bool {
        match self {
            Charset::Digits => c.is_ascii_digit(),
            Charset::Lower => c.is_ascii_lowercase(),
            Charset::Upper => c.is_ascii_uppercase(),
            Charset::Letters => c.is_ascii_alphabetic(),
            Charset::Alnum => c.is_ascii_alphanumeric(),
            Charset::Printable => c.is_ascii_graphic(),
        }
    }
}

/// Where the alphabet comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlphabetSource {
    /// The whole preset
    Preset(Charset),
    /// A user-chosen subset of a preset, as typed
    Subset { charset: Charset, input: String },
}

impl AlphabetSource {
    /// Resolve the source into a validated alphabet
    pub fn resolve(&self) -> Result<Alphabet> {
        match self {
            AlphabetSource::Preset(charset) => Alphabet::new(charset.chars()),
            AlphabetSource::Subset { charset, input } => Alphabet::subset(*charset, input),
        }
    }
}

/// Ordered set of unique symbols
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Build an alphabet, collapsing duplicates to their first occurrence.
    ///
    /// Fails if nothing is left or a symbol is a control character, since
    /// control characters (newlines in particular) would break the
    /// one-entry-per-line output.
    pub fn new(symbols: impl IntoIterator<Item = char>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for c in symbols {
            if c.is_control() {
                return Err(validation_error!(
                    "alphabet contains control character {:?}",
                    c
                ));
            }
            if seen.insert(c) {
                unique.push(c);
            }
        }

        if unique.is_empty() {
            return Err(validation_error!("alphabet cannot be empty"));
        }

        Ok(Self { symbols: unique })
    }

    /// Build an alphabet from a typed subset of `charset`.
    ///
    /// Commas separate symbols (`1,3,5`) unless the charset itself contains
    /// a comma. Surrounding whitespace is ignored.
    pub fn subset(charset: Charset, input: &str) -> Result<Self> {
        let comma_is_symbol = charset.contains(',');
        let picked: Vec<char> = input
            .trim()
            .chars()
            .filter(|c| comma_is_symbol || *c != ',')
            .collect();

        if let Some(bad) = picked.iter().find(|c| !charset.contains(**c)) {
            return Err(validation_error!(
                "'{}' is not part of the {} character set",
                bad,
                charset
            ));
        }

        Self::new(picked)
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols joined with commas, for display
    pub fn display_list(&self) -> String {
        self.symbols
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in &self.symbols {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
