//! Fixed-length combination generator in odometer order

/// Generator for all strings of one length over an alphabet.
///
/// Order is counting in base `symbols.len()` with the alphabet as digits:
/// the rightmost position advances fastest.
pub struct CombinationGenerator<'a> {
    symbols: &'a [char],
    length: usize,
    indices: Vec<usize>,
    exhausted: bool,
}

impl<'a> CombinationGenerator<'a> {
    /// Create a new generator for entries of given length
    pub fn new(symbols: &'a [char], length: usize) -> Self {
        Self {
            symbols,
            length,
            indices: vec![0; length],
            exhausted: symbols.is_empty(),
        }
    }

    /// Write the next entry into `buf`, replacing its contents.
    ///
    /// Returns false once every combination has been produced.
    pub fn write_next(&mut self, buf: &mut String) -> bool {
        if self.exhausted {
            return false;
        }

        buf.clear();
        buf.extend(self.indices.iter().map(|&i| self.symbols[i]));
        self.advance();
        true
    }

    fn advance(&mut self) {
        for slot in self.indices.iter_mut().rev() {
            *slot += 1;
            if *slot < self.symbols.len() {
                return;
            }
            *slot = 0;
        }
        self.exhausted = true;
    }
}

impl Iterator for CombinationGenerator<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let mut entry = String::with_capacity(self.length);
        self.write_next(&mut entry).then_some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const AB: &[char] = &['a', 'b'];

    #[test]
    fn test_odometer_order() {
        let entries: Vec<String> = CombinationGenerator::new(AB, 2).collect();
        assert_eq!(entries, vec!["aa", "ab", "ba", "bb"]);
    }

    #[test]
    fn test_no_duplicates_and_exact_count() {
        let digits: Vec<char> = "0123456789".chars().collect();
        let entries: Vec<String> = CombinationGenerator::new(&digits, 3).collect();
        assert_eq!(entries.len(), 1000);
        let unique: HashSet<&String> = entries.iter().collect();
        assert_eq!(unique.len(), 1000);
        assert_eq!(entries.first().map(String::as_str), Some("000"));
        assert_eq!(entries.last().map(String::as_str), Some("999"));
    }

    #[test]
    fn test_single_symbol() {
        let entries: Vec<String> = CombinationGenerator::new(&['7'], 3).collect();
        assert_eq!(entries, vec!["777"]);
    }

    #[test]
    fn test_write_next_reuses_buffer() {
        let mut gen = CombinationGenerator::new(AB, 1);
        let mut buf = String::from("stale");
        assert!(gen.write_next(&mut buf));
        assert_eq!(buf, "a");
        assert!(gen.write_next(&mut buf));
        assert_eq!(buf, "b");
        assert!(!gen.write_next(&mut buf));
        assert!(!gen.write_next(&mut buf));
    }
}
