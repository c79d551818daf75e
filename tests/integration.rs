//! Integration tests for wordlist-forge

use num_bigint::BigUint;
use std::collections::HashSet;
use std::fs;

use wordlist_forge::{
    estimate, generate, Alphabet, AlphabetSource, CancellationToken, Charset, GenerationConfig,
    GenerationStatus, LengthRange, RunState, WordlistError, WordlistGenerator,
};

fn read_lines(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_estimate_matches_brute_force() {
    for size in 1..=4usize {
        for min in 1..=3usize {
            for max in min..=3usize {
                let est = estimate(size, min, max).unwrap();
                let symbols: Vec<char> = "abcd".chars().take(size).collect();
                let counted: usize = (min..=max)
                    .map(|len| wordlist_forge::generate::CombinationGenerator::new(&symbols, len).count())
                    .sum();
                assert_eq!(est.total_entries, BigUint::from(counted));
            }
        }
    }
}

#[test]
fn test_round_trip_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.txt");
    let alphabet = Alphabet::new("xyz".chars()).unwrap();
    let config = GenerationConfig::new(alphabet.clone(), LengthRange::new(1, 3).unwrap(), &path);

    let result = generate(config, CancellationToken::new(), |_| {}).unwrap();
    assert_eq!(result.status, GenerationStatus::Completed);

    let est = estimate(3, 1, 3).unwrap();
    let lines = read_lines(&path);
    assert_eq!(BigUint::from(lines.len()), est.total_entries);
    assert_eq!(BigUint::from(fs::metadata(&path).unwrap().len()), est.total_bytes);
    assert_eq!(result.entries_written as usize, lines.len());

    for line in &lines {
        assert!((1..=3).contains(&line.chars().count()));
        assert!(line.chars().all(|c| alphabet.symbols().contains(&c)));
    }
    let unique: HashSet<&String> = lines.iter().collect();
    assert_eq!(unique.len(), lines.len());
}

#[test]
fn test_binary_example_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bits.txt");
    let config = GenerationConfig::new(
        Alphabet::new("01".chars()).unwrap(),
        LengthRange::new(1, 2).unwrap(),
        &path,
    );
    generate(config, CancellationToken::new(), |_| {}).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "0\n1\n00\n01\n10\n11\n");
    assert_eq!(fs::metadata(&path).unwrap().len(), 16);
}

#[test]
fn test_interrupt_keeps_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.txt");
    let config = GenerationConfig::new(
        Alphabet::new("0123456789".chars()).unwrap(),
        LengthRange::fixed(4).unwrap(),
        &path,
    )
    .with_progress_interval(1234);

    let token = CancellationToken::new();
    let trigger = token.clone();
    let result = generate(config, token, |_| trigger.cancel()).unwrap();

    assert_eq!(result.status, GenerationStatus::Interrupted);
    assert_eq!(result.entries_written, 1234);

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.ends_with('\n'));
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1234);
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(*line, format!("{:04}", i));
    }
}

#[test]
fn test_progress_is_monotonic_and_bounded() {
    let dir = tempfile::tempdir().unwrap();
    let config = GenerationConfig::new(
        Alphabet::new("abcd".chars()).unwrap(),
        LengthRange::new(1, 4).unwrap(),
        dir.path().join("p.txt"),
    )
    .with_progress_interval(17);

    let mut seen = Vec::new();
    generate(config, CancellationToken::new(), |r| {
        seen.push((r.written, r.total.clone()))
    })
    .unwrap();

    let total = BigUint::from(4u32 + 16 + 64 + 256);
    assert!(seen.windows(2).all(|w| w[0].0 <= w[1].0));
    assert!(seen.iter().all(|(w, t)| BigUint::from(*w) <= *t && *t == total));
    assert_eq!(seen.last().map(|(w, _)| *w), Some(340));
}

#[test]
fn test_unwritable_output_is_io_failure() {
    let dir = tempfile::tempdir().unwrap();
    let config = GenerationConfig::new(
        Alphabet::new("ab".chars()).unwrap(),
        LengthRange::fixed(2).unwrap(),
        dir.path().join("no-such-dir").join("out.txt"),
    );

    let err = generate(config, CancellationToken::new(), |_| {}).unwrap_err();
    assert!(matches!(err, WordlistError::Io { written: 0, .. }));
    assert_eq!(err.exit_code(), 74);
}

#[cfg(target_os = "linux")]
#[test]
fn test_full_device_reports_nothing_written() {
    let device = std::path::Path::new("/dev/full");
    if !device.exists() {
        return;
    }
    let config = GenerationConfig::new(
        Alphabet::new("0123456789".chars()).unwrap(),
        LengthRange::fixed(2).unwrap(),
        device,
    );

    let err = generate(config, CancellationToken::new(), |_| {}).unwrap_err();
    assert!(matches!(err, WordlistError::Io { written: 0, .. }), "{:?}", err);
}

#[test]
fn test_generator_state_machine() {
    let dir = tempfile::tempdir().unwrap();
    let config = GenerationConfig::new(
        Alphabet::new("ab".chars()).unwrap(),
        LengthRange::fixed(1).unwrap(),
        dir.path().join("s.txt"),
    );
    let mut generator = WordlistGenerator::new(config);
    assert_eq!(generator.state(), RunState::NotStarted);
    generator.run(|_| {}).unwrap();
    assert_eq!(generator.state(), RunState::Completed);
}

#[test]
fn test_subset_collapses_duplicates() {
    let source = AlphabetSource::Subset {
        charset: Charset::Digits,
        input: "113355".to_string(),
    };
    assert_eq!(source.resolve().unwrap().symbols(), &['1', '3', '5']);
}

#[test]
fn test_zero_min_length_rejected() {
    assert!(matches!(estimate(10, 0, 2), Err(WordlistError::Validation { .. })));
    assert!(matches!(LengthRange::new(0, 2), Err(WordlistError::Validation { .. })));
}

#[test]
fn test_library_initialization() {
    assert!(wordlist_forge::init().is_ok());
}
