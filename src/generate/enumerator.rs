//! Streaming enumerator - writes every combination of a length range to a sink

use chrono::Utc;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Duration;

use super::cancel::CancellationToken;
use super::odometer::CombinationGenerator;
use super::progress::{ProgressReport, ProgressTracker};
use crate::error::{Result, WordlistError};
use crate::estimate::estimate_range;
use crate::types::{GenerationConfig, GenerationResult, GenerationStatus};

/// Lifecycle of a generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    Completed,
    Interrupted,
    Failed,
}

/// Sinks that can be cut back to a byte offset
trait Truncate {
    fn truncate(&mut self, len: u64) -> io::Result<()>;
}

impl Truncate for File {
    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

/// Writer that counts the bytes its inner writer accepted
struct CountingWriter<W> {
    inner: W,
    accepted: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, accepted: 0 }
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.accepted += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Generator that streams a wordlist to disk
pub struct WordlistGenerator {
    config: GenerationConfig,
    cancel: CancellationToken,
    state: RunState,
}

impl WordlistGenerator {
    /// Create a new generator; the config is frozen from here on
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            cancel: CancellationToken::new(),
            state: RunState::NotStarted,
        }
    }

    /// Use an externally controlled cancellation token
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Create the output file and stream every entry into it.
    ///
    /// Validation problems are returned as errors before anything is
    /// touched on disk, and a run cancelled before it starts leaves any
    /// existing output alone. Open and write failures end the run in the
    /// failed state and are reported through the returned result. After a
    /// write failure the file is cut back to the last complete entry.
    pub fn run<F>(&mut self, on_progress: F) -> Result<GenerationResult>
    where
        F: FnMut(&ProgressReport),
    {
        self.config.validate()?;
        self.ensure_not_started()?;

        if self.cancel.is_cancelled() {
            tracing::warn!(output = %self.config.output.display(), "Cancelled before the output file was opened");
            self.state = RunState::Interrupted;
            return Ok(self.unstarted(GenerationStatus::Interrupted));
        }

        let mut file = match File::create(&self.config.output) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(output = %self.config.output.display(), error = %e, "Failed to open output file");
                self.state = RunState::Failed;
                return Ok(self.unstarted(GenerationStatus::Failed {
                    reason: e.to_string(),
                }));
            }
        };

        self.run_into(&mut file, on_progress)
    }

    /// Stream every entry into `sink`, optionally echoing each one to `echo`.
    ///
    /// The sink is buffered and flushed on every exit path. After a write
    /// failure `entries_written` counts only the complete entries the sink
    /// accepted. A failed echo write turns echoing off for the rest of the
    /// run without affecting the sink.
    pub fn run_with<W, F>(
        &mut self,
        sink: W,
        echo: Option<&mut dyn Write>,
        on_progress: F,
    ) -> Result<GenerationResult>
    where
        W: Write,
        F: FnMut(&ProgressReport),
    {
        self.stream(sink, echo, on_progress).map(|(result, _)| result)
    }

    fn run_into<S, F>(&mut self, sink: &mut S, on_progress: F) -> Result<GenerationResult>
    where
        S: Write + Truncate,
        F: FnMut(&ProgressReport),
    {
        let (result, committed) = if self.config.echo {
            let stdout = io::stdout();
            let mut console = stdout.lock();
            self.stream(&mut *sink, Some(&mut console), on_progress)?
        } else {
            self.stream(&mut *sink, None, on_progress)?
        };

        if matches!(result.status, GenerationStatus::Failed { .. }) {
            if let Err(e) = sink.truncate(committed) {
                tracing::warn!(committed, error = %e, "Could not cut the output back to the last complete entry");
            }
        }

        Ok(result)
    }

    /// Returns the result and the byte offset just past the last complete
    /// entry the sink accepted.
    fn stream<W, F>(
        &mut self,
        sink: W,
        mut echo: Option<&mut dyn Write>,
        mut on_progress: F,
    ) -> Result<(GenerationResult, u64)>
    where
        W: Write,
        F: FnMut(&ProgressReport),
    {
        self.config.validate()?;
        self.ensure_not_started()?;

        let started_at = Utc::now();
        let lengths = self.config.lengths;
        let symbols = self.config.alphabet.symbols();
        let estimate = estimate_range(symbols.len(), lengths);

        tracing::info!(
            alphabet_size = symbols.len(),
            min_length = lengths.min(),
            max_length = lengths.max(),
            total = %estimate.total_entries,
            output = %self.config.output.display(),
            "Starting wordlist generation"
        );

        self.state = RunState::Running;
        let mut sink = BufWriter::new(CountingWriter::new(sink));
        let mut tracker = ProgressTracker::new(estimate.total_entries.clone(), self.config.progress_interval);
        let mut line = String::with_capacity(lengths.max() + 1);
        let mut failure: Option<io::Error> = None;
        let mut interrupted = false;

        'lengths: for length in lengths.iter() {
            tracing::debug!(length, "Enumerating length");
            let mut combos = CombinationGenerator::new(symbols, length);

            loop {
                if self.cancel.is_cancelled() {
                    interrupted = true;
                    break 'lengths;
                }
                if !combos.write_next(&mut line) {
                    break;
                }
                line.push('\n');

                if let Err(e) = sink.write_all(line.as_bytes()) {
                    failure = Some(e);
                    break 'lengths;
                }

                if let Some(console) = echo.as_mut() {
                    if let Err(e) = console.write_all(line.as_bytes()) {
                        tracing::warn!(error = %e, "Console echo failed; continuing without echo");
                        echo = None;
                    }
                }

                if tracker.record() {
                    on_progress(&tracker.report());
                }
            }
        }

        if let Err(e) = sink.flush() {
            failure.get_or_insert(e);
        }
        if let Some(console) = echo.as_mut() {
            let _ = console.flush();
        }

        // Whatever is still buffered after a failure is dropped, not retried.
        let (counter, _unwritten) = sink.into_parts();
        let accepted = counter.accepted;

        let (status, entries_written, committed) = match failure {
            Some(e) => {
                let (entries, committed) = estimate.complete_entries_within(accepted);
                tracing::warn!(
                    handed_over = tracker.written(),
                    written = entries,
                    accepted_bytes = accepted,
                    error = %e,
                    "Write failed"
                );
                self.state = RunState::Failed;
                let status = GenerationStatus::Failed {
                    reason: e.to_string(),
                };
                (status, entries, committed)
            }
            None if interrupted => {
                tracing::warn!(written = tracker.written(), "Generation interrupted");
                self.state = RunState::Interrupted;
                (GenerationStatus::Interrupted, tracker.written(), accepted)
            }
            None => {
                if let Some(report) = tracker.finish() {
                    on_progress(&report);
                }
                self.state = RunState::Completed;
                (GenerationStatus::Completed, tracker.written(), accepted)
            }
        };

        let result = GenerationResult {
            entries_written,
            elapsed: tracker.elapsed(),
            status,
            output: self.config.output.clone(),
            started_at,
        };

        tracing::info!(
            written = result.entries_written,
            elapsed_secs = result.elapsed.as_secs_f64(),
            status = %result.status,
            "Generation finished"
        );

        Ok((result, committed))
    }

    fn unstarted(&self, status: GenerationStatus) -> GenerationResult {
        GenerationResult {
            entries_written: 0,
            elapsed: Duration::ZERO,
            status,
            output: self.config.output.clone(),
            started_at: Utc::now(),
        }
    }

    fn ensure_not_started(&self) -> Result<()> {
        if self.state == RunState::NotStarted {
            Ok(())
        } else {
            Err(WordlistError::internal("a generator can only run once"))
        }
    }
}
