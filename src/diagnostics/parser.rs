// src/diagnostics/parser.rs
//! Stateful parser for the output of a single clang-tidy invocation.
//!
//! A diagnostic starts at a `path:line:col: (error|warning): ...` header and
//! owns every following line until the next header or the end of input.
//! Finished diagnostics pass through a [`DiagnosticSet`]; only the first
//! occurrence of each is kept.

use super::dedup::DiagnosticSet;
use super::record::Diagnostic;
use crate::patterns::{self, Header};
use tracing::debug;

/// What a single line of output means to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputLine<'a> {
    /// Starts a new diagnostic.
    Header(Header<'a>),
    /// Context for the diagnostic in flight, or noise before the first one.
    Other(&'a str),
}

fn classify(line: &str) -> OutputLine<'_> {
    match patterns::match_header(line) {
        Some(header) => OutputLine::Header(header),
        None => OutputLine::Other(line),
    }
}

/// Parses clang-tidy stdout into unique diagnostics.
///
/// One instance is meant to serve one worker for a whole run: call
/// [`parse`](Self::parse) with a file's output, consume
/// [`results`](Self::results), then [`reset`](Self::reset) before the next
/// file. The deduplication state survives `reset`, so a diagnostic from a
/// header included by many files is reported once per worker.
#[derive(Debug, Default)]
pub struct TidyOutputParser {
    in_flight: Option<Diagnostic>,
    dedup: DiagnosticSet,
    unique: Vec<Diagnostic>,
}

impl TidyOutputParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a complete output blob such as captured stdout.
    ///
    /// # Panics
    /// Panics if a diagnostic from a previous streaming call is still in
    /// flight; call [`finish`](Self::finish) or [`reset`](Self::reset) first.
    pub fn parse(&mut self, text: &str) {
        assert!(
            self.in_flight.is_none(),
            "Parser not in a clean state to restart parsing"
        );
        for line in text.lines() {
            self.feed_line(line);
        }
        self.finish();
    }

    /// Applies one line of output. Trailing whitespace is ignored.
    pub fn feed_line(&mut self, line: &str) {
        match classify(line.trim_end()) {
            OutputLine::Header(header) => {
                self.register_in_flight();
                self.in_flight = Some(Diagnostic::from_header(&header));
            }
            OutputLine::Other(text) => {
                if let Some(diag) = self.in_flight.as_mut() {
                    diag.add_additional_line(text);
                }
                // Nothing in flight: clang-tidy chatter before the first diagnostic.
            }
        }
    }

    /// Finalizes the diagnostic in flight, if any.
    pub fn finish(&mut self) {
        self.register_in_flight();
    }

    fn register_in_flight(&mut self) {
        let Some(diag) = self.in_flight.take() else {
            return;
        };
        if self.dedup.insert_and_query(diag.fingerprint()) {
            self.unique.push(diag);
        } else {
            debug!(
                path = diag.path(),
                line = diag.line(),
                column = diag.column(),
                "dropping duplicate diagnostic"
            );
        }
    }

    /// Clears collected diagnostics and any diagnostic in flight.
    /// The deduplication state is kept.
    pub fn reset(&mut self) {
        self.in_flight = None;
        self.unique.clear();
    }

    /// Unique diagnostics collected since the last reset, in the order they
    /// were first seen.
    #[must_use]
    pub fn results(&self) -> &[Diagnostic] {
        &self.unique
    }

    /// Whether a diagnostic is currently being accumulated.
    #[must_use]
    pub fn has_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Number of distinct diagnostics seen over the parser's lifetime.
    #[must_use]
    pub fn seen_count(&self) -> usize {
        self.dedup.len()
    }
}
