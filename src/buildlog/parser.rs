// src/buildlog/parser.rs
//! Parser for complete runner logs (many clang-tidy invocations).
//!
//! The log starts with the list of enabled checks, followed by the
//! diagnostics of every invocation. A tagged warning/error opens a finding;
//! untagged notes and code hints attach to it; footer lines such as
//! `3 warnings generated.` close it.

use super::diagnostic::{CheckDiagnostic, Severity};
use super::finding::Finding;
use super::findings::Findings;
use crate::error::{Result, TidyError};
use crate::patterns::{self, CheckLine, APPLYING_FIXES_MARKER, ENABLED_CHECKS_MARKER};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogState {
    AwaitingChecksHeader,
    CollectingCheckNames,
    AwaitingFindings,
}

/// Meaning of a line once the enabled checks have been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogLine<'a> {
    /// `Applying fixes ...`: nothing parseable follows.
    End,
    /// Tagged diagnostic opening a new finding.
    Primary { diag: CheckLine<'a>, severity: Severity },
    /// Untagged diagnostic continuing the open finding.
    Note { diag: CheckLine<'a>, severity: Severity },
    /// Footer or blank line closing the open finding.
    Noise,
    /// Anything else: a code pointer for the last diagnostic.
    Hint(&'a str),
}

fn classify(line: &str) -> LogLine<'_> {
    if line.starts_with(APPLYING_FIXES_MARKER) {
        return LogLine::End;
    }
    if let Some(diag) = patterns::match_check_line(line) {
        if let Some(severity) = Severity::parse(diag.severity) {
            return match diag.check {
                Some(_) => LogLine::Primary { diag, severity },
                None => LogLine::Note { diag, severity },
            };
        }
    }
    if patterns::is_noise(line) {
        return LogLine::Noise;
    }
    LogLine::Hint(line)
}

#[derive(Debug)]
struct OpenFinding {
    check: String,
    finding: Finding,
}

/// Parses a runner log into enabled checks and a [`Findings`] registry.
#[derive(Debug)]
pub struct BuildLogParser {
    state: LogState,
    current: Option<OpenFinding>,
    enabled_checks: Vec<String>,
    findings: Findings,
}

impl Default for BuildLogParser {
    fn default() -> Self {
        Self {
            state: LogState::AwaitingChecksHeader,
            current: None,
            enabled_checks: Vec::new(),
            findings: Findings::new(),
        }
    }
}

impl BuildLogParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a whole log held in memory and finalizes it.
    pub fn parse(&mut self, text: &str) {
        for line in text.lines() {
            if !self.parse_line(line) {
                break;
            }
        }
        self.finish();
    }

    /// Streams a log line by line. Invalid UTF-8 is replaced, not rejected.
    ///
    /// # Errors
    /// Returns error if reading from `reader` fails.
    pub fn parse_reader<R: BufRead>(&mut self, mut reader: R) -> std::io::Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            if !self.parse_line(&line) {
                break;
            }
        }
        self.finish();
        Ok(())
    }

    /// Parses the log stored at `path`.
    ///
    /// # Errors
    /// Returns error if the file cannot be opened or read.
    pub fn parse_file(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path).map_err(|e| TidyError::io(e, path))?;
        self.parse_reader(BufReader::new(file))
            .map_err(|e| TidyError::io(e, path))
    }

    /// Applies one line. Returns `false` once the log signals that no more
    /// diagnostics follow.
    pub fn parse_line(&mut self, line: &str) -> bool {
        let line = line.trim_end();
        match self.state {
            LogState::AwaitingChecksHeader => {
                if line == ENABLED_CHECKS_MARKER {
                    debug!("found start of enabled checks");
                    self.state = LogState::CollectingCheckNames;
                    return true;
                }
                !line.starts_with(APPLYING_FIXES_MARKER)
            }
            LogState::CollectingCheckNames => {
                if line.is_empty() {
                    debug!(count = self.enabled_checks.len(), "read all enabled checks");
                    self.state = LogState::AwaitingFindings;
                } else {
                    self.enabled_checks.push(line.trim().to_string());
                }
                true
            }
            LogState::AwaitingFindings => self.handle_finding_line(line),
        }
    }

    fn handle_finding_line(&mut self, line: &str) -> bool {
        match classify(line) {
            LogLine::End => return false,
            LogLine::Primary { diag, severity } => {
                self.register_current();
                let check = diag.check.unwrap_or_default().to_string();
                debug!(check = %check, location = diag.location, "start new finding");
                let primary = CheckDiagnostic::new(
                    severity,
                    diag.location,
                    diag.message,
                    Some(check.clone()),
                );
                self.current = Some(OpenFinding {
                    check,
                    finding: Finding::new(primary),
                });
            }
            LogLine::Note { diag, severity } => {
                if let Some(open) = self.current.as_mut() {
                    open.finding.add_diagnostic(CheckDiagnostic::new(
                        severity,
                        diag.location,
                        diag.message,
                        None,
                    ));
                }
            }
            LogLine::Noise => self.register_current(),
            LogLine::Hint(text) => {
                if let Some(open) = self.current.as_mut() {
                    open.finding.add_code_hint(text);
                }
            }
        }
        true
    }

    fn register_current(&mut self) {
        if let Some(open) = self.current.take() {
            debug!(check = %open.check, "registering finding");
            self.findings.register(&open.check, open.finding);
        }
    }

    /// Registers a finding left open by a log that ends without a footer.
    pub fn finish(&mut self) {
        self.register_current();
    }

    #[must_use]
    pub fn enabled_checks(&self) -> &[String] {
        &self.enabled_checks
    }

    #[must_use]
    pub fn findings(&self) -> &Findings {
        &self.findings
    }

    #[must_use]
    pub fn into_findings(self) -> Findings {
        self.findings
    }
}
