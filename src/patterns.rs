// src/patterns.rs
//! Line grammars for clang-tidy output.
//!
//! Both parsers classify a line exactly once against these expressions and
//! then dispatch on the result.

use regex::Regex;
use std::sync::LazyLock;

/// `path:line:col: (error|warning): message` as printed by one clang-tidy run.
pub const HEADER_PATTERN: &str = r"^(.+):(\d+):(\d+): (error|warning): (.*)$";

/// `location: (error|warning|note): message [check-name,...]` in a build log.
pub const CHECK_DIAGNOSTIC_PATTERN: &str =
    r"^(.+): (error|warning|note): ([^\[]+) ?(\[([^,]+).*\])?$";

/// Footer lines clang-tidy and the runner print between diagnostics.
pub const NOISE_PATTERN: &str = r"^(Suppressed|Use -header-filter|clang-apply|\d+ warnings|$)";

/// Marks the start of the enabled checks list in a build log.
pub const ENABLED_CHECKS_MARKER: &str = "Enabled checks:";

/// Printed by the runner once all analysis output has been written.
pub const APPLYING_FIXES_MARKER: &str = "Applying fixes ...";

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HEADER_PATTERN).unwrap_or_else(|_| panic!("Invalid Regex")));
static CHECK_DIAGNOSTIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(CHECK_DIAGNOSTIC_PATTERN).unwrap_or_else(|_| panic!("Invalid Regex"))
});
static NOISE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NOISE_PATTERN).unwrap_or_else(|_| panic!("Invalid Regex")));

/// Captures of a single-invocation diagnostic header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    pub path: &'a str,
    pub line: u32,
    pub column: u32,
    pub severity: &'a str,
    pub message: &'a str,
}

/// Captures of a build-log diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckLine<'a> {
    pub location: &'a str,
    pub severity: &'a str,
    pub message: &'a str,
    /// First entry of the bracketed tag, when the line carries one.
    pub check: Option<&'a str>,
}

/// Matches a single-invocation header. All five groups must be present and
/// the line/column must fit the record's integer type.
#[must_use]
pub fn match_header(line: &str) -> Option<Header<'_>> {
    let caps = HEADER_RE.captures(line)?;
    let path = caps.get(1)?.as_str();
    let line_no = caps.get(2)?.as_str().parse().ok()?;
    let column = caps.get(3)?.as_str().parse().ok()?;
    let severity = caps.get(4)?.as_str();
    let message = caps.get(5)?.as_str();
    Some(Header {
        path,
        line: line_no,
        column,
        severity,
        message,
    })
}

/// Matches a build-log diagnostic line.
#[must_use]
pub fn match_check_line(line: &str) -> Option<CheckLine<'_>> {
    let caps = CHECK_DIAGNOSTIC_RE.captures(line)?;
    let location = caps.get(1)?.as_str();
    let severity = caps.get(2)?.as_str();
    // `[^\[]+` swallows the space in front of the tag.
    let message = caps.get(3)?.as_str().trim_end();
    let check = caps
        .get(4)
        .and_then(|_| caps.get(5))
        .map(|m| m.as_str());
    Some(CheckLine {
        location,
        severity,
        message,
        check,
    })
}

/// True for footer/summary lines and empty lines.
#[must_use]
pub fn is_noise(line: &str) -> bool {
    NOISE_RE.is_match(line)
}
