// src/buildlog/finding.rs
use super::diagnostic::CheckDiagnostic;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A primary warning/error and the notes clang-tidy printed after it, in
/// emission order. Deduplicated as a unit.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    diagnostics: Vec<CheckDiagnostic>,
}

impl Finding {
    #[must_use]
    pub fn new(initial: CheckDiagnostic) -> Self {
        Self {
            diagnostics: vec![initial],
        }
    }

    pub fn add_diagnostic(&mut self, diag: CheckDiagnostic) {
        self.diagnostics.push(diag);
    }

    /// Attaches a code hint to the most recent diagnostic.
    pub fn add_code_hint(&mut self, line: &str) {
        if let Some(last) = self.diagnostics.last_mut() {
            last.add_code_hint(line);
        }
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[CheckDiagnostic] {
        &self.diagnostics
    }

    /// The diagnostic that opened the finding.
    #[must_use]
    pub fn primary(&self) -> &CheckDiagnostic {
        &self.diagnostics[0]
    }

    /// Concatenated full text of every diagnostic.
    #[must_use]
    pub fn full_text(&self) -> String {
        self.diagnostics
            .iter()
            .map(CheckDiagnostic::full_text)
            .collect()
    }
}

impl PartialEq for Finding {
    fn eq(&self, other: &Self) -> bool {
        self.full_text() == other.full_text()
    }
}

impl Eq for Finding {}

impl Hash for Finding {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.full_text().hash(state);
    }
}

/// Sorted by the location of the primary diagnostic; the full text breaks
/// ties so that ordering agrees with equality.
impl Ord for Finding {
    fn cmp(&self, other: &Self) -> Ordering {
        self.primary()
            .location()
            .cmp(other.primary().location())
            .then_with(|| self.full_text().cmp(&other.full_text()))
    }
}

impl PartialOrd for Finding {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_text())
    }
}
