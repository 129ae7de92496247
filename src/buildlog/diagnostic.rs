// src/buildlog/diagnostic.rs
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Note,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "note" => Some(Self::Note),
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One diagnostic line of a build log plus the code hints printed below it.
///
/// Identity is the full rendered text: two diagnostics are equal iff
/// [`full_text`](Self::full_text) is equal.
#[derive(Debug, Clone, Serialize)]
pub struct CheckDiagnostic {
    severity: Severity,
    location: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    check: Option<String>,
    code_hints: String,
}

impl CheckDiagnostic {
    /// Creates a diagnostic. `check` is the bracketed check name, absent for notes.
    #[must_use]
    pub fn new(
        severity: Severity,
        location: impl Into<String>,
        message: impl Into<String>,
        check: Option<String>,
    ) -> Self {
        Self {
            severity,
            location: location.into(),
            message: message.into(),
            check,
            code_hints: String::new(),
        }
    }

    pub fn add_code_hint(&mut self, line: &str) {
        self.code_hints.push_str(line);
        self.code_hints.push('\n');
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn check(&self) -> Option<&str> {
        self.check.as_deref()
    }

    /// Hint lines, each terminated by `\n`.
    #[must_use]
    pub fn code_hints(&self) -> &str {
        &self.code_hints
    }

    /// `location: severity: message [check]`, without the brackets for notes.
    #[must_use]
    pub fn description(&self) -> String {
        match &self.check {
            Some(check) => format!(
                "{}: {}: {} [{check}]",
                self.location, self.severity, self.message
            ),
            None => format!("{}: {}: {}", self.location, self.severity, self.message),
        }
    }

    /// Description, a newline, then the code hints.
    #[must_use]
    pub fn full_text(&self) -> String {
        format!("{}\n{}", self.description(), self.code_hints)
    }
}

impl PartialEq for CheckDiagnostic {
    fn eq(&self, other: &Self) -> bool {
        self.full_text() == other.full_text()
    }
}

impl Eq for CheckDiagnostic {}

impl Hash for CheckDiagnostic {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.full_text().hash(state);
    }
}

impl fmt::Display for CheckDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_text())
    }
}
