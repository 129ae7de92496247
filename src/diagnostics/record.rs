// src/diagnostics/record.rs
use super::fingerprint::Fingerprint;
use crate::patterns::Header;
use std::fmt;

/// A diagnostic reconstructed from one clang-tidy run's output.
///
/// The location and first line are known as soon as the header is seen.
/// Everything printed until the next header (code pointers, notes, the
/// occasional multi-line warning) is appended with
/// [`Diagnostic::add_additional_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    path: String,
    line: u32,
    column: u32,
    message: String,
    additional: String,
}

impl Diagnostic {
    /// `message` is the first diagnostic line, e.g. `"warning: text [check]"`.
    #[must_use]
    pub fn new(path: impl Into<String>, line: u32, column: u32, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line,
            column,
            message: message.into(),
            additional: String::new(),
        }
    }

    pub(crate) fn from_header(header: &Header<'_>) -> Self {
        Self::new(
            header.path,
            header.line,
            header.column,
            format!("{}: {}", header.severity, header.message),
        )
    }

    pub fn add_additional_line(&mut self, line: &str) {
        self.additional.push('\n');
        self.additional.push_str(line);
    }

    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::new(
            &self.path,
            self.line,
            self.column,
            &self.message,
            &self.additional,
        )
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[must_use]
    pub fn column(&self) -> u32 {
        self.column
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Context lines, each prefixed by `\n`. Empty when none were added.
    #[must_use]
    pub fn additional(&self) -> &str {
        &self.additional
    }

    /// `"error"` or `"warning"`, taken from the first line.
    #[must_use]
    pub fn severity(&self) -> &str {
        self.message
            .split_once(": ")
            .map_or(self.message.as_str(), |(severity, _)| severity)
    }
}

/// Renders the diagnostic exactly as clang-tidy printed it.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}{}",
            self.path, self.line, self.column, self.message, self.additional
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_matches_manual_construction() {
        let mut d = Diagnostic::new(
            "/home/user/project/my_file.h",
            24,
            4,
            "warning: Do not do this thing [warning-category]",
        );
        d.add_additional_line("      MyCodePiece();");
        d.add_additional_line("      ^");

        let expected = Fingerprint::new(
            "/home/user/project/my_file.h",
            24,
            4,
            "warning: Do not do this thing [warning-category]",
            "\n      MyCodePiece();\n      ^",
        );
        assert_eq!(d.fingerprint().bucket(), expected.bucket());
        assert_eq!(d.fingerprint(), expected);
    }

    #[test]
    fn display_without_context_is_the_header() {
        let d = Diagnostic::new("/a/b.h", 10, 5, "warning: msg [check-x]");
        assert_eq!(d.to_string(), "/a/b.h:10:5: warning: msg [check-x]");
        assert_eq!(d.severity(), "warning");
    }

    #[test]
    fn display_appends_context_lines() {
        let mut d = Diagnostic::new("/a/b.h", 10, 5, "error: msg");
        d.add_additional_line("  code");
        d.add_additional_line("  ^");
        assert_eq!(d.to_string(), "/a/b.h:10:5: error: msg\n  code\n  ^");
        assert_eq!(d.severity(), "error");
    }
}
