// src/tidy/mod.rs
//! Driving clang-tidy over a compilation database.

pub mod compile_db;
pub mod fixes;
pub mod invocation;
pub mod runner;

pub use compile_db::{find_compilation_database, load_source_files, COMPILE_DB_NAME};
pub use invocation::TidyInvocation;
pub use runner::{run_all, OutputSink, RunOptions, RunSummary};

use crate::error::Result;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Selects source files whose path matches any of a set of regexes.
#[derive(Debug, Clone)]
pub struct FileFilter {
    regex: Regex,
}

impl FileFilter {
    /// Builds a filter from `patterns`. No patterns selects every file.
    ///
    /// # Errors
    /// Returns error if the combined pattern is not a valid regex.
    pub fn new(patterns: &[String]) -> Result<Self> {
        let combined = if patterns.is_empty() {
            ".*".to_string()
        } else {
            patterns.join("|")
        };
        Ok(Self {
            regex: Regex::new(&combined)?,
        })
    }

    #[must_use]
    pub fn is_match(&self, path: &Path) -> bool {
        self.regex.is_match(&path.to_string_lossy())
    }

    #[must_use]
    pub fn select(&self, files: Vec<PathBuf>) -> Vec<PathBuf> {
        files.into_iter().filter(|f| self.is_match(f)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_selects_everything() {
        let f = FileFilter::new(&[]).unwrap();
        assert!(f.is_match(Path::new("/src/a.cpp")));
    }

    #[test]
    fn patterns_are_alternatives_matched_anywhere() {
        let f = FileFilter::new(&["lib/".to_string(), r"main\.cpp$".to_string()]).unwrap();
        let files = vec![
            PathBuf::from("/src/lib/x.cpp"),
            PathBuf::from("/src/main.cpp"),
            PathBuf::from("/src/other.cpp"),
        ];
        assert_eq!(
            f.select(files),
            vec![PathBuf::from("/src/lib/x.cpp"), PathBuf::from("/src/main.cpp")]
        );
    }

    #[test]
    fn invalid_pattern_is_error() {
        assert!(FileFilter::new(&["(".to_string()]).is_err());
    }
}
