// src/tidy/compile_db.rs
//! Compilation database discovery and loading.

use crate::error::{Result, TidyError};
use crate::utils::make_absolute;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const COMPILE_DB_NAME: &str = "compile_commands.json";

/// One entry of `compile_commands.json`. Only the fields needed to locate
/// the source file are read.
#[derive(Debug, Clone, Deserialize)]
pub struct CompileCommand {
    pub file: String,
    pub directory: String,
}

/// Walks from `start` towards the root and returns the first directory that
/// contains `compile_commands.json`.
///
/// # Errors
/// Returns `CompileDbNotFound` if no ancestor contains the database.
pub fn find_compilation_database(start: &Path) -> Result<PathBuf> {
    let start = start
        .canonicalize()
        .map_err(|e| TidyError::io(e, start))?;
    for dir in start.ancestors() {
        if dir.join(COMPILE_DB_NAME).is_file() {
            debug!(dir = %dir.display(), "found compilation database");
            return Ok(dir.to_path_buf());
        }
    }
    Err(TidyError::CompileDbNotFound {
        name: COMPILE_DB_NAME.to_string(),
        start,
    })
}

/// Reads the database in `build_path`.
///
/// # Errors
/// Returns error if the file is missing or not a JSON array of entries.
pub fn load_compile_commands(build_path: &Path) -> Result<Vec<CompileCommand>> {
    let path = build_path.join(COMPILE_DB_NAME);
    let content = fs::read_to_string(&path).map_err(|e| TidyError::io(e, &path))?;
    serde_json::from_str(&content).map_err(|source| TidyError::Json { source, path })
}

/// Absolute paths of every source file in the database, in database order.
///
/// # Errors
/// Returns error if the database cannot be loaded.
pub fn load_source_files(build_path: &Path) -> Result<Vec<PathBuf>> {
    let commands = load_compile_commands(build_path)?;
    Ok(commands
        .iter()
        .map(|c| make_absolute(Path::new(&c.file), Path::new(&c.directory)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_database_in_ancestor() {
        let d = tempfile::tempdir().unwrap();
        fs::write(d.path().join(COMPILE_DB_NAME), "[]").unwrap();
        let nested = d.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let found = find_compilation_database(&nested).unwrap();
        assert_eq!(found, d.path().canonicalize().unwrap());
    }

    #[test]
    fn invalid_json_is_reported_with_path() {
        let d = tempfile::tempdir().unwrap();
        fs::write(d.path().join(COMPILE_DB_NAME), "{ not json").unwrap();
        let err = load_source_files(d.path()).unwrap_err();
        assert!(matches!(err, TidyError::Json { .. }));
        assert!(err.to_string().contains(COMPILE_DB_NAME));
    }

    #[test]
    fn missing_database_is_io_error() {
        let d = tempfile::tempdir().unwrap();
        let err = load_source_files(d.path()).unwrap_err();
        assert!(matches!(err, TidyError::Io { .. }));
    }
}
