// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TidyError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("could not find compilation database `{name}` above {start}")]
    CompileDbNotFound { name: String, start: PathBuf },

    #[error("invalid compilation database {path}: {source}")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },

    #[error("invalid replacement file {path}: {source}")]
    Yaml {
        source: serde_yaml::Error,
        path: PathBuf,
    },

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("unable to run {binary}: {reason}")]
    ToolUnavailable { binary: String, reason: String },

    #[error("Generic error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TidyError>;

impl TidyError {
    /// Wraps an I/O error with the path that produced it.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }
}

// Allow `?` on std::io::Error by converting to TidyError::Io with unknown path.
impl From<std::io::Error> for TidyError {
    fn from(source: std::io::Error) -> Self {
        TidyError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl From<walkdir::Error> for TidyError {
    fn from(e: walkdir::Error) -> Self {
        TidyError::Other(e.to_string())
    }
}
