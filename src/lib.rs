//! Parallel clang-tidy runner with diagnostic deduplication and build-log
//! analysis.

pub mod buildlog;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod exit;
pub mod patterns;
pub mod reporting;
pub mod tidy;
pub mod utils;
