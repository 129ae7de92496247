// src/tidy/runner.rs
//! Parallel clang-tidy runner.
//!
//! Each rayon worker owns a [`TidyOutputParser`], so repeated diagnostics
//! (typically from headers shared by many translation units) are printed
//! once per worker. Parsing and printing a file's output happen under the
//! sink lock to keep the output of different files from interleaving.

use super::invocation::TidyInvocation;
use crate::diagnostics::TidyOutputParser;
use crate::error::{Result, TidyError};
use rayon::prelude::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Settings for one run over many files.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub invocation: TidyInvocation,
    /// Parallel clang-tidy instances, 0 = one per CPU.
    pub jobs: usize,
    /// When set, every invocation exports its fixes to a fresh YAML file here.
    pub fixes_dir: Option<PathBuf>,
}

/// Where diagnostics (`out`) and clang-tidy's stderr (`err`) are written.
#[derive(Debug)]
pub struct OutputSink<O, E> {
    pub out: O,
    pub err: E,
}

impl<O, E> OutputSink<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }
}

/// Captured result of one clang-tidy process.
#[derive(Debug, Clone)]
pub struct InvocationResult {
    /// The command line, space separated.
    pub command: String,
    /// Process exit code (-1 if unavailable, e.g. killed by signal or never started).
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

impl InvocationResult {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.exit_code == 0
    }
}

/// Totals of a finished run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub files: usize,
    pub failed_files: Vec<PathBuf>,
    pub unique_diagnostics: usize,
    pub duration_ms: u64,
}

impl RunSummary {
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed_files.is_empty()
    }
}

/// Runs clang-tidy over `files` and writes unique diagnostics to `sink`.
///
/// # Errors
/// Returns error if the worker pool cannot be created.
pub fn run_all<O, E>(
    options: &RunOptions,
    files: &[PathBuf],
    sink: &Mutex<OutputSink<O, E>>,
) -> Result<RunSummary>
where
    O: Write + Send,
    E: Write + Send,
{
    let start = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs)
        .build()
        .map_err(|e| TidyError::Other(format!("failed to start worker pool: {e}")))?;
    info!(files = files.len(), jobs = pool.current_num_threads(), "starting clang-tidy");

    // One parser per pool thread, so the dedup state lives as long as the worker.
    let parsers: Vec<Mutex<TidyOutputParser>> = (0..pool.current_num_threads())
        .map(|_| Mutex::new(TidyOutputParser::new()))
        .collect();
    let failed = Mutex::new(Vec::new());
    let emitted = AtomicUsize::new(0);

    pool.install(|| {
        files.par_iter().for_each(|file| {
            let result = run_single(options, file);
            debug!(file = %file.display(), ms = result.duration_ms, "clang-tidy finished");
            if !result.passed() {
                debug!(file = %file.display(), code = result.exit_code, "clang-tidy failed");
                failed
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(file.clone());
            }
            let worker = rayon::current_thread_index().unwrap_or(0) % parsers.len();
            let mut parser = parsers[worker]
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let mut sink = sink.lock().unwrap_or_else(PoisonError::into_inner);
            match write_result(&mut parser, &result, &mut sink) {
                Ok(count) => {
                    emitted.fetch_add(count, Ordering::Relaxed);
                }
                Err(e) => warn!(file = %file.display(), "failed to write diagnostics: {e}"),
            }
        });
    });

    let mut failed_files = failed.into_inner().unwrap_or_else(PoisonError::into_inner);
    failed_files.sort();
    let summary = RunSummary {
        files: files.len(),
        failed_files,
        unique_diagnostics: emitted.into_inner(),
        duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
    };
    info!(
        files = summary.files,
        failed = summary.failed_files.len(),
        diagnostics = summary.unique_diagnostics,
        ms = summary.duration_ms,
        "clang-tidy run finished"
    );
    Ok(summary)
}

/// Parses one file's stdout and prints the command line followed by the
/// diagnostics not seen before by this parser. Returns how many were printed.
fn write_result<O: Write, E: Write>(
    parser: &mut TidyOutputParser,
    result: &InvocationResult,
    sink: &mut OutputSink<O, E>,
) -> io::Result<usize> {
    parser.parse(&result.stdout);
    let diagnostics: Vec<String> = parser.results().iter().map(ToString::to_string).collect();
    parser.reset();

    writeln!(sink.out, "{}", result.command)?;
    writeln!(sink.out, "{}", diagnostics.join("\n"))?;
    sink.out.flush()?;
    if !result.stderr.is_empty() {
        writeln!(sink.err, "{}", result.stderr)?;
    }
    Ok(diagnostics.len())
}

/// Runs clang-tidy on one file, capturing stdout and stderr.
#[must_use]
pub fn run_single(options: &RunOptions, file: &Path) -> InvocationResult {
    let start = Instant::now();

    let export_fixes = match options.fixes_dir.as_deref().map(create_fixes_file).transpose() {
        Ok(path) => path,
        Err(e) => {
            let args = options.invocation.command_line(file, None);
            return InvocationResult {
                command: args.join(" "),
                exit_code: -1,
                stdout: String::new(),
                stderr: format!("Failed to create fixes file: {e}"),
                duration_ms: 0,
            };
        }
    };

    let args = options.invocation.command_line(file, export_fixes.as_deref());
    let command = args.join(" ");
    let output = Command::new(&args[0]).args(&args[1..]).output();
    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    match output {
        Ok(output) => InvocationResult {
            command,
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            duration_ms,
        },
        Err(e) => InvocationResult {
            command,
            exit_code: -1,
            stdout: String::new(),
            stderr: format!("Failed to execute: {e}"),
            duration_ms,
        },
    }
}

/// Reserves a unique `.yaml` path in `dir` that clang-tidy may overwrite.
fn create_fixes_file(dir: &Path) -> io::Result<PathBuf> {
    let file = tempfile::Builder::new().suffix(".yaml").tempfile_in(dir)?;
    file.into_temp_path().keep().map_err(|e| e.error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(binary: &str) -> RunOptions {
        RunOptions {
            invocation: TidyInvocation::new(binary, "/build"),
            jobs: 1,
            fixes_dir: None,
        }
    }

    #[test]
    fn missing_binary_is_a_failed_invocation() {
        let result = run_single(
            &options("nonexistent_clang_tidy_xyz_123"),
            Path::new("/src/a.cpp"),
        );
        assert!(!result.passed());
        assert_eq!(result.exit_code, -1);
        assert!(result.stderr.contains("Failed to execute"));
        assert!(result.command.starts_with("nonexistent_clang_tidy_xyz_123 "));
    }

    #[test]
    fn write_result_prints_command_then_unique_diagnostics() {
        let mut parser = TidyOutputParser::new();
        let mut sink = OutputSink::new(Vec::new(), Vec::new());
        let result = InvocationResult {
            command: "clang-tidy a.cpp".to_string(),
            exit_code: 0,
            stdout: "/a.h:1:1: warning: w [x]\n  ^\n/a.h:1:1: warning: w [x]\n  ^\n".to_string(),
            stderr: "1 warning generated.".to_string(),
            duration_ms: 0,
        };

        let count = write_result(&mut parser, &result, &mut sink).unwrap();
        assert_eq!(count, 1);
        assert_eq!(
            String::from_utf8(sink.out).unwrap(),
            "clang-tidy a.cpp\n/a.h:1:1: warning: w [x]\n  ^\n"
        );
        assert_eq!(String::from_utf8(sink.err).unwrap(), "1 warning generated.\n");
    }

    #[test]
    fn write_result_without_diagnostics_prints_blank_line() {
        let mut parser = TidyOutputParser::new();
        let mut sink = OutputSink::new(Vec::new(), Vec::new());
        let result = InvocationResult {
            command: "clang-tidy b.cpp".to_string(),
            exit_code: 0,
            stdout: String::new(),
            stderr: String::new(),
            duration_ms: 0,
        };
        assert_eq!(write_result(&mut parser, &result, &mut sink).unwrap(), 0);
        assert_eq!(String::from_utf8(sink.out).unwrap(), "clang-tidy b.cpp\n\n");
        assert!(sink.err.is_empty());
    }

    #[test]
    fn fixes_file_is_reserved_in_directory() {
        let d = tempfile::tempdir().unwrap();
        let path = create_fixes_file(d.path()).unwrap();
        assert!(path.exists());
        assert_eq!(path.parent(), Some(d.path()));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("yaml"));
    }
}
