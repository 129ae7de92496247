// src/reporting.rs
//! Console and JSON output for `tidyrun log` and the end of `tidyrun run`.

use crate::buildlog::BuildLogParser;
use crate::tidy::RunSummary;
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;
use std::time::Duration;

/// Per-check counts of an analyzed log.
#[derive(Debug, Clone, Serialize)]
pub struct CheckSummary {
    pub name: String,
    pub total: usize,
    pub unique: usize,
    /// Full text of every unique finding; only filled with `--details`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<String>,
}

/// Result of analyzing one saved log.
#[derive(Debug, Clone, Serialize)]
pub struct LogSummary {
    pub enabled_checks: Vec<String>,
    pub total: usize,
    pub unique: usize,
    pub checks: Vec<CheckSummary>,
}

impl LogSummary {
    #[must_use]
    pub fn from_parser(parser: &BuildLogParser, details: bool) -> Self {
        let findings = parser.findings();
        let checks = findings
            .checks()
            .map(|name| CheckSummary {
                name: name.to_string(),
                total: findings.total_count(Some(name)),
                unique: findings.unique_count(Some(name)),
                findings: if details {
                    findings.all(name).into_iter().map(|f| f.full_text()).collect()
                } else {
                    Vec::new()
                },
            })
            .collect();
        Self {
            enabled_checks: parser.enabled_checks().to_vec(),
            total: findings.total_count(None),
            unique: findings.unique_count(None),
            checks,
        }
    }

    #[must_use]
    pub fn has_findings(&self) -> bool {
        self.total > 0
    }
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// Plain-text rendering of a log summary.
#[must_use]
pub fn build_log_report(summary: &LogSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} enabled {}:",
        summary.enabled_checks.len(),
        pluralize("check", summary.enabled_checks.len())
    );
    for check in &summary.enabled_checks {
        let _ = writeln!(out, "    {check}");
    }
    let _ = writeln!(out);

    for check in &summary.checks {
        let _ = writeln!(
            out,
            "{}: {} total, {} unique",
            check.name, check.total, check.unique
        );
        for finding in &check.findings {
            for line in finding.lines() {
                let _ = writeln!(out, "    {line}");
            }
            let _ = writeln!(out);
        }
    }

    let _ = writeln!(
        out,
        "{} {} ({} unique)",
        summary.total,
        pluralize("finding", summary.total),
        summary.unique
    );
    out
}

/// Prints a log summary with color.
pub fn print_log_report(summary: &LogSummary) {
    println!(
        "{}",
        format!(
            "{} enabled {}:",
            summary.enabled_checks.len(),
            pluralize("check", summary.enabled_checks.len())
        )
        .bold()
    );
    for check in &summary.enabled_checks {
        println!("    {}", check.dimmed());
    }
    println!();

    for check in &summary.checks {
        println!(
            "{}: {} total, {} unique",
            check.name.yellow(),
            check.total,
            check.unique
        );
        for finding in &check.findings {
            for line in finding.lines() {
                println!("    {line}");
            }
            println!();
        }
    }

    let totals = format!(
        "{} {} ({} unique)",
        summary.total,
        pluralize("finding", summary.total),
        summary.unique
    );
    if summary.has_findings() {
        println!("{}", totals.red().bold());
    } else {
        println!("{}", totals.green().bold());
    }
}

/// Prints a log summary as pretty JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn print_json(summary: &LogSummary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

/// Failure report of a run: how many files failed, the elapsed time, then
/// the failed paths.
#[must_use]
pub fn build_run_failures(summary: &RunSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "clang-tidy failed on {} of {} {} ({:.2}s):",
        summary.failed_files.len(),
        summary.files,
        pluralize("file", summary.files),
        Duration::from_millis(summary.duration_ms).as_secs_f64()
    );
    for file in &summary.failed_files {
        let _ = writeln!(out, "    {}", file.display());
    }
    out
}

/// Reports failed files of a run on stderr.
pub fn print_run_summary(summary: &RunSummary) {
    if !summary.has_failures() {
        return;
    }
    eprint!("{} {}", "error:".red().bold(), build_run_failures(summary));
}
