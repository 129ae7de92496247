// src/cli/handlers.rs
use super::args::RunArgs;
use crate::buildlog::BuildLogParser;
use crate::config::Config;
use crate::exit::TidyExit;
use crate::reporting::{self, LogSummary};
use crate::tidy::fixes;
use crate::tidy::{self, FileFilter, OutputSink, RunOptions, TidyInvocation};
use anyhow::{Context, Result};
use colored::Colorize;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;
use tracing::{debug, warn};

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Folds command line flags over the values loaded from `tidyrun.toml`.
pub fn apply_overrides(config: &mut Config, args: &RunArgs) {
    if let Some(binary) = &args.clang_tidy_binary {
        config.tool.clang_tidy_binary.clone_from(binary);
    }
    if let Some(binary) = &args.clang_apply_replacements_binary {
        config.tool.apply_replacements_binary.clone_from(binary);
    }
    if args.checks.is_some() {
        config.run.checks.clone_from(&args.checks);
    }
    if args.config.is_some() {
        config.run.config.clone_from(&args.config);
    }
    if args.header_filter.is_some() {
        config.run.header_filter.clone_from(&args.header_filter);
    }
    if let Some(jobs) = args.jobs {
        config.run.jobs = jobs;
    }
    if let Some(style) = &args.style {
        config.run.style.clone_from(style);
    }
    if !args.extra_arg.is_empty() {
        config.run.extra_args.clone_from(&args.extra_arg);
    }
    if !args.extra_arg_before.is_empty() {
        config.run.extra_args_before.clone_from(&args.extra_arg_before);
    }
    config.run.quiet |= args.quiet;
    config.run.format |= args.format;
}

/// Runs `clang-tidy -list-checks` to make sure the binary works before
/// spawning it once per file. Its `Enabled checks:` listing goes straight to
/// stdout and becomes the preamble `tidyrun log` reads back.
fn verify_clang_tidy(invocation: &TidyInvocation) -> Result<()> {
    let args = invocation.list_checks_command_line();
    debug!(command = %args.join(" "), "verifying clang-tidy");
    let status = Command::new(&args[0])
        .args(&args[1..])
        .status()
        .context("Unable to run clang-tidy.")?;
    if !status.success() {
        anyhow::bail!("Unable to run clang-tidy ({status}).");
    }
    Ok(())
}

/// Removes the fixes directory and exits when the user presses Ctrl-C.
fn install_interrupt_handler(fixes_dir: Option<PathBuf>) {
    let result = ctrlc::set_handler(move || {
        eprintln!("\nCtrl-C detected, goodbye.");
        if let Some(dir) = &fixes_dir {
            let _ = std::fs::remove_dir_all(dir);
        }
        TidyExit::Interrupted.exit();
    });
    if let Err(e) = result {
        warn!("failed to install Ctrl-C handler: {e}");
    }
}

/// Handles `tidyrun run`.
///
/// # Errors
/// Returns error if clang-tidy or clang-apply-replacements cannot be run, or
/// if the compilation database cannot be found or loaded.
pub fn handle_run(args: &RunArgs) -> Result<TidyExit> {
    let mut config = Config::load();
    apply_overrides(&mut config, args);

    let build_path = match &args.build_path {
        Some(path) => path.clone(),
        None => tidy::find_compilation_database(&current_dir())?,
    };

    let invocation = TidyInvocation::from_config(&config, &build_path);
    verify_clang_tidy(&invocation)?;

    if args.collects_fixes() {
        fixes::check_apply_binary(&config.tool.apply_replacements_binary).with_context(|| {
            format!(
                "Unable to run {0}. Is {0} binary correctly specified?",
                config.tool.apply_replacements_binary
            )
        })?;
    }

    let filter = match FileFilter::new(&args.files) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{} invalid file regex: {e}", "error:".red().bold());
            return Ok(TidyExit::InvalidInput);
        }
    };
    let files = filter.select(tidy::load_source_files(&build_path)?);

    let fixes_dir = if args.collects_fixes() {
        Some(tempfile::tempdir().context("failed to create fixes directory")?)
    } else {
        None
    };
    install_interrupt_handler(fixes_dir.as_ref().map(|d| d.path().to_path_buf()));

    let options = RunOptions {
        invocation,
        jobs: config.run.jobs,
        fixes_dir: fixes_dir.as_ref().map(|d| d.path().to_path_buf()),
    };
    let sink = Mutex::new(OutputSink::new(io::stdout(), io::stderr()));
    let summary = tidy::run_all(&options, &files, &sink)?;
    reporting::print_run_summary(&summary);

    let mut exit = if summary.has_failures() {
        TidyExit::Error
    } else {
        TidyExit::Success
    };

    if let Some(dir) = &fixes_dir {
        if let Some(mergefile) = &args.export_fixes {
            println!("Writing fixes to {} ...", mergefile.display());
            if let Err(e) = fixes::merge_replacement_files(dir.path(), mergefile) {
                eprintln!("Error exporting fixes.\n{e}");
                exit = TidyExit::Error;
            }
        }
        if args.fix {
            println!("Applying fixes ...");
            if let Err(e) = apply(&config, dir.path()) {
                eprintln!("Error applying fixes.\n{e}");
                exit = TidyExit::Error;
            }
        }
    }

    Ok(exit)
}

fn apply(config: &Config, dir: &Path) -> crate::error::Result<()> {
    fixes::apply_fixes(
        &config.tool.apply_replacements_binary,
        config.run.format,
        Some(config.run.style.as_str()).filter(|s| !s.is_empty()),
        dir,
    )
}

/// Handles `tidyrun log`.
///
/// # Errors
/// Returns error if JSON serialization fails.
pub fn handle_log(file: &Path, details: bool, json: bool, fail_on_findings: bool) -> Result<TidyExit> {
    let mut parser = BuildLogParser::new();
    if let Err(e) = parser.parse_file(file) {
        eprintln!("{} {e}", "error:".red().bold());
        return Ok(TidyExit::InvalidInput);
    }

    let summary = LogSummary::from_parser(&parser, details);
    if json {
        reporting::print_json(&summary)?;
    } else {
        reporting::print_log_report(&summary);
    }

    Ok(if fail_on_findings && summary.has_findings() {
        TidyExit::FindingsPresent
    } else {
        TidyExit::Success
    })
}

/// Handles `tidyrun config`.
///
/// # Errors
/// Returns error if the configuration cannot be serialized.
pub fn handle_config() -> Result<TidyExit> {
    let config = Config::load();
    print!("{}", config.to_toml()?);
    Ok(TidyExit::Success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_file_values() {
        let mut config = Config::new();
        config.parse_toml("[run]\nchecks = \"from-file\"\njobs = 4\nstyle = \"llvm\"\n");
        let args = RunArgs {
            checks: Some("from-cli".to_string()),
            quiet: true,
            extra_arg: vec!["-std=c++20".to_string()],
            ..RunArgs::default()
        };
        apply_overrides(&mut config, &args);
        assert_eq!(config.run.checks.as_deref(), Some("from-cli"));
        assert_eq!(config.run.jobs, 4);
        assert_eq!(config.run.style, "llvm");
        assert!(config.run.quiet);
        assert_eq!(config.run.extra_args, vec!["-std=c++20"]);
    }

    #[test]
    fn unset_flags_keep_defaults() {
        let mut config = Config::new();
        apply_overrides(&mut config, &RunArgs::default());
        assert_eq!(config.tool.clang_tidy_binary, "clang-tidy");
        assert_eq!(config.run.style, "file");
        assert!(config.run.checks.is_none());
    }

    #[test]
    fn export_alone_needs_apply_binary() {
        let export = RunArgs {
            export_fixes: Some(PathBuf::from("fixes.yaml")),
            ..RunArgs::default()
        };
        let fix = RunArgs {
            fix: true,
            ..RunArgs::default()
        };
        assert!(export.collects_fixes());
        assert!(fix.collects_fixes());
        assert!(!RunArgs::default().collects_fixes());
    }

    #[test]
    fn unreadable_log_is_invalid_input() {
        let d = tempfile::tempdir().unwrap();
        let exit = handle_log(&d.path().join("missing.log"), false, false, false).unwrap();
        assert_eq!(exit, TidyExit::InvalidInput);
    }

    #[test]
    fn findings_fail_when_requested() {
        let d = tempfile::tempdir().unwrap();
        let log = d.path().join("build.log");
        std::fs::write(
            &log,
            "Enabled checks:\n    check-a\n\n/x.cpp:1:1: warning: w [check-a]\n",
        )
        .unwrap();
        assert_eq!(handle_log(&log, false, true, true).unwrap(), TidyExit::FindingsPresent);
        assert_eq!(handle_log(&log, false, true, false).unwrap(), TidyExit::Success);
    }
}
