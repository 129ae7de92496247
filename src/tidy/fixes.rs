// src/tidy/fixes.rs
//! Exported fix files: merging and applying them with clang-apply-replacements.

use crate::error::{Result, TidyError};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};
use walkdir::WalkDir;

const DIAGNOSTICS_KEY: &str = "Diagnostics";
const MAIN_SOURCE_FILE_KEY: &str = "MainSourceFile";

/// Merges the `Diagnostics` of every `*.yaml` file directly inside `tmpdir`
/// into `mergefile`. Writes an empty file when no fixes were exported.
/// Returns the number of merged diagnostics.
///
/// # Errors
/// Returns error if a fixes file cannot be read or parsed, or if
/// `mergefile` cannot be written.
pub fn merge_replacement_files(tmpdir: &Path, mergefile: &Path) -> Result<usize> {
    let mut merged: Vec<Value> = Vec::new();

    let mut paths = Vec::new();
    for entry in WalkDir::new(tmpdir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|e| e == "yaml") {
            paths.push(path.to_path_buf());
        }
    }
    paths.sort();

    for path in &paths {
        let content = fs::read_to_string(path).map_err(|e| TidyError::io(e, path))?;
        if content.trim().is_empty() {
            continue;
        }
        let doc: Value = serde_yaml::from_str(&content).map_err(|source| TidyError::Yaml {
            source,
            path: path.clone(),
        })?;
        match doc.get(DIAGNOSTICS_KEY) {
            Some(Value::Sequence(items)) => merged.extend(items.iter().cloned()),
            _ => debug!(path = %path.display(), "no diagnostics in fixes file"),
        }
    }

    let count = merged.len();
    let output = if merged.is_empty() {
        String::new()
    } else {
        let mut root = Mapping::new();
        root.insert(
            Value::String(MAIN_SOURCE_FILE_KEY.to_string()),
            Value::String(String::new()),
        );
        root.insert(
            Value::String(DIAGNOSTICS_KEY.to_string()),
            Value::Sequence(merged),
        );
        serde_yaml::to_string(&Value::Mapping(root)).map_err(|source| TidyError::Yaml {
            source,
            path: mergefile.to_path_buf(),
        })?
    };

    fs::write(mergefile, output).map_err(|e| TidyError::io(e, mergefile))?;
    info!(files = paths.len(), diagnostics = count, "merged fixes");
    Ok(count)
}

/// Verifies that `binary` can be executed.
///
/// # Errors
/// Returns `ToolUnavailable` if `<binary> --version` fails to start or exits non-zero.
pub fn check_apply_binary(binary: &str) -> Result<()> {
    let output = Command::new(binary)
        .arg("--version")
        .output()
        .map_err(|e| TidyError::ToolUnavailable {
            binary: binary.to_string(),
            reason: e.to_string(),
        })?;
    if output.status.success() {
        Ok(())
    } else {
        Err(TidyError::ToolUnavailable {
            binary: binary.to_string(),
            reason: format!("`--version` exited with {}", output.status),
        })
    }
}

/// Argument vector for applying the fixes collected in `tmpdir`.
#[must_use]
pub fn apply_command_line(binary: &str, format: bool, style: Option<&str>, tmpdir: &Path) -> Vec<String> {
    let mut args = vec![binary.to_string()];
    if format {
        args.push("-format".to_string());
    }
    if let Some(style) = style {
        args.push(format!("-style={style}"));
    }
    args.push(tmpdir.display().to_string());
    args
}

/// Runs clang-apply-replacements over `tmpdir`.
///
/// # Errors
/// Returns error if the binary cannot be run or exits non-zero.
pub fn apply_fixes(binary: &str, format: bool, style: Option<&str>, tmpdir: &Path) -> Result<()> {
    let args = apply_command_line(binary, format, style, tmpdir);
    debug!(command = %args.join(" "), "applying fixes");
    let status = Command::new(&args[0])
        .args(&args[1..])
        .status()
        .map_err(|e| TidyError::ToolUnavailable {
            binary: binary.to_string(),
            reason: e.to_string(),
        })?;
    if status.success() {
        Ok(())
    } else {
        Err(TidyError::Other(format!("{binary} exited with {status}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIX_A: &str = "---\nMainSourceFile: /src/a.cpp\nDiagnostics:\n  - DiagnosticName: check-a\n    Message: first\n...\n";
    const FIX_B: &str = "---\nMainSourceFile: /src/b.cpp\nDiagnostics:\n  - DiagnosticName: check-b\n    Message: second\n  - DiagnosticName: check-b\n    Message: third\n...\n";

    #[test]
    fn merges_diagnostics_of_all_files() {
        let d = tempfile::tempdir().unwrap();
        fs::write(d.path().join("a.yaml"), FIX_A).unwrap();
        fs::write(d.path().join("b.yaml"), FIX_B).unwrap();
        fs::write(d.path().join("ignored.txt"), FIX_A).unwrap();
        let out = tempfile::tempdir().unwrap();
        let mergefile = out.path().join("fixes.yaml");

        assert_eq!(merge_replacement_files(d.path(), &mergefile).unwrap(), 3);

        let merged: Value = serde_yaml::from_str(&fs::read_to_string(&mergefile).unwrap()).unwrap();
        assert_eq!(merged.get(MAIN_SOURCE_FILE_KEY), Some(&Value::String(String::new())));
        let diags = merged.get(DIAGNOSTICS_KEY).and_then(Value::as_sequence).unwrap();
        let messages: Vec<&str> = diags
            .iter()
            .filter_map(|d| d.get("Message").and_then(Value::as_str))
            .collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
    }

    #[test]
    fn empty_exports_produce_empty_file() {
        let d = tempfile::tempdir().unwrap();
        fs::write(d.path().join("a.yaml"), "").unwrap();
        let mergefile = d.path().join("merged.out");

        assert_eq!(merge_replacement_files(d.path(), &mergefile).unwrap(), 0);
        assert_eq!(fs::read_to_string(&mergefile).unwrap(), "");
    }

    #[test]
    fn malformed_fixes_file_is_yaml_error() {
        let d = tempfile::tempdir().unwrap();
        fs::write(d.path().join("bad.yaml"), "Diagnostics: [unclosed").unwrap();
        let err = merge_replacement_files(d.path(), &d.path().join("out")).unwrap_err();
        assert!(matches!(err, TidyError::Yaml { .. }));
    }

    #[test]
    fn apply_command_line_flags() {
        let args = apply_command_line("car", true, Some("llvm"), Path::new("/tmp/x"));
        assert_eq!(args, vec!["car", "-format", "-style=llvm", "/tmp/x"]);
        let args = apply_command_line("car", false, None, Path::new("/tmp/x"));
        assert_eq!(args, vec!["car", "/tmp/x"]);
    }

    #[test]
    fn missing_apply_binary_is_unavailable() {
        let err = check_apply_binary("nonexistent_apply_replacements_xyz").unwrap_err();
        assert!(matches!(err, TidyError::ToolUnavailable { .. }));
    }
}
