// src/tidy/invocation.rs
//! Command lines for clang-tidy.

use crate::config::Config;
use std::path::{Path, PathBuf};

/// Options shared by every clang-tidy invocation of a run.
#[derive(Debug, Clone, Default)]
pub struct TidyInvocation {
    pub binary: String,
    pub build_path: PathBuf,
    pub checks: Option<String>,
    pub header_filter: Option<String>,
    pub config: Option<String>,
    pub extra_args: Vec<String>,
    pub extra_args_before: Vec<String>,
    pub quiet: bool,
}

impl TidyInvocation {
    #[must_use]
    pub fn new(binary: impl Into<String>, build_path: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            build_path: build_path.into(),
            ..Self::default()
        }
    }

    /// Takes binary, checks, filters and extra arguments from `config`.
    #[must_use]
    pub fn from_config(config: &Config, build_path: impl Into<PathBuf>) -> Self {
        Self {
            binary: config.tool.clang_tidy_binary.clone(),
            build_path: build_path.into(),
            checks: config.run.checks.clone(),
            header_filter: config.run.header_filter.clone(),
            config: config.run.config.clone(),
            extra_args: config.run.extra_args.clone(),
            extra_args_before: config.run.extra_args_before.clone(),
            quiet: config.run.quiet,
        }
    }

    /// Full argument vector (binary first) for analyzing `file`.
    /// `export_fixes` is the YAML file clang-tidy should write fixes to.
    #[must_use]
    pub fn command_line(&self, file: &Path, export_fixes: Option<&Path>) -> Vec<String> {
        let build_path = self.build_path.display();
        let mut args = vec![self.binary.clone()];
        match &self.header_filter {
            Some(filter) => args.push(format!("-header-filter={filter}")),
            // Show warnings in all in-project headers by default.
            None => args.push(format!("-header-filter=^{build_path}/.*")),
        }
        if let Some(checks) = self.checks.as_deref().filter(|c| !c.is_empty()) {
            args.push(format!("-checks={checks}"));
        }
        if let Some(fixes) = export_fixes {
            args.push("-export-fixes".to_string());
            args.push(fixes.display().to_string());
        }
        for arg in &self.extra_args {
            args.push(format!("-extra-arg={arg}"));
        }
        for arg in &self.extra_args_before {
            args.push(format!("-extra-arg-before={arg}"));
        }
        args.push(format!("-p={build_path}"));
        if self.quiet {
            args.push("-quiet".to_string());
        }
        if let Some(config) = self.config.as_deref().filter(|c| !c.is_empty()) {
            args.push(format!("-config={config}"));
        }
        args.push(file.display().to_string());
        args
    }

    /// `-list-checks` command line used to verify the binary before a run.
    #[must_use]
    pub fn list_checks_command_line(&self) -> Vec<String> {
        let mut args = vec![
            self.binary.clone(),
            "-list-checks".to_string(),
            format!("-p={}", self.build_path.display()),
        ];
        if let Some(checks) = self.checks.as_deref().filter(|c| !c.is_empty()) {
            args.push(format!("-checks={checks}"));
        }
        args.push("-".to_string());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_command_line() {
        let inv = TidyInvocation::new("clang-tidy", "/build");
        assert_eq!(
            inv.command_line(Path::new("/src/a.cpp"), None),
            vec![
                "clang-tidy",
                "-header-filter=^/build/.*",
                "-p=/build",
                "/src/a.cpp"
            ]
        );
    }

    #[test]
    fn full_command_line_keeps_argument_order() {
        let inv = TidyInvocation {
            binary: "ct".to_string(),
            build_path: PathBuf::from("/b"),
            checks: Some("-*,llvm-header-guard".to_string()),
            header_filter: Some("extra/".to_string()),
            config: Some("{Checks: '*'}".to_string()),
            extra_args: vec!["-std=c++17".to_string()],
            extra_args_before: vec!["-DX".to_string()],
            quiet: true,
        };
        assert_eq!(
            inv.command_line(Path::new("/s/a.cpp"), Some(Path::new("/tmp/f.yaml"))),
            vec![
                "ct",
                "-header-filter=extra/",
                "-checks=-*,llvm-header-guard",
                "-export-fixes",
                "/tmp/f.yaml",
                "-extra-arg=-std=c++17",
                "-extra-arg-before=-DX",
                "-p=/b",
                "-quiet",
                "-config={Checks: '*'}",
                "/s/a.cpp",
            ]
        );
    }

    #[test]
    fn list_checks_command_line() {
        let mut inv = TidyInvocation::new("clang-tidy", "/build");
        inv.checks = Some("modernize-*".to_string());
        assert_eq!(
            inv.list_checks_command_line(),
            vec!["clang-tidy", "-list-checks", "-p=/build", "-checks=modernize-*", "-"]
        );
    }

    #[test]
    fn from_config_copies_run_settings() {
        let mut config = Config::new();
        config.run.checks = Some("bugprone-*".to_string());
        config.run.quiet = true;
        let inv = TidyInvocation::from_config(&config, "/b");
        assert_eq!(inv.binary, "clang-tidy");
        assert_eq!(inv.checks.as_deref(), Some("bugprone-*"));
        assert!(inv.quiet);
    }
}
