use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tidyrun",
    version,
    about = "Runs clang-tidy over a compilation database in parallel"
)]
pub struct Cli {
    /// Debug logging on stderr (overridden by TIDYRUN_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run clang-tidy on every file of the compilation database
    Run(RunArgs),
    /// Summarize the findings of a saved runner log
    Log {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Print every unique finding
        #[arg(long)]
        details: bool,
        /// Emit a JSON summary
        #[arg(long)]
        json: bool,
        /// Exit with code 3 when any finding was registered
        #[arg(long)]
        fail_on_findings: bool,
    },
    /// Print the effective configuration
    Config,
}

/// Flags of `tidyrun run`. Unset options fall back to `tidyrun.toml`.
#[allow(clippy::struct_excessive_bools)]
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Path to the clang-tidy binary
    #[arg(long, value_name = "PATH")]
    pub clang_tidy_binary: Option<String>,
    /// Path to the clang-apply-replacements binary
    #[arg(long, value_name = "PATH")]
    pub clang_apply_replacements_binary: Option<String>,
    /// Checks filter; when omitted clang-tidy's default is used
    #[arg(long)]
    pub checks: Option<String>,
    /// Configuration in YAML/JSON format, passed as -config
    #[arg(long)]
    pub config: Option<String>,
    /// Regular expression matching the names of headers to output diagnostics from
    #[arg(long)]
    pub header_filter: Option<String>,
    /// Merge the exported fixes of every file into this YAML file
    #[arg(long, value_name = "FILE")]
    pub export_fixes: Option<PathBuf>,
    /// Number of clang-tidy instances to run in parallel
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,
    /// Apply fix-its with clang-apply-replacements
    #[arg(long)]
    pub fix: bool,
    /// Reformat code after applying fixes
    #[arg(long)]
    pub format: bool,
    /// The style of reformat code after applying fixes
    #[arg(long)]
    pub style: Option<String>,
    /// Directory containing compile_commands.json
    #[arg(short = 'p', long, value_name = "DIR")]
    pub build_path: Option<PathBuf>,
    /// Additional argument to append to the compiler command line
    #[arg(long, value_name = "ARG", allow_hyphen_values = true)]
    pub extra_arg: Vec<String>,
    /// Additional argument to prepend to the compiler command line
    #[arg(long, value_name = "ARG", allow_hyphen_values = true)]
    pub extra_arg_before: Vec<String>,
    /// Run clang-tidy in quiet mode
    #[arg(long)]
    pub quiet: bool,
    /// Regexes selecting the files to process (default: all)
    #[arg(value_name = "REGEX")]
    pub files: Vec<String>,
}

impl RunArgs {
    /// Whether clang-tidy must export fixes, either to merge or to apply them.
    #[must_use]
    pub fn collects_fixes(&self) -> bool {
        self.fix || self.export_fixes.is_some()
    }
}
