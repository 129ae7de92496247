use serde::{Deserialize, Serialize};

/// External binaries the runner drives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default = "default_clang_tidy")]
    pub clang_tidy_binary: String,
    #[serde(default = "default_apply_replacements")]
    pub apply_replacements_binary: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            clang_tidy_binary: default_clang_tidy(),
            apply_replacements_binary: default_apply_replacements(),
        }
    }
}

fn default_clang_tidy() -> String { "clang-tidy".to_string() }
fn default_apply_replacements() -> String { "clang-apply-replacements".to_string() }

/// Defaults for `tidyrun run`. Every field can be overridden on the command line.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// `-checks=` filter; clang-tidy's own default when unset.
    #[serde(default)]
    pub checks: Option<String>,
    /// `-config=` YAML/JSON string.
    #[serde(default)]
    pub config: Option<String>,
    /// `-header-filter=`; defaults to everything under the build path.
    #[serde(default)]
    pub header_filter: Option<String>,
    /// Parallel clang-tidy instances, 0 = one per CPU.
    #[serde(default)]
    pub jobs: usize,
    #[serde(default)]
    pub quiet: bool,
    #[serde(default)]
    pub extra_args: Vec<String>,
    #[serde(default)]
    pub extra_args_before: Vec<String>,
    /// Reformat code after applying fixes.
    #[serde(default)]
    pub format: bool,
    #[serde(default = "default_style")]
    pub style: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            checks: None,
            config: None,
            header_filter: None,
            jobs: 0,
            quiet: false,
            extra_args: Vec::new(),
            extra_args_before: Vec::new(),
            format: false,
            style: default_style(),
        }
    }
}

fn default_style() -> String { "file".to_string() }

/// On-disk layout of `tidyrun.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TidyToml {
    #[serde(default)]
    pub tool: ToolConfig,
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub tool: ToolConfig,
    pub run: RunConfig,
}
