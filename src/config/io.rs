// src/config/io.rs
use super::types::{Config, TidyToml};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub const CONFIG_FILE: &str = "tidyrun.toml";

/// Loads `tidyrun.toml` from `dir` into `config` if the file exists.
pub fn load_toml_config(config: &mut Config, dir: &Path) {
    let path = dir.join(CONFIG_FILE);
    let Ok(content) = fs::read_to_string(&path) else {
        debug!(path = %path.display(), "no config file");
        return;
    };
    parse_toml(config, &content);
}

/// Applies TOML content to `config`. Malformed content is reported and
/// leaves `config` unchanged.
pub fn parse_toml(config: &mut Config, content: &str) {
    match toml::from_str::<TidyToml>(content) {
        Ok(parsed) => {
            config.tool = parsed.tool;
            config.run = parsed.run;
        }
        Err(e) => warn!("ignoring malformed {CONFIG_FILE}: {e}"),
    }
}

/// Renders the effective configuration in `tidyrun.toml` form.
///
/// # Errors
/// Returns error if serialization fails.
pub fn to_toml(config: &Config) -> Result<String, toml::ser::Error> {
    let file = TidyToml {
        tool: config.tool.clone(),
        run: config.run.clone(),
    };
    toml::to_string_pretty(&file)
}
