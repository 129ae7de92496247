// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::io::CONFIG_FILE;
pub use self::types::{Config, RunConfig, TidyToml, ToolConfig};
use std::path::Path;

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config and applies `tidyrun.toml` from the working directory.
    #[must_use]
    pub fn load() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
        Self::load_from(&cwd)
    }

    /// Creates a config and applies `tidyrun.toml` from `dir`.
    #[must_use]
    pub fn load_from(dir: &Path) -> Self {
        let mut config = Self::new();
        io::load_toml_config(&mut config, dir);
        config
    }

    pub fn parse_toml(&mut self, content: &str) {
        io::parse_toml(self, content);
    }

    /// Effective configuration in `tidyrun.toml` form.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(io::to_toml(self)?)
    }
}
