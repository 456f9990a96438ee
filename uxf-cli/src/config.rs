//! Configuration module for the uxf-cli CLI.
//!
//! Holds the default [`uxf::Format`] settings so a project can commit a
//! `uxf-cli.toml` instead of repeating `--indent`/`--wrap-width`/etc. on
//! every invocation.

use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "uxf-cli.toml";

/// Application configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Global verbose setting.
    #[serde(default)]
    pub verbose: bool,

    /// Default formatting options, applied unless overridden on the
    /// command line.
    #[serde(default)]
    pub format: FormatConfig,
}

/// Mirrors [`uxf::Format`]'s fields so they can be read from TOML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormatConfig {
    #[serde(default = "default_indent")]
    pub indent: String,

    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,

    #[serde(default)]
    pub realdp: Option<u32>,

    #[serde(default = "default_max_short_len")]
    pub max_short_len: usize,

    #[serde(default)]
    pub use_true_false: bool,
}

fn default_indent() -> String {
    "  ".to_string()
}

fn default_wrap_width() -> usize {
    96
}

fn default_max_short_len() -> usize {
    32
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            format: FormatConfig::default(),
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            wrap_width: default_wrap_width(),
            realdp: None,
            max_short_len: default_max_short_len(),
            use_true_false: false,
        }
    }
}

impl FormatConfig {
    pub fn to_format(&self) -> uxf::Format {
        uxf::Format::new()
            .with_indent(self.indent.clone())
            .with_wrap_width(self.wrap_width)
            .with_realdp(self.realdp)
            .with_max_short_len(self.max_short_len)
            .with_use_true_false(self.use_true_false)
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Searches the current directory, then the user's config
    /// directory. Returns the default configuration if no file is
    /// found.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::Config(format!(
                "configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("failed to parse configuration: {}", e)))
    }

    fn check_current_dir_config() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    fn check_system_config() -> Option<PathBuf> {
        config_dir()
            .map(|dir| dir.join("uxf-cli").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::check_current_dir_config().or_else(Self::check_system_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_format_defaults() {
        let config = Config::default();
        assert_eq!(config.format.indent, "  ");
        assert_eq!(config.format.wrap_width, 96);
        assert_eq!(config.format.max_short_len, 32);
        assert!(!config.format.use_true_false);
    }

    #[test]
    fn loads_a_toml_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("uxf-cli.toml");
        std::fs::write(&path, "verbose = true\n[format]\nwrap_width = 64\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert!(config.verbose);
        assert_eq!(config.format.wrap_width, 64);
        assert_eq!(config.format.indent, "  ");
    }

    #[test]
    fn missing_config_path_is_an_error() {
        let result = Config::load_from_path(Path::new("/nonexistent/uxf-cli.toml"));
        assert!(result.is_err());
    }
}
