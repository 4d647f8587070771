//! Configuration management.
//!
//! Settings come from a TOML file:
//!
//! ```toml
//! data_file = "db.json"
//! clear_screen = true
//!
//! [logging]
//! format = "pretty"   # or "json"
//! level = "info"
//! file = "/tmp/chessmaker.log"
//! ```
//!
//! Missing keys keep their defaults. `CHESSMAKER_DATA_FILE` overrides
//! `data_file`.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding the document file.
pub const DATA_FILE_ENV: &str = "CHESSMAKER_DATA_FILE";

/// Environment variable pointing at the configuration file.
pub const CONFIG_PATH_ENV: &str = "CHESSMAKER_CONFIG_PATH";

/// Main configuration for chessmaker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessmakerConfig {
    /// Path to the JSON document file.
    pub data_file: PathBuf,
    /// Logging settings.
    pub logging: LoggingSettings,
    /// Whether titled screens clear the terminal first.
    pub clear_screen: bool,
}

/// Logging section of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoggingSettings {
    /// Output format: `pretty` or `json`.
    pub format: Option<String>,
    /// Filter directive, e.g. `info` or `chessmaker=debug`.
    pub level: Option<String>,
    /// Log file; logs go to stderr when unset.
    pub file: Option<String>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Document file.
    pub data_file: Option<String>,
    /// Screen clearing.
    pub clear_screen: Option<bool>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

impl Default for ChessmakerConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("db.json"),
            logging: LoggingSettings::default(),
            clear_screen: true,
        }
    }
}

impl ChessmakerConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration file.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;
        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the platform config directory
    /// (`chessmaker/config.toml`).
    ///
    /// Returns the default configuration if no readable file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let platform_config = base_dirs.config_dir().join("chessmaker").join("config.toml");
        if platform_config.exists() {
            match Self::load_from_file(&platform_config) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(error = %e, "Ignoring unreadable config file"),
            }
        }

        Self::default()
    }

    /// Applies environment overrides.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up through `lookup`.
    #[must_use]
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(data_file) = lookup(DATA_FILE_ENV).filter(|v| !v.trim().is_empty()) {
            self.data_file = PathBuf::from(data_file);
        }
        self
    }

    /// Sets the document file.
    #[must_use]
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    /// Converts a `ConfigFile` to `ChessmakerConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(data_file) = file.data_file {
            config.data_file = PathBuf::from(data_file);
        }
        if let Some(clear_screen) = file.clear_screen {
            config.clear_screen = clear_screen;
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        config
    }
}
