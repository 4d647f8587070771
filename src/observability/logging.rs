//! Structured logging configuration.

use crate::config::LoggingSettings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "CHESSMAKER_LOG";

/// Filter used when nothing else is configured.
pub const DEFAULT_FILTER: &str = "chessmaker=warn";

/// Filter used with `--verbose`.
pub const VERBOSE_FILTER: &str = "chessmaker=debug";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable, multi-line.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name; anything but `json` is pretty.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Event filter.
    pub filter: EnvFilter,
    /// Append-mode log file; stderr when unset.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Builds the logging configuration from settings and the environment.
    #[must_use]
    pub fn from_settings(settings: &LoggingSettings, verbose: bool) -> Self {
        Self::from_settings_with(settings, verbose, |key| std::env::var(key).ok())
    }

    /// Builds the logging configuration, reading variables through `lookup`.
    ///
    /// Filter precedence: `CHESSMAKER_LOG`, `RUST_LOG`, `--verbose`, the
    /// configured level, then [`DEFAULT_FILTER`]. A directive that does not
    /// parse falls through to the next one.
    #[must_use]
    pub fn from_settings_with<F>(settings: &LoggingSettings, verbose: bool, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let format = settings
            .format
            .as_deref()
            .map(LogFormat::parse)
            .unwrap_or_default();

        let directives = [
            lookup(LOG_ENV),
            lookup("RUST_LOG"),
            verbose.then(|| VERBOSE_FILTER.to_string()),
            settings.level.clone(),
        ];
        let filter = directives
            .into_iter()
            .flatten()
            .filter(|d| !d.trim().is_empty())
            .find_map(|d| EnvFilter::try_new(d).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

        let file = settings
            .file
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .map(PathBuf::from);

        Self {
            format,
            filter,
            file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(format: Option<&str>, level: Option<&str>, file: Option<&str>) -> LoggingSettings {
        LoggingSettings {
            format: format.map(str::to_string),
            level: level.map(str::to_string),
            file: file.map(str::to_string),
        }
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("other"), LogFormat::Pretty);
    }

    #[test]
    fn test_defaults() {
        let config = LoggingConfig::from_settings_with(&LoggingSettings::default(), false, |_| None);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.file.is_none());
        assert_eq!(config.filter.to_string(), DEFAULT_FILTER);
    }

    #[test]
    fn test_verbose_beats_configured_level() {
        let config =
            LoggingConfig::from_settings_with(&settings(None, Some("info"), None), true, |_| None);
        assert_eq!(config.filter.to_string(), VERBOSE_FILTER);
    }

    #[test]
    fn test_env_beats_everything() {
        let config = LoggingConfig::from_settings_with(
            &settings(Some("json"), Some("info"), Some("app.log")),
            true,
            |key| (key == LOG_ENV).then(|| "trace".to_string()),
        );
        assert_eq!(config.filter.to_string(), "trace");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file, Some(PathBuf::from("app.log")));
    }

    #[test]
    fn test_configured_level() {
        let config =
            LoggingConfig::from_settings_with(&settings(None, Some("info"), Some("")), false, |_| None);
        assert_eq!(config.filter.to_string(), "info");
        assert!(config.file.is_none());
    }
}
