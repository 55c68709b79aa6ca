// RUNTIME PREFERENCES (User Experience)

use crate::provider::OptionType;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::env;
use std::path::{Path, PathBuf};

/// Errors raised while loading a runtime configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> crate::logging::Code {
        use crate::logging::codes;
        match self {
            Self::Io { .. } => codes::config::CONFIG_READ_ERROR,
            Self::Parse(_) | Self::Invalid { .. } => codes::config::INVALID_CONFIG,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Emit JSON lines instead of plain text
    pub use_structured_logging: bool,

    pub enable_console_logging: bool,

    /// Minimum level that reaches the logger
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    pub fn to_events_log_level(self) -> crate::logging::events::LogLevel {
        use crate::logging::events::LogLevel as EventsLogLevel;
        match self {
            LogLevel::Error => EventsLogLevel::Error,
            LogLevel::Warning => EventsLogLevel::Warning,
            LogLevel::Info => EventsLogLevel::Info,
            LogLevel::Debug => EventsLogLevel::Debug,
        }
    }
}

pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// How the CLI reports a parsed template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Cargo-style diagnostics plus construct counts
    Summary,
    /// The whole template tree as JSON
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputPreferences {
    pub format: OutputFormat,

    /// Stop printing diagnostics after this many (0 = unlimited)
    pub max_reported_errors: usize,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            format: env::var(env_vars::OUTPUT_FORMAT)
                .ok()
                .and_then(|v| match v.to_lowercase().as_str() {
                    "json" => Some(OutputFormat::Json),
                    "summary" => Some(OutputFormat::Summary),
                    _ => None,
                })
                .unwrap_or(OutputFormat::Summary),
            max_reported_errors: env::var(env_vars::OUTPUT_MAX_REPORTED_ERRORS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }
}

/// A provider made available to templates through configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDeclaration {
    /// Fully qualified name templates use in `provider:"..."`
    pub name: String,

    #[serde(default = "default_true")]
    pub diagram: bool,

    /// Extra option names the provider accepts and how their values are read
    #[serde(default)]
    pub options: BTreeMap<String, OptionType>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub logging: LoggingPreferences,
    pub output: OutputPreferences,
    pub providers: Vec<ProviderDeclaration>,
}

impl RuntimeConfig {
    /// Parse a configuration from TOML text; missing sections fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for provider in &self.providers {
            if provider.name.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    message: "provider name must not be empty".to_string(),
                });
            }
            if !seen.insert(provider.name.as_str()) {
                return Err(ConfigError::Invalid {
                    message: format!("provider '{}' is declared twice", provider.name),
                });
            }
        }
        Ok(())
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    pub const LOGGING_USE_STRUCTURED: &str = "DOCGEN_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "DOCGEN_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "DOCGEN_LOGGING_MIN_LEVEL";

    pub const OUTPUT_FORMAT: &str = "DOCGEN_OUTPUT_FORMAT";
    pub const OUTPUT_MAX_REPORTED_ERRORS: &str = "DOCGEN_OUTPUT_MAX_REPORTED_ERRORS";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("WARN"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("2"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_provider_declarations_from_toml() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [output]
            format = "json"

            [[providers]]
            name = "org.example.SiriusDiagramProvider"
            options = { layers = "expression", hideLegend = "string" }

            [[providers]]
            name = "org.example.TableProvider"
            diagram = false
            "#,
        )
        .unwrap();

        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.providers.len(), 2);
        assert!(config.providers[0].diagram);
        assert_eq!(
            config.providers[0].options.get("layers"),
            Some(&OptionType::Expression)
        );
        assert!(!config.providers[1].diagram);
    }

    #[test]
    fn test_duplicate_provider_rejected() {
        let result = RuntimeConfig::from_toml_str(
            r#"
            [[providers]]
            name = "a.B"
            [[providers]]
            name = "a.B"
            "#,
        );
        assert_matches!(result, Err(ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert_matches!(
            RuntimeConfig::from_toml_str("providers = 3"),
            Err(ConfigError::Parse(_))
        );
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nmax_reported_errors = 5").unwrap();

        let config = RuntimeConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.output.max_reported_errors, 5);
        assert!(config.providers.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = RuntimeConfig::from_toml_file(&dir.path().join("absent.toml"));
        assert_matches!(result, Err(ConfigError::Io { .. }));
    }
}
