use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

const ENV_PREFIX: &str = "CITYCAST";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Provider endpoints and request settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Presentation settings
    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which clock the current hour is taken from when matching the hourly series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HourReference {
    /// The caller's clock in UTC.
    #[default]
    Utc,
    /// UTC shifted by the offset the forecast provider reports for the location.
    Location,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Geocoding search endpoint
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// Forecast endpoint
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    /// Maximum number of geocoding candidates requested
    #[serde(default = "default_result_count")]
    pub result_count: u32,

    /// Language used for place names in geocoding results
    #[serde(default = "default_language")]
    pub language: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub hour_reference: HourReference,
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_result_count() -> u32 {
    10
}

fn default_language() -> String {
    "en".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            result_count: default_result_count(),
            language: default_language(),
            request_timeout_secs: default_request_timeout_secs(),
            hour_reference: HourReference::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// chrono format pattern for sunrise/sunset
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

fn default_time_format() -> String {
    "%-I:%M:%S %p".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            time_format: default_time_format(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, writing defaults there first if the
    /// file is missing. `CITYCAST__<SECTION>__<KEY>` environment variables
    /// override file values.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No config at {}, writing defaults", path.display());
            Self::default().save_to(path)?;
        }

        let config: Config = ::config::Config::builder()
            .add_source(::config::File::from(path).format(::config::FileFormat::Toml))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|built| built.try_deserialize())
            .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;

        Ok(config)
    }

    /// Validate and log any warnings
    ///
    /// Call after logging is initialized so warnings are not lost.
    /// Returns an error if validation fails with critical errors.
    pub fn ensure_valid(&self) -> Result<ValidationResult> {
        let validation = self.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(validation)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        validate_url(&self.weather.geocoding_url, "weather.geocoding_url", &mut result);
        validate_url(&self.weather.forecast_url, "weather.forecast_url", &mut result);

        // The geocoding API caps `count` at 100
        if self.weather.result_count == 0 || self.weather.result_count > 100 {
            result.add_error(
                "weather.result_count",
                "Result count must be between 1 and 100",
            );
        } else if self.weather.result_count == 1 {
            result.add_warning(
                "weather.result_count",
                "Only one candidate requested; non-city matches will hide cities",
            );
        }

        if self.weather.language.trim().is_empty() {
            result.add_error("weather.language", "Language must not be empty");
        }

        if self.weather.request_timeout_secs == 0 {
            result.add_error(
                "weather.request_timeout_secs",
                "Request timeout must be greater than 0",
            );
        } else if self.weather.request_timeout_secs > 120 {
            result.add_warning(
                "weather.request_timeout_secs",
                "Request timeout is more than 2 minutes",
            );
        }

        if StrftimeItems::new(&self.ui.time_format).any(|item| matches!(item, Item::Error)) {
            result.add_error(
                "ui.time_format",
                format!("Invalid time format: {}", self.ui.time_format),
            );
        }

        if tracing_subscriber::EnvFilter::try_new(&self.logging.level).is_err() {
            result.add_error(
                "logging.level",
                format!("Invalid log filter: {}", self.logging.level),
            );
        }

        result
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("citycast");

        Ok(config_dir.join("config.toml"))
    }
}

/// Validate a URL field
fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }

            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Held by every test that loads through the environment source.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.weather.forecast_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.forecast_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.weather.geocoding_url = "ftp://geocoding.example".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_result_count_bounds() {
        let mut config = Config::default();
        config.weather.result_count = 0;
        assert!(!config.validate().is_valid());

        config.weather.result_count = 101;
        assert!(!config.validate().is_valid());

        config.weather.result_count = 1;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "weather.result_count"));
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let mut config = Config::default();
        config.weather.request_timeout_secs = 0;
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "weather.request_timeout_secs"));
    }

    #[test]
    fn test_bad_time_format_is_error() {
        let mut config = Config::default();
        config.ui.time_format = "%Q".to_string();
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "ui.time_format"));
    }

    #[test]
    fn test_ensure_valid_rejects_errors() {
        let mut config = Config::default();
        config.weather.forecast_url = "not-a-url".to_string();
        let err = config.ensure_valid().unwrap_err();
        assert!(err.to_string().contains("weather.forecast_url"));
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Invalid(_))
        ));

        assert!(Config::default().ensure_valid().is_ok());
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }

    #[test]
    fn test_load_from_missing_file_writes_defaults() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.weather.result_count, 10);
        assert_eq!(config.weather.hour_reference, HourReference::Utc);
    }

    #[test]
    fn test_load_from_partial_file_fills_defaults() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[weather]\nforecast_url = \"http://localhost:9000/v1/forecast\"\nhour_reference = \"location\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.weather.forecast_url, "http://localhost:9000/v1/forecast");
        assert_eq!(config.weather.hour_reference, HourReference::Location);
        assert_eq!(config.weather.geocoding_url, default_geocoding_url());
        assert_eq!(config.ui.time_format, "%-I:%M:%S %p");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_environment_overrides_file() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather]\nresult_count = 20\nlanguage = \"fr\"\n").unwrap();

        std::env::set_var("CITYCAST__WEATHER__RESULT_COUNT", "5");
        std::env::set_var("CITYCAST__UI__TIME_FORMAT", "%H:%M");
        let loaded = Config::load_from(&path);
        std::env::remove_var("CITYCAST__WEATHER__RESULT_COUNT");
        std::env::remove_var("CITYCAST__UI__TIME_FORMAT");

        let config = loaded.unwrap();
        assert_eq!(config.weather.result_count, 5);
        assert_eq!(config.ui.time_format, "%H:%M");
        assert_eq!(config.weather.language, "fr");
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather\nresult_count = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::ParseError(_))
        ));
    }
}
