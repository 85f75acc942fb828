//! Centralized error types for citycast.
//!
//! This module provides a typed error hierarchy that:
//! - Keeps the lookup failures (not found, geocoding, forecast) distinct
//! - Provides the short messages shown in the display state
//! - Preserves the underlying transport detail for logging

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get a message suitable for the terminal.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Weather lookup error: {0}")]
    Weather(#[from] WeatherError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Sort an `anyhow` error from config loading into the matching variant.
    ///
    /// Typed config failures and IO failures keep their own variants; anything
    /// else becomes `Other`.
    pub fn from_config_load(err: anyhow::Error) -> Self {
        let err = match err.downcast::<ConfigError>() {
            Ok(config) => return AppError::Config(config),
            Err(err) => err,
        };
        match err.downcast::<std::io::Error>() {
            Ok(io) => AppError::Io(io),
            Err(err) => AppError::Other(err),
        }
    }

    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Network-related errors (HTTP, connectivity, decoding).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The server is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The request failed. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No configuration directory on this platform")]
    NoConfigDir,

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NoConfigDir => "No configuration directory found. Pass --config <PATH>.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Failures of a single city lookup.
///
/// Every variant is terminal for the query that produced it and none is
/// retried. The user message is what the display state shows.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No candidate with an accepted feature code (or no candidate at all).
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Geocoding request failed: {0}")]
    GeocodeTransport(#[source] NetworkError),

    #[error("Forecast request failed: {0}")]
    ForecastTransport(#[source] NetworkError),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::CityNotFound(_) => "City not found",
            WeatherError::GeocodeTransport(_) => "Failed to fetch coordinates",
            WeatherError::ForecastTransport(_) => "Failed to fetch weather",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
