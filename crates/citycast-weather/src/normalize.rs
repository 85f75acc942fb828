//! Reduce raw forecast series to a `WeatherSummary`.

use std::fmt::Write;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use citycast_core::{HourReference, NetworkError};

use crate::provider::ForecastResponse;
use crate::types::WeatherSummary;

const HOUR_KEY_FORMAT: &str = "%Y-%m-%dT%H:00";

/// `now` truncated to the hour in the same shape as `hourly.time` entries.
pub fn current_hour_key(
    now: DateTime<Utc>,
    reference: HourReference,
    utc_offset_seconds: i32,
) -> String {
    let clock = match reference {
        HourReference::Utc => now.naive_utc(),
        HourReference::Location => {
            now.naive_utc() + Duration::seconds(i64::from(utc_offset_seconds))
        }
    };
    clock.format(HOUR_KEY_FORMAT).to_string()
}

/// Index of `key` in `times`, or 0 when the current hour is not in the series.
pub fn hour_index(times: &[String], key: &str) -> usize {
    times.iter().position(|t| t == key).unwrap_or(0)
}

/// Format a local `YYYY-MM-DDTHH:MM[:SS]` stamp as a time of day.
pub fn format_time_of_day(stamp: &str, pattern: &str) -> Option<String> {
    let parsed = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;

    let mut out = String::new();
    write!(out, "{}", parsed.format(pattern)).ok()?;
    Some(out)
}

fn value_at(series: &[Option<f64>], index: usize, field: &str) -> Result<f64, NetworkError> {
    series
        .get(index)
        .copied()
        .flatten()
        .ok_or_else(|| NetworkError::InvalidResponse(format!("{field}[{index}] is missing")))
}

fn time_at(series: &[String], field: &str, pattern: &str) -> Result<String, NetworkError> {
    let stamp = series
        .first()
        .ok_or_else(|| NetworkError::InvalidResponse(format!("{field}[0] is missing")))?;
    format_time_of_day(stamp, pattern)
        .ok_or_else(|| NetworkError::InvalidResponse(format!("{field}[0] is not a time: {stamp}")))
}

/// Build the summary for `now`.
///
/// Hourly values come from the current hour when the series has it and from
/// the first hour otherwise. Daily values always come from today (index 0).
///
/// # Errors
///
/// `InvalidResponse` when a value the summary needs is absent or null.
pub fn summarize(
    forecast: &ForecastResponse,
    now: DateTime<Utc>,
    reference: HourReference,
    time_format: &str,
) -> Result<WeatherSummary, NetworkError> {
    let hourly = &forecast.hourly;
    let daily = &forecast.daily;

    let key = current_hour_key(now, reference, forecast.utc_offset_seconds);
    let index = hour_index(&hourly.time, &key);
    if hourly.time.get(index).map(String::as_str) != Some(key.as_str()) {
        tracing::debug!("Hour {} not in series, using first forecast hour", key);
    }

    Ok(WeatherSummary {
        current_temperature: value_at(&hourly.temperature_2m, index, "hourly.temperature_2m")?,
        humidity: value_at(&hourly.relative_humidity_2m, index, "hourly.relative_humidity_2m")?,
        wind_speed: value_at(&hourly.wind_speed_10m, index, "hourly.wind_speed_10m")?,
        temp_min: value_at(&daily.temperature_2m_min, 0, "daily.temperature_2m_min")?,
        temp_max: value_at(&daily.temperature_2m_max, 0, "daily.temperature_2m_max")?,
        sunrise: time_at(&daily.sunrise, "daily.sunrise", time_format)?,
        sunset: time_at(&daily.sunset, "daily.sunset", time_format)?,
    })
}
