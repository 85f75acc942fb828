//! Plain-text rendering of the display state: a heading, then either a
//! status line or the Temperature, Humidity and Wind & Sun panels.

use std::fmt::Write;

use citycast_weather::{ResolvedLocation, WeatherSummary};

use crate::display_state::DisplayState;

pub fn render(state: &DisplayState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Weather for {}", state.query().unwrap_or("..."));

    match state {
        DisplayState::Idle => {}
        DisplayState::Loading { .. } => {
            out.push_str("Loading weather data...\n");
        }
        DisplayState::Empty { .. } => {
            out.push_str("No data available\n");
        }
        DisplayState::Error { message, .. } => {
            let _ = writeln!(out, "{message}");
        }
        DisplayState::Ready {
            location, summary, ..
        } => render_panels(&mut out, location, summary),
    }

    out
}

fn render_panels(out: &mut String, location: &ResolvedLocation, summary: &WeatherSummary) {
    let _ = writeln!(
        out,
        "{} ({:.4}, {:.4})",
        location.display_name(),
        location.latitude,
        location.longitude
    );

    panel(
        out,
        "Temperature",
        &format!("{} °C", summary.current_temperature),
        &[
            format!("Current: {} °C", summary.current_temperature),
            format!("Min: {} °C", summary.temp_min),
            format!("Max: {} °C", summary.temp_max),
        ],
    );
    panel(
        out,
        "Humidity",
        &format!("{} %", summary.humidity),
        &[
            format!("Humidity: {} %", summary.humidity),
            format!("Wind: {} m/s", summary.wind_speed),
        ],
    );
    panel(
        out,
        "Wind & Sun",
        &format!("{} m/s", summary.wind_speed),
        &[
            format!("Wind speed: {} m/s", summary.wind_speed),
            format!("Sunrise: {}", summary.sunrise),
            format!("Sunset: {}", summary.sunset),
        ],
    );
}

fn panel(out: &mut String, title: &str, headline: &str, lines: &[String]) {
    let _ = writeln!(out, "\n[ {title} ]");
    let _ = writeln!(out, "  {headline}");
    for line in lines {
        let _ = writeln!(out, "  {line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready() -> DisplayState {
        DisplayState::Ready {
            query: "Paris".into(),
            location: ResolvedLocation {
                latitude: 48.8566,
                longitude: 2.3522,
                name: "Paris".into(),
                country: Some("France".into()),
            },
            summary: WeatherSummary {
                current_temperature: 15.0,
                humidity: 60.0,
                wind_speed: 3.5,
                temp_min: 10.0,
                temp_max: 18.0,
                sunrise: "8:09:00 AM".into(),
                sunset: "7:06:00 PM".into(),
            },
        }
    }

    #[test]
    fn idle_shows_placeholder_heading() {
        assert_eq!(render(&DisplayState::Idle), "Weather for ...\n");
    }

    #[test]
    fn loading_and_empty_status_lines() {
        let loading = DisplayState::Loading {
            query: "Paris".into(),
            location: None,
        };
        assert_eq!(render(&loading), "Weather for Paris\nLoading weather data...\n");

        let empty = DisplayState::Empty {
            query: "Paris".into(),
        };
        assert!(render(&empty).ends_with("No data available\n"));
    }

    #[test]
    fn error_shows_message_only() {
        let state = DisplayState::Error {
            query: "Atlantis".into(),
            message: "City not found".into(),
        };
        let text = render(&state);
        assert_eq!(text, "Weather for Atlantis\nCity not found\n");
        assert!(!text.contains("Temperature"));
    }

    #[test]
    fn ready_shows_three_panels() {
        let text = render(&ready());

        assert!(text.starts_with("Weather for Paris\nParis, France (48.8566, 2.3522)\n"));
        assert!(text.contains("[ Temperature ]\n  15 °C\n  Current: 15 °C\n  Min: 10 °C\n  Max: 18 °C\n"));
        assert!(text.contains("[ Humidity ]\n  60 %\n  Humidity: 60 %\n  Wind: 3.5 m/s\n"));
        assert!(text.contains("[ Wind & Sun ]\n  3.5 m/s\n"));
        assert!(text.contains("Sunrise: 8:09:00 AM"));
        assert!(text.contains("Sunset: 7:06:00 PM"));
    }
}
