//! Line-driven session: one place name per line, every settled state written
//! out as it happens.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::controller::WeatherController;
use crate::input::SearchInput;
use crate::render::render;

/// Submit every non-blank line of `reader` to `controller`, writing the
/// rendered state to `out` on each submission and each settled result.
///
/// A new line supersedes a lookup that is still running. Returns once the
/// input is exhausted and the last lookup has settled.
///
/// # Errors
///
/// Reading `reader` or writing `out` failed.
pub async fn run_lines<R, W>(
    controller: &mut WeatherController,
    reader: R,
    out: &mut W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let (query_tx, mut query_rx) = mpsc::unbounded_channel();
    let mut input = SearchInput::new(move |query| {
        let _ = query_tx.send(query);
    });
    let mut lines = reader.lines();

    write!(out, "{}", render(controller.state()))?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                input.set_draft(&line);
                if !input.submit() {
                    continue;
                }
                // The consumer sends synchronously, so the query is queued by now
                while let Ok(query) = query_rx.try_recv() {
                    controller.submit(query);
                    write!(out, "{}", render(controller.state()))?;
                }
            }
            Some(message) = controller.recv() => {
                if controller.apply(message) && !controller.state().is_loading() {
                    write!(out, "{}", render(controller.state()))?;
                }
            }
        }
    }

    if controller.current_ticket().is_some() {
        let state = controller.settle().await;
        write!(out, "{}", render(state))?;
    }

    tracing::info!("Input closed");
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_state::DisplayState;
    use async_trait::async_trait;
    use citycast_core::WeatherError;
    use citycast_weather::{PlaceQuery, ResolvedLocation, WeatherSource, WeatherSummary};
    use std::sync::Arc;

    /// Answers immediately for every city except "Atlantis".
    struct Instant;

    #[async_trait]
    impl WeatherSource for Instant {
        async fn resolve(&self, query: &PlaceQuery) -> Result<ResolvedLocation, WeatherError> {
            if query.as_str() == "Atlantis" {
                return Err(WeatherError::CityNotFound(query.to_string()));
            }
            Ok(ResolvedLocation {
                latitude: 1.0,
                longitude: 2.0,
                name: query.to_string(),
                country: None,
            })
        }

        async fn weather_for(
            &self,
            location: &ResolvedLocation,
        ) -> Result<WeatherSummary, WeatherError> {
            Ok(WeatherSummary {
                current_temperature: location.name.len() as f64,
                humidity: 40.0,
                wind_speed: 2.0,
                temp_min: 1.0,
                temp_max: 9.0,
                sunrise: "7:00:00 AM".into(),
                sunset: "5:00:00 PM".into(),
            })
        }
    }

    async fn session(input: &str) -> (WeatherController, String) {
        let mut controller = WeatherController::new(Arc::new(Instant));
        let mut out = Vec::new();
        run_lines(&mut controller, input.as_bytes(), &mut out)
            .await
            .unwrap();
        (controller, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn single_line_then_eof_is_looked_up() {
        for _ in 0..20 {
            let (controller, out) = session("Paris\n").await;

            assert_eq!(controller.state().query(), Some("Paris"));
            assert!(controller.state().summary().is_some());
            assert!(out.contains("Weather for Paris\nLoading weather data...\n"));
            assert!(out.contains("[ Temperature ]"));
        }
    }

    #[tokio::test]
    async fn last_line_wins() {
        for _ in 0..20 {
            let (controller, out) = session("Paris\nLondon\n").await;

            assert_eq!(controller.state().query(), Some("London"));
            assert_eq!(controller.state().summary().unwrap().current_temperature, 6.0);
            assert!(out.contains("Weather for London"));
            assert!(out.trim_end().ends_with("Sunset: 5:00:00 PM"));
        }
    }

    #[tokio::test]
    async fn blank_lines_submit_nothing() {
        let (controller, out) = session("\n   \n").await;

        assert_eq!(controller.state(), &DisplayState::Idle);
        assert_eq!(out, "Weather for ...\n");
    }

    #[tokio::test]
    async fn unknown_city_is_reported() {
        let (controller, out) = session("Atlantis").await;

        assert_eq!(controller.state().error_message(), Some("City not found"));
        assert!(out.ends_with("Weather for Atlantis\nCity not found\n"));
    }
}
