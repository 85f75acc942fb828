//! Two-stage lookup: place name → `ResolvedLocation` → `WeatherSummary`.
//!
//! The stages run strictly in sequence. Each step is reported as a
//! `PipelineEvent` so the caller can drive its display state from them.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use citycast_core::{
    HourReference, NetworkError, ReqwestErrorExt, UiConfig, WeatherConfig, WeatherError,
};
use reqwest::Client;

use crate::clock::{Clock, SystemClock};
use crate::geocode::GeocodingClient;
use crate::normalize;
use crate::provider::ForecastClient;
use crate::types::{PlaceQuery, ResolvedLocation, WeatherSummary};

const USER_AGENT: &str = concat!("citycast/", env!("CARGO_PKG_VERSION"));

/// The two provider calls the pipeline needs.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// # Errors
    ///
    /// `CityNotFound` or `GeocodeTransport`.
    async fn resolve(&self, query: &PlaceQuery) -> Result<ResolvedLocation, WeatherError>;

    /// # Errors
    ///
    /// `ForecastTransport`, including responses missing a needed value.
    async fn weather_for(&self, location: &ResolvedLocation)
        -> Result<WeatherSummary, WeatherError>;
}

/// What happened to a query so far.
#[derive(Debug)]
pub enum PipelineEvent {
    /// Geocoding picked a city; the forecast request follows.
    Resolved(ResolvedLocation),
    /// Terminal: weather is ready.
    Summarised(WeatherSummary),
    /// Terminal: the lookup stopped here.
    Failed(WeatherError),
}

impl PipelineEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Resolved(_))
    }
}

/// Run the lookup for `query`, handing every event to `emit` in order.
///
/// Emits `Resolved` then `Summarised`, or a single `Failed` for a geocoding
/// problem, or `Resolved` then `Failed` for a forecast problem.
pub async fn run<F>(source: &dyn WeatherSource, query: &PlaceQuery, mut emit: F)
where
    F: FnMut(PipelineEvent) + Send,
{
    let location = match source.resolve(query).await {
        Ok(location) => location,
        Err(e) => {
            emit(PipelineEvent::Failed(e));
            return;
        }
    };

    emit(PipelineEvent::Resolved(location.clone()));

    match source.weather_for(&location).await {
        Ok(summary) => emit(PipelineEvent::Summarised(summary)),
        Err(e) => emit(PipelineEvent::Failed(e)),
    }
}

/// `WeatherSource` backed by the Open-Meteo geocoding and forecast APIs.
#[derive(Debug, Clone)]
pub struct OpenMeteo {
    geocoding: GeocodingClient,
    forecast: ForecastClient,
    clock: Arc<dyn Clock>,
    hour_reference: HourReference,
    time_format: String,
}

impl OpenMeteo {
    /// # Errors
    ///
    /// Fails only when the HTTP client cannot be built.
    pub fn new(weather: &WeatherConfig, ui: &UiConfig) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(weather.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(ReqwestErrorExt::into_network_error)?;

        Ok(Self {
            geocoding: GeocodingClient::new(client.clone(), weather),
            forecast: ForecastClient::new(client, weather),
            clock: Arc::new(SystemClock),
            hour_reference: weather.hour_reference,
            time_format: ui.time_format.clone(),
        })
    }

    /// Replace the system clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

#[async_trait]
impl WeatherSource for OpenMeteo {
    async fn resolve(&self, query: &PlaceQuery) -> Result<ResolvedLocation, WeatherError> {
        self.geocoding.resolve(query).await
    }

    async fn weather_for(
        &self,
        location: &ResolvedLocation,
    ) -> Result<WeatherSummary, WeatherError> {
        let forecast = self
            .forecast
            .forecast(location.latitude, location.longitude)
            .await
            .map_err(WeatherError::ForecastTransport)?;

        normalize::summarize(
            &forecast,
            self.clock.now(),
            self.hour_reference,
            &self.time_format,
        )
        .map_err(WeatherError::ForecastTransport)
    }
}
