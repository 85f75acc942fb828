//! Forward geocoding: turn a place name into coordinates.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use citycast_core::{NetworkError, ReqwestErrorExt, WeatherConfig, WeatherError};
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::types::{GeocodeResult, PlaceQuery, ResolvedLocation};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    /// Absent when nothing matched
    #[serde(default)]
    results: Option<Vec<GeocodeResult>>,
}

/// Pick the first candidate whose feature code marks it as a city.
///
/// First match in provider order wins, not the "best" one.
pub fn select_city(candidates: Vec<GeocodeResult>) -> Option<ResolvedLocation> {
    candidates
        .into_iter()
        .find(GeocodeResult::is_city)
        .map(ResolvedLocation::from)
}

#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
    count: u32,
    language: String,
}

impl GeocodingClient {
    pub fn new(client: Client, config: &WeatherConfig) -> Self {
        Self {
            client,
            base_url: config.geocoding_url.clone(),
            count: config.result_count,
            language: config.language.clone(),
        }
    }

    /// Fetch every candidate for `name`, in provider order.
    #[instrument(skip(self), level = "debug")]
    pub async fn search(&self, name: &str) -> Result<Vec<GeocodeResult>, NetworkError> {
        let count = self.count.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("name", name),
                ("count", count.as_str()),
                ("language", self.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(ReqwestErrorExt::into_network_error)?;

        let body: SearchResponse = response
            .json()
            .await
            .map_err(ReqwestErrorExt::into_network_error)?;

        let results = body.results.unwrap_or_default();
        tracing::debug!("Geocoding returned {} candidates", results.len());
        Ok(results)
    }

    /// Resolve a query to a single city.
    ///
    /// # Errors
    ///
    /// `GeocodeTransport` when the request or decoding fails, `CityNotFound`
    /// when no candidate carries an accepted feature code.
    pub async fn resolve(&self, query: &PlaceQuery) -> Result<ResolvedLocation, WeatherError> {
        let candidates = self
            .search(query.as_str())
            .await
            .map_err(WeatherError::GeocodeTransport)?;

        let location = select_city(candidates)
            .ok_or_else(|| WeatherError::CityNotFound(query.to_string()))?;

        tracing::info!(
            "Resolved {:?} to {} ({:.4}, {:.4})",
            query.as_str(),
            location.display_name(),
            location.latitude,
            location.longitude
        );
        Ok(location)
    }
}
