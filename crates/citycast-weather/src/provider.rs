use citycast_core::{NetworkError, ReqwestErrorExt, WeatherConfig};
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,sunrise,sunset";

/// Forecast response from Open-Meteo, limited to the requested series
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    /// Offset of the location's timezone, present with `timezone=auto`
    #[serde(default)]
    pub utc_offset_seconds: i32,
    pub hourly: HourlySeries,
    pub daily: DailySeries,
}

/// Parallel hourly series; index i of every vector is the same hour
#[derive(Debug, Clone, Deserialize)]
pub struct HourlySeries {
    /// Local hour stamps, `YYYY-MM-DDTHH:MM`
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub relative_humidity_2m: Vec<Option<f64>>,
    pub wind_speed_10m: Vec<Option<f64>>,
}

/// Parallel daily series; index 0 is today
#[derive(Debug, Clone, Deserialize)]
pub struct DailySeries {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub sunrise: Vec<String>,
    pub sunset: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new(client: Client, config: &WeatherConfig) -> Self {
        Self {
            client,
            base_url: config.forecast_url.clone(),
        }
    }

    /// Fetch hourly and daily series for a coordinate pair.
    /// Sunrise/sunset come back in the location's own timezone.
    #[instrument(skip(self), level = "debug")]
    pub async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastResponse, NetworkError> {
        let latitude = latitude.to_string();
        let longitude = longitude.to_string();

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("hourly", HOURLY_FIELDS),
                ("daily", DAILY_FIELDS),
                ("timezone", "auto"),
                ("wind_speed_unit", "ms"),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(ReqwestErrorExt::into_network_error)?;

        response
            .json()
            .await
            .map_err(ReqwestErrorExt::into_network_error)
    }
}
