//! Weather lookup for citycast
//!
//! Resolves a place name to a city via Open-Meteo geocoding, then reduces
//! the Open-Meteo forecast for it to a `WeatherSummary`.

pub mod clock;
pub mod geocode;
pub mod normalize;
pub mod pipeline;
pub mod provider;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use geocode::{select_city, GeocodingClient};
pub use pipeline::{OpenMeteo, PipelineEvent, WeatherSource};
pub use provider::{ForecastClient, ForecastResponse};
pub use types::*;
