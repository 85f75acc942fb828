use serde::{Deserialize, Serialize};

/// A trimmed, non-empty place name as submitted by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceQuery(String);

impl PlaceQuery {
    /// Trim `raw`; `None` when nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlaceQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// GeoNames feature code attached to a geocoding candidate
/// See: https://www.geonames.org/export/codes.html
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FeatureCode {
    /// PPLC
    Capital,
    /// PPLA
    AdminSeat,
    /// PPLA2
    SecondOrderAdminSeat,
    /// PPL
    PopulatedPlace,
    /// Anything else: rivers, regions, airports, lower-order seats
    Other(String),
}

impl FeatureCode {
    /// Whether the code denotes a city-like place we show weather for.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Capital => "PPLC",
            Self::AdminSeat => "PPLA",
            Self::SecondOrderAdminSeat => "PPLA2",
            Self::PopulatedPlace => "PPL",
            Self::Other(code) => code,
        }
    }
}

impl From<String> for FeatureCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "PPLC" => Self::Capital,
            "PPLA" => Self::AdminSeat,
            "PPLA2" => Self::SecondOrderAdminSeat,
            "PPL" => Self::PopulatedPlace,
            _ => Self::Other(code),
        }
    }
}

impl From<FeatureCode> for String {
    fn from(code: FeatureCode) -> Self {
        code.as_str().to_string()
    }
}

/// One candidate place returned by the geocoding provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub country: Option<String>,
    pub feature_code: Option<FeatureCode>,
}

impl GeocodeResult {
    pub fn is_city(&self) -> bool {
        self.feature_code
            .as_ref()
            .is_some_and(FeatureCode::is_accepted)
    }
}

/// The candidate picked for a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub country: Option<String>,
}

impl From<GeocodeResult> for ResolvedLocation {
    fn from(result: GeocodeResult) -> Self {
        Self {
            latitude: result.latitude,
            longitude: result.longitude,
            name: result.name,
            country: result.country,
        }
    }
}

impl ResolvedLocation {
    /// "Paris, France", or just the name when the provider gave no country.
    pub fn display_name(&self) -> String {
        match self.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }
}

/// Weather reduced to what the three panels show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    /// °C at the current hour (or the first forecast hour)
    pub current_temperature: f64,
    /// Relative humidity in %
    pub humidity: f64,
    /// m/s
    pub wind_speed: f64,
    /// Today's minimum, °C
    pub temp_min: f64,
    /// Today's maximum, °C
    pub temp_max: f64,
    /// Local time of day
    pub sunrise: String,
    /// Local time of day
    pub sunset: String,
}
