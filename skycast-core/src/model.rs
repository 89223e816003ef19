use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Placeholder for place names the upstream services could not provide.
pub const UNKNOWN: &str = "Unknown";

/// A raw latitude/longitude pair, before any place name is attached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A resolved place. `city` and `country` are never empty: absent upstream
/// data is replaced by [`UNKNOWN`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Location for coordinates that could not be reverse geocoded.
    #[must_use]
    pub fn unresolved(latitude: f64, longitude: f64) -> Self {
        Self {
            city: UNKNOWN.to_string(),
            country: UNKNOWN.to_string(),
            latitude,
            longitude,
        }
    }
}

/// Current conditions at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub weather_code: i32,
    pub weather_condition: String,
    pub wind_speed: Option<f64>,
    pub humidity: Option<f64>,
    pub location: Location,
}

/// One day of the forecast window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub max_temperature: f64,
    pub min_temperature: f64,
    pub weather_code: i32,
    pub weather_condition: String,
}

/// Multi-day forecast, days in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastData {
    pub days: Vec<ForecastDay>,
    pub location: Location,
}
