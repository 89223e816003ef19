use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate};
use serde::Deserialize;
use tracing::{debug, error};

use crate::conditions::condition_for_code;
use crate::config::Config;
use crate::error::LookupError;
use crate::location::LocationService;
use crate::model::{CurrentWeather, ForecastData, ForecastDay};
use crate::transport::{QueryValue, Transport};

const CURRENT_FIELDS: &str = "temperature_2m,weather_code,wind_speed_10m,relative_humidity_2m";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weather_code";
const CURRENT_FALLBACK: &str = "Failed to fetch weather data";
const FORECAST_FALLBACK: &str = "Failed to fetch forecast data";

/// Length of the requested forecast window, in days, inclusive of today.
const FORECAST_WINDOW_DAYS: i64 = 5;

/// Retrieves current conditions and daily forecasts for a coordinate pair,
/// attaching the reverse-geocoded location to every result.
#[derive(Debug, Clone)]
pub struct WeatherService {
    transport: Arc<dyn Transport>,
    locations: LocationService,
    config: Arc<Config>,
}

#[derive(Debug, Deserialize)]
struct OmCurrentResponse {
    current: OmCurrent,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    weather_code: i32,
    wind_speed_10m: Option<f64>,
    relative_humidity_2m: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    daily: OmDaily,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<NaiveDate>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    weather_code: Vec<i32>,
}

impl WeatherService {
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        locations: LocationService,
        config: Arc<Config>,
    ) -> Self {
        Self {
            transport,
            locations,
            config,
        }
    }

    /// Fetch current conditions for the given coordinates.
    pub async fn fetch_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentWeather, LookupError> {
        let location = self
            .locations
            .resolve_from_coordinates(latitude, longitude)
            .await;

        debug!(latitude, longitude, "fetching current conditions");

        let params = [
            ("latitude", QueryValue::from(latitude)),
            ("longitude", QueryValue::from(longitude)),
            ("current", QueryValue::from(CURRENT_FIELDS)),
        ];

        let payload = self
            .transport
            .get_json(&self.config.forecast_url(), &params)
            .await
            .map_err(|err| {
                error!(latitude, longitude, error = %err, "current weather fetch failed");
                LookupError::wrap(err, CURRENT_FALLBACK)
            })?;

        let parsed: OmCurrentResponse = serde_json::from_value(payload).map_err(|err| {
            error!(latitude, longitude, error = %err, "current weather payload was unexpected");
            LookupError::wrap(err, CURRENT_FALLBACK)
        })?;

        let current = parsed.current;
        Ok(CurrentWeather {
            temperature: current.temperature_2m,
            weather_code: current.weather_code,
            weather_condition: condition_for_code(current.weather_code).to_string(),
            wind_speed: current.wind_speed_10m,
            humidity: current.relative_humidity_2m,
            location,
        })
    }

    /// Fetch the daily forecast for the window starting today.
    pub async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastData, LookupError> {
        let location = self
            .locations
            .resolve_from_coordinates(latitude, longitude)
            .await;

        let (start, end) = forecast_window(Local::now().date_naive());
        debug!(latitude, longitude, %start, %end, "fetching daily forecast");

        let params = [
            ("latitude", QueryValue::from(latitude)),
            ("longitude", QueryValue::from(longitude)),
            ("daily", QueryValue::from(DAILY_FIELDS)),
            (
                "start_date",
                QueryValue::from(start.format("%Y-%m-%d").to_string()),
            ),
            (
                "end_date",
                QueryValue::from(end.format("%Y-%m-%d").to_string()),
            ),
        ];

        let payload = self
            .transport
            .get_json(&self.config.forecast_url(), &params)
            .await
            .map_err(|err| {
                error!(latitude, longitude, error = %err, "forecast fetch failed");
                LookupError::wrap(err, FORECAST_FALLBACK)
            })?;

        let parsed: OmForecastResponse = serde_json::from_value(payload).map_err(|err| {
            error!(latitude, longitude, error = %err, "forecast payload was unexpected");
            LookupError::wrap(err, FORECAST_FALLBACK)
        })?;

        // The upstream returns parallel arrays keyed by the `time` axis; the
        // day count follows whatever length it sends back.
        let daily = parsed.daily;
        let days: Vec<ForecastDay> = daily
            .time
            .iter()
            .zip(daily.temperature_2m_max.iter())
            .zip(daily.temperature_2m_min.iter())
            .zip(daily.weather_code.iter())
            .map(|(((date, max), min), code)| ForecastDay {
                date: *date,
                max_temperature: *max,
                min_temperature: *min,
                weather_code: *code,
                weather_condition: condition_for_code(*code).to_string(),
            })
            .collect();

        Ok(ForecastData { days, location })
    }
}

/// Inclusive date window for a forecast request starting at `today`.
fn forecast_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today, today + Duration::days(FORECAST_WINDOW_DAYS - 1))
}
