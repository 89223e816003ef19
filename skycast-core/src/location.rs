use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, error};

use crate::config::Config;
use crate::error::{LookupError, PositionError, TransportError};
use crate::model::{Coordinates, Location, UNKNOWN};
use crate::position::PositionSource;
use crate::transport::{QueryValue, Transport};

const SEARCH_FALLBACK: &str = "Failed to search for cities";
const SEARCH_RESULT_COUNT: u32 = 5;
const REVERSE_ZOOM: u32 = 10;

/// Resolves user input to [`Location`] values: forward search by name,
/// reverse geocoding of coordinates, and the device position.
///
/// The three operations are independent; none caches or calls the others.
#[derive(Debug, Clone)]
pub struct LocationService {
    transport: Arc<dyn Transport>,
    position: Arc<dyn PositionSource>,
    config: Arc<Config>,
}

#[derive(Debug, Deserialize)]
struct GcSearchResponse {
    results: Option<Vec<GcPlace>>,
}

#[derive(Debug, Deserialize)]
struct GcPlace {
    name: Option<String>,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct NmReverseResponse {
    address: Option<NmAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct NmAddress {
    city: Option<String>,
    town: Option<String>,
    municipality: Option<String>,
    country: Option<String>,
}

impl LocationService {
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        position: Arc<dyn PositionSource>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            transport,
            position,
            config,
        }
    }

    /// Search for places matching a free-text query.
    ///
    /// A query that trims to nothing returns an empty list without touching
    /// the network. Upstream failures propagate as [`LookupError`].
    pub async fn search_by_name(&self, query: &str) -> Result<Vec<Location>, LookupError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        debug!(query, "searching for places");

        let params = [
            ("name", QueryValue::from(query)),
            ("count", QueryValue::from(SEARCH_RESULT_COUNT)),
            (
                "language",
                QueryValue::from(self.config.lookup.language.as_str()),
            ),
            (
                "format",
                QueryValue::from(self.config.lookup.format.as_str()),
            ),
        ];

        let payload = self
            .transport
            .get_json(&self.config.search_url(), &params)
            .await
            .map_err(|err| {
                error!(query, error = %err, "city search failed");
                LookupError::wrap(err, SEARCH_FALLBACK)
            })?;

        let parsed: GcSearchResponse = serde_json::from_value(payload).map_err(|err| {
            error!(query, error = %err, "city search returned an unexpected payload");
            LookupError::wrap(err, SEARCH_FALLBACK)
        })?;

        let locations = parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .map(|place| Location {
                city: place.name.unwrap_or_else(|| UNKNOWN.to_string()),
                country: place.country.unwrap_or_else(|| UNKNOWN.to_string()),
                latitude: place.latitude,
                longitude: place.longitude,
            })
            .collect();

        Ok(locations)
    }

    /// Resolve the device's current position, making exactly one attempt.
    pub async fn current_position(&self) -> Result<Coordinates, LookupError> {
        self.position.current_position().await.map_err(|err| {
            error!(error = %err, "device position lookup failed");
            match err {
                PositionError::Unsupported => {
                    LookupError::new("Geolocation is not supported on this device")
                }
                PositionError::Device(message) => {
                    LookupError::new(format!("Failed to get location: {message}"))
                }
            }
        })
    }

    /// Resolve coordinates to a named location via reverse geocoding.
    ///
    /// Never fails: when the upstream call or its payload is unusable, the
    /// returned location carries `"Unknown"` placeholders with the input
    /// coordinates preserved verbatim. Coordinates alone are still enough
    /// for a weather lookup, so a geocoding outage must not block one.
    pub async fn resolve_from_coordinates(&self, latitude: f64, longitude: f64) -> Location {
        match self.reverse_geocode(latitude, longitude).await {
            Ok(location) => location,
            Err(err) => {
                error!(latitude, longitude, error = %err, "reverse geocoding failed, using placeholders");
                Location::unresolved(latitude, longitude)
            }
        }
    }

    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Location, TransportError> {
        let params = [
            (
                "format",
                QueryValue::from(self.config.lookup.format.as_str()),
            ),
            ("lat", QueryValue::from(latitude)),
            ("lon", QueryValue::from(longitude)),
            ("zoom", QueryValue::from(REVERSE_ZOOM)),
            (
                "accept-language",
                QueryValue::from(self.config.lookup.language.as_str()),
            ),
        ];

        let payload = self
            .transport
            .get_json(&self.config.reverse_url(), &params)
            .await?;

        let parsed: NmReverseResponse = serde_json::from_value(payload)?;
        let address = parsed.address.unwrap_or_default();

        Ok(Location {
            city: address
                .city
                .or(address.town)
                .or(address.municipality)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            country: address.country.unwrap_or_else(|| UNKNOWN.to_string()),
            latitude,
            longitude,
        })
    }
}
