//! Core library for the `skycast` weather lookup client.
//!
//! This crate defines:
//! - Configuration for the upstream weather and geocoding services
//! - The HTTP transport contract and its `reqwest`-backed implementation
//! - Location resolution (forward search, reverse geocoding, device position)
//! - Current-conditions and multi-day forecast retrieval
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod conditions;
pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod position;
pub mod transport;
pub mod weather;

#[cfg(test)]
pub(crate) mod testutil;

pub use conditions::condition_for_code;
pub use config::Config;
pub use error::{LookupError, PositionError, TransportError};
pub use location::LocationService;
pub use model::{Coordinates, CurrentWeather, ForecastData, ForecastDay, Location};
pub use position::{ConfiguredPositionSource, PositionSource};
pub use transport::{HttpTransport, QueryValue, Transport};
pub use weather::WeatherService;
