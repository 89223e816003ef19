use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use inquire::{Confirm, CustomType, Text};
use skycast_core::{
    Config, ConfiguredPositionSource, Coordinates, CurrentWeather, ForecastData, HttpTransport,
    Location, LocationService, WeatherService,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather lookup from the command line")]
pub struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search for places matching a name.
    Search {
        /// Free-text place name, e.g. "Berlin".
        query: String,
    },

    /// Show current conditions for a place or coordinates.
    Current {
        #[command(flatten)]
        target: Target,
    },

    /// Show the 5-day forecast for a place or coordinates.
    Forecast {
        #[command(flatten)]
        target: Target,
    },

    /// Edit lookup defaults and the home position.
    Configure,
}

/// Where to look the weather up. Without a place or explicit coordinates,
/// the configured home position is used.
#[derive(Debug, Args)]
pub struct Target {
    /// Place name; the first search match is used.
    pub place: Option<String>,

    /// Latitude in decimal degrees.
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees.
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

struct Services {
    transport: Arc<HttpTransport>,
    config: Arc<Config>,
    locations: LocationService,
}

impl Services {
    fn init() -> Result<Self> {
        let config = Arc::new(Config::load()?);
        let transport = Arc::new(HttpTransport::new()?);
        let position = Arc::new(ConfiguredPositionSource::new(&config));
        let locations = LocationService::new(transport.clone(), position, config.clone());

        Ok(Self {
            transport,
            config,
            locations,
        })
    }

    fn weather(&self) -> WeatherService {
        WeatherService::new(
            self.transport.clone(),
            self.locations.clone(),
            self.config.clone(),
        )
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Search { query } => {
                let services = Services::init()?;
                let found = services.locations.search_by_name(&query).await?;
                print_search_results(&query, &found);
            }
            Command::Current { target } => {
                let services = Services::init()?;
                let coords = resolve_target(&services.locations, &target).await?;
                let current = services
                    .weather()
                    .fetch_current(coords.latitude, coords.longitude)
                    .await?;
                print_current(&current);
            }
            Command::Forecast { target } => {
                let services = Services::init()?;
                let coords = resolve_target(&services.locations, &target).await?;
                let forecast = services
                    .weather()
                    .fetch_forecast(coords.latitude, coords.longitude)
                    .await?;
                print_forecast(&forecast);
            }
            Command::Configure => configure()?,
        }

        Ok(())
    }
}

async fn resolve_target(locations: &LocationService, target: &Target) -> Result<Coordinates> {
    if let (Some(lat), Some(lon)) = (target.lat, target.lon) {
        return Ok(Coordinates {
            latitude: lat,
            longitude: lon,
        });
    }

    if let Some(place) = &target.place {
        let found = locations.search_by_name(place).await?;
        let best = found
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No place found matching '{place}'"))?;

        return Ok(Coordinates {
            latitude: best.latitude,
            longitude: best.longitude,
        });
    }

    Ok(locations.current_position().await?)
}

fn print_search_results(query: &str, found: &[Location]) {
    if found.is_empty() {
        println!("No places found matching '{query}'.");
        return;
    }

    for location in found {
        println!(
            "{}, {}  ({:.4}, {:.4})",
            location.city, location.country, location.latitude, location.longitude
        );
    }
}

fn print_current(current: &CurrentWeather) {
    let location = &current.location;

    println!(
        "{}, {}  ({:.4}, {:.4})",
        location.city, location.country, location.latitude, location.longitude
    );
    println!(
        "  {}  {:.1}°C",
        current.weather_condition, current.temperature
    );
    if let Some(wind) = current.wind_speed {
        println!("  Wind: {wind:.1} km/h");
    }
    if let Some(humidity) = current.humidity {
        println!("  Humidity: {humidity:.0}%");
    }
}

fn print_forecast(forecast: &ForecastData) {
    let location = &forecast.location;

    println!("{}, {}", location.city, location.country);
    for day in &forecast.days {
        println!(
            "  {}  {:>5.1}°C / {:>5.1}°C  {}",
            day.date.format("%a %Y-%m-%d"),
            day.min_temperature,
            day.max_temperature,
            day.weather_condition
        );
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let language = Text::new("Default language code:")
        .with_initial_value(&config.lookup.language)
        .prompt()
        .context("Failed to read language")?;
    if !language.trim().is_empty() {
        config.lookup.language = language.trim().to_string();
    }

    let set_home = Confirm::new("Set a home position for lookups without a place?")
        .with_default(config.home.is_some())
        .prompt()
        .context("Failed to read home position choice")?;

    config.home = if set_home {
        let latitude = CustomType::<f64>::new("Home latitude:")
            .prompt()
            .context("Failed to read latitude")?;
        let longitude = CustomType::<f64>::new("Home longitude:")
            .prompt()
            .context("Failed to read longitude")?;

        Some(Coordinates {
            latitude,
            longitude,
        })
    } else {
        None
    };

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}
