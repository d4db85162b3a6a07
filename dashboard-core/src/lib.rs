//! Core library for the weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client (current conditions + forecast in one lookup)
//! - Recent-search history
//! - Key-value persistence of dashboard state
//! - The dashboard state machine tying it all together
//!
//! It is used by `weather-dashboard`, but carries no terminal concerns.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod history;
pub mod model;
pub mod provider;
pub mod store;

pub use config::Config;
pub use dashboard::{AppState, Dashboard, LookupTicket, Status};
pub use error::{FetchError, LOOKUP_FAILED_MESSAGE};
pub use history::{RecentSearches, record_search, remove_search};
pub use model::{CurrentConditions, Forecast, ForecastEntry, Theme, WeatherReport};
pub use provider::{WeatherClient, client_from_config, openweather::OpenWeatherClient};
pub use store::{FileStore, KeyValueStore, MemoryStore};
