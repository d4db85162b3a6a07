use crate::{Config, FetchError, WeatherReport, provider::openweather::OpenWeatherClient};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions plus forecast for a location name.
#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    /// Succeeds only when both current conditions and forecast were fetched.
    async fn fetch_weather(&self, location: &str) -> Result<WeatherReport, FetchError>;
}

/// Construct the OpenWeather client from config.
///
/// A missing API key is not an error here; every lookup will fail instead.
pub fn client_from_config(config: &Config) -> OpenWeatherClient {
    let api_key = config.resolve_api_key();
    if api_key.is_none() {
        tracing::warn!(
            "No API key configured; lookups will fail. \
             Hint: set {} or run `weather-dashboard configure`.",
            crate::config::API_KEY_ENV
        );
    }

    OpenWeatherClient::new(api_key).with_base_url(config.base_url())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_from_config_uses_configured_base_url() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            base_url: Some("http://localhost:9999/".into()),
        };

        let client = client_from_config(&cfg);
        assert_eq!(client.base_url(), "http://localhost:9999");
    }

    #[test]
    fn client_from_default_config_targets_openweather() {
        let client = client_from_config(&Config::default());
        assert_eq!(client.base_url(), crate::config::DEFAULT_BASE_URL);
    }
}
