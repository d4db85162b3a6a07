use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::instrument;

use crate::{
    FetchError,
    config::DEFAULT_BASE_URL,
    model::{CurrentConditions, Forecast, ForecastEntry, WeatherReport},
};

use super::WeatherClient;

const CURRENT_ENDPOINT: &str = "weather";
const FORECAST_ENDPOINT: &str = "forecast";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base}/{endpoint}?q=..&appid=..&units=metric` and decode the body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        location: &str,
    ) -> Result<T, FetchError> {
        let api_key = self.api_key.as_deref().ok_or(FetchError::MissingApiKey)?;
        let url = format!("{}/{}", self.base_url, endpoint);

        let res = self
            .http
            .get(&url)
            .query(&[("q", location), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|source| FetchError::Request { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| FetchError::Request { endpoint, source })?;

        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| FetchError::Parse {
            endpoint,
            reason: e.to_string(),
        })
    }

    async fn fetch_current(&self, location: &str) -> Result<CurrentConditions, FetchError> {
        let parsed: OwCurrentResponse = self.get_json(CURRENT_ENDPOINT, location).await?;
        parsed.try_into()
    }

    async fn fetch_forecast(&self, location: &str) -> Result<Forecast, FetchError> {
        let parsed: OwForecastResponse = self.get_json(FORECAST_ENDPOINT, location).await?;
        parsed.try_into()
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    #[instrument(skip(self), level = "debug")]
    async fn fetch_weather(&self, location: &str) -> Result<WeatherReport, FetchError> {
        // Both requests are in flight before either completes.
        let (current, forecast) =
            tokio::try_join!(self.fetch_current(location), self.fetch_forecast(location))?;

        tracing::debug!(
            location = %current.location_name,
            forecast_entries = forecast.len(),
            "lookup succeeded"
        );

        Ok(WeatherReport { current, forecast })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    feels_like: Option<f64>,
    #[serde(default)]
    humidity: Option<u8>,
    #[serde(default)]
    temp_min: Option<f64>,
    #[serde(default)]
    temp_max: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    #[serde(default)]
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    visibility: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn first_condition(
    weather: Vec<OwWeather>,
    endpoint: &'static str,
) -> Result<OwWeather, FetchError> {
    weather.into_iter().next().ok_or_else(|| FetchError::Parse {
        endpoint,
        reason: "response contained no weather condition".to_string(),
    })
}

fn missing_field(endpoint: &'static str, field: &str) -> FetchError {
    FetchError::Parse {
        endpoint,
        reason: format!("missing field `{field}`"),
    }
}

impl TryFrom<OwCurrentResponse> for CurrentConditions {
    type Error = FetchError;

    fn try_from(parsed: OwCurrentResponse) -> Result<Self, Self::Error> {
        let condition = first_condition(parsed.weather, CURRENT_ENDPOINT)?;
        let main = parsed.main;

        Ok(CurrentConditions {
            location_name: parsed.name,
            temperature_c: main.temp,
            humidity_pct: main
                .humidity
                .ok_or_else(|| missing_field(CURRENT_ENDPOINT, "main.humidity"))?,
            feels_like_c: main
                .feels_like
                .ok_or_else(|| missing_field(CURRENT_ENDPOINT, "main.feels_like"))?,
            temp_min_c: main.temp_min.unwrap_or(main.temp),
            temp_max_c: main.temp_max.unwrap_or(main.temp),
            condition_summary: condition.main,
            condition_description: condition.description,
            condition_icon_id: condition.icon,
            wind_speed: parsed.wind.speed,
            visibility_meters: parsed.visibility,
        })
    }
}

impl TryFrom<OwForecastResponse> for Forecast {
    type Error = FetchError;

    fn try_from(parsed: OwForecastResponse) -> Result<Self, Self::Error> {
        let entries = parsed
            .list
            .into_iter()
            .map(|entry| {
                let condition = first_condition(entry.weather, FORECAST_ENDPOINT)?;
                Ok(ForecastEntry {
                    timestamp: entry.dt,
                    temperature_c: entry.main.temp,
                    condition_summary: condition.main,
                    condition_icon_id: condition.icon,
                })
            })
            .collect::<Result<Vec<_>, FetchError>>()?;

        Ok(Forecast::new(entries))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
