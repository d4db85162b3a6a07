use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Forecast entries are 3 hours apart, so every 8th one is roughly a day later.
pub const DAILY_STRIDE: usize = 8;

/// Number of day cards shown in the forecast strip.
pub const DAILY_CARDS: usize = 5;

/// Snapshot of the weather at one location, as shown on the conditions card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    /// Short group name, e.g. "Clouds".
    pub condition_summary: String,
    /// Longer text, e.g. "broken clouds".
    pub condition_description: String,
    pub condition_icon_id: String,
    /// Metres per second (metric units).
    pub wind_speed: f64,
    /// Not every station reports visibility.
    #[serde(default)]
    pub visibility_meters: Option<u32>,
}

impl CurrentConditions {
    pub fn visibility_km(&self) -> Option<f64> {
        self.visibility_meters.map(|m| f64::from(m) / 1000.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Unix epoch seconds.
    pub timestamp: i64,
    pub temperature_c: f64,
    pub condition_summary: String,
    pub condition_icon_id: String,
}

impl ForecastEntry {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

/// Time-ordered forecast at 3-hour resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forecast {
    pub entries: Vec<ForecastEntry>,
}

impl Forecast {
    pub fn new(entries: Vec<ForecastEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every `stride`-th entry starting at index 0, at most `count` of them.
    pub fn sample(&self, stride: usize, count: usize) -> Vec<&ForecastEntry> {
        self.entries.iter().step_by(stride.max(1)).take(count).collect()
    }

    /// Approximately one entry per day for the forecast strip.
    pub fn daily(&self) -> Vec<&ForecastEntry> {
        self.sample(DAILY_STRIDE, DAILY_CARDS)
    }
}

/// Result of one successful lookup: both halves come from the same round-trip.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: Forecast,
}

/// Dark/light preference. Persisted as a plain boolean (`true` = dark).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl From<bool> for Theme {
    fn from(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }
}

impl From<Theme> for bool {
    fn from(theme: Theme) -> Self {
        theme.is_dark()
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Theme {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(anyhow::anyhow!("Unknown theme '{value}'. Supported themes: light, dark.")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(n: usize) -> Forecast {
        Forecast::new(
            (0..n)
                .map(|i| ForecastEntry {
                    timestamp: 1_700_000_000 + (i as i64) * 3 * 3600,
                    temperature_c: i as f64,
                    condition_summary: "Clear".into(),
                    condition_icon_id: "01d".into(),
                })
                .collect(),
        )
    }

    #[test]
    fn ten_entries_yield_two_days() {
        let forecast = entries(10);
        let days = forecast.daily();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].temperature_c, 0.0);
        assert_eq!(days[1].temperature_c, 8.0);
    }

    #[test]
    fn full_forecast_is_capped_at_five_days() {
        let forecast = entries(40);
        let days = forecast.daily();

        assert_eq!(days.len(), 5);
        assert_eq!(days[4].temperature_c, 32.0);
    }

    #[test]
    fn short_forecasts_never_fault() {
        for n in 0..=40 {
            let forecast = entries(n);
            let days = forecast.daily();
            assert_eq!(
                days.len(),
                n.div_ceil(DAILY_STRIDE).min(DAILY_CARDS),
                "{n} entries gave {} days",
                days.len()
            );
        }
    }

    #[test]
    fn fewer_than_33_entries_give_fewer_than_five_days() {
        for n in 0..33 {
            let forecast = entries(n);
            assert!(forecast.daily().len() < DAILY_CARDS, "{n} entries");
        }
    }

    #[test]
    fn entry_time_is_utc_epoch() {
        let forecast = entries(1);
        let time = forecast.entries[0].time().unwrap();
        assert_eq!(time.timestamp(), 1_700_000_000);
    }

    #[test]
    fn visibility_converts_to_km_when_reported() {
        let json = serde_json::json!({
            "location_name": "Paris",
            "temperature_c": 18.0,
            "humidity_pct": 60,
            "feels_like_c": 18.0,
            "temp_min_c": 17.0,
            "temp_max_c": 19.0,
            "condition_summary": "Clear",
            "condition_description": "clear sky",
            "condition_icon_id": "01d",
            "wind_speed": 2.0
        });

        // Snapshots saved without the field still restore.
        let mut conditions: CurrentConditions = serde_json::from_value(json).unwrap();
        assert_eq!(conditions.visibility_km(), None);

        conditions.visibility_meters = Some(8_500);
        assert_eq!(conditions.visibility_km(), Some(8.5));
    }

    #[test]
    fn zero_stride_is_treated_as_one() {
        let forecast = entries(3);
        assert_eq!(forecast.sample(0, 10).len(), 3);
    }

    #[test]
    fn theme_serializes_as_bool() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "true");
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "false");

        let theme: Theme = serde_json::from_str("true").unwrap();
        assert_eq!(theme, Theme::Dark);
    }

    #[test]
    fn theme_toggle_and_parse() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::try_from("DARK").unwrap(), Theme::Dark);
        assert!(Theme::try_from("sepia").is_err());
    }

    #[test]
    fn forecast_serializes_as_list() {
        let forecast = entries(1);
        let json = serde_json::to_value(&forecast).unwrap();
        assert!(json.is_array());
    }
}
