//! Dashboard state and the transitions the UI drives.
//!
//! All state is owned by [`Dashboard`]; each transition saves the slices it
//! changed to the store right away.

use serde::Serialize;

use crate::{
    FetchError, WeatherClient, WeatherReport,
    history::RecentSearches,
    model::{CurrentConditions, Forecast, Theme},
    store::{KEY_DARK_MODE, KEY_FORECAST, KEY_RECENT_SEARCHES, KEY_WEATHER, KeyValueStore},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    /// Nothing searched yet in this session (possibly restored state).
    #[default]
    Idle,
    Loading,
    Success,
    /// Carries the banner text.
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub theme: Theme,
    /// Contents of the search box.
    pub query: String,
    pub status: Status,
    pub weather: Option<CurrentConditions>,
    pub forecast: Option<Forecast>,
    pub recent: RecentSearches,
}

impl AppState {
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            Status::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }
}

/// Handle for an in-flight lookup. Only the most recently begun lookup may
/// update the dashboard when it completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    generation: u64,
    location: String,
}

impl LookupTicket {
    pub fn location(&self) -> &str {
        &self.location
    }
}

#[derive(Debug)]
pub struct Dashboard<C, S> {
    client: C,
    store: S,
    state: AppState,
    generation: u64,
}

impl<C: WeatherClient, S: KeyValueStore> Dashboard<C, S> {
    /// Seed state from the store. Missing or unreadable keys fall back to
    /// light theme, no weather, and empty history.
    pub fn restore(client: C, store: S) -> Self {
        let state = AppState {
            theme: load_or_default(&store, KEY_DARK_MODE),
            weather: load_or_default(&store, KEY_WEATHER),
            forecast: load_or_default(&store, KEY_FORECAST),
            recent: load_or_default(&store, KEY_RECENT_SEARCHES),
            ..AppState::default()
        };

        tracing::debug!(
            theme = %state.theme,
            has_weather = state.weather.is_some(),
            recent = state.recent.len(),
            "dashboard restored"
        );

        Self {
            client,
            store,
            state,
            generation: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
    }

    pub fn clear_query(&mut self) {
        self.state.query.clear();
    }

    /// Look up the current query. Blank queries do nothing and return `false`.
    pub async fn submit(&mut self) -> bool {
        if self.state.query.trim().is_empty() {
            return false;
        }

        let location = self.state.query.clone();
        self.lookup(&location).await;
        true
    }

    /// Re-run the lookup for the displayed location. Returns `false` if no
    /// weather is displayed.
    pub async fn refresh(&mut self) -> bool {
        let Some(location) = self.state.weather.as_ref().map(|w| w.location_name.clone()) else {
            return false;
        };

        self.lookup(&location).await;
        true
    }

    pub async fn select_recent(&mut self, name: &str) -> bool {
        self.state.query = name.to_string();
        self.lookup(name).await
    }

    pub fn remove_recent(&mut self, name: &str) {
        self.state.recent.remove(name);
        self.persist(KEY_RECENT_SEARCHES, &self.state.recent);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.state.theme.toggled());
        self.state.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.state.theme = theme;
        self.persist(KEY_DARK_MODE, &self.state.theme);
    }

    /// Fetch and apply weather for `location`. Returns whether it succeeded.
    pub async fn lookup(&mut self, location: &str) -> bool {
        let ticket = self.begin_lookup(location);
        let result = self.client.fetch_weather(location).await;
        self.complete_lookup(ticket, result) && self.state.status == Status::Success
    }

    /// Enter `Loading` and hand out a ticket for the result.
    pub fn begin_lookup(&mut self, location: &str) -> LookupTicket {
        self.generation += 1;
        self.state.status = Status::Loading;

        tracing::info!(location, generation = self.generation, "lookup started");

        LookupTicket {
            generation: self.generation,
            location: location.to_string(),
        }
    }

    /// Apply a lookup result. Results for anything but the newest ticket are
    /// dropped and `false` is returned.
    pub fn complete_lookup(
        &mut self,
        ticket: LookupTicket,
        result: Result<WeatherReport, FetchError>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                location = %ticket.location,
                generation = ticket.generation,
                latest = self.generation,
                "discarding stale lookup result"
            );
            return false;
        }

        match result {
            Ok(WeatherReport { current, forecast }) => {
                self.state.recent.record(&ticket.location);
                self.state.weather = Some(current);
                self.state.forecast = Some(forecast);
                self.state.status = Status::Success;

                self.persist(KEY_WEATHER, &self.state.weather);
                self.persist(KEY_FORECAST, &self.state.forecast);
                self.persist(KEY_RECENT_SEARCHES, &self.state.recent);
            }
            Err(err) => {
                tracing::warn!(location = %ticket.location, error = %err, "lookup failed");

                // The stored snapshot is left alone; only the display is cleared.
                self.state.weather = None;
                self.state.forecast = None;
                self.state.status = Status::Failed(err.user_message().to_string());
            }
        }

        true
    }

    fn persist<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(err) = self.store.save(key, value) {
            tracing::warn!(key, error = %format!("{err:#}"), "failed to persist dashboard state");
        }
    }
}

fn load_or_default<T, S>(store: &S, key: &str) -> T
where
    T: serde::de::DeserializeOwned + Default,
    S: KeyValueStore,
{
    match store.load::<Option<T>>(key) {
        Ok(value) => value.flatten().unwrap_or_default(),
        Err(err) => {
            tracing::warn!(key, error = %format!("{err:#}"), "ignoring unreadable stored value");
            T::default()
        }
    }
}
