//! Prompt loop offering the same controls as the dashboard page.

use std::fmt;

use anyhow::Context;
use dashboard_core::{Dashboard, KeyValueStore, WeatherClient};
use inquire::{InquireError, Select, Text};

use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    ClearSearch,
    Refresh,
    PickRecent,
    RemoveRecent,
    ToggleTheme,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::Search => "Search for a city",
            Action::ClearSearch => "Clear search box",
            Action::Refresh => "Refresh",
            Action::PickRecent => "Open a recent search",
            Action::RemoveRecent => "Remove a recent search",
            Action::ToggleTheme => "Toggle dark/light theme",
            Action::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// Controls that make sense for the current state, in menu order.
fn available_actions<C, S>(dash: &Dashboard<C, S>) -> Vec<Action>
where
    C: WeatherClient,
    S: KeyValueStore,
{
    let state = dash.state();
    let mut actions = vec![Action::Search];

    if !state.query.is_empty() {
        actions.push(Action::ClearSearch);
    }
    if state.weather.is_some() {
        actions.push(Action::Refresh);
    }
    if !state.recent.is_empty() {
        actions.push(Action::PickRecent);
        actions.push(Action::RemoveRecent);
    }

    actions.push(Action::ToggleTheme);
    actions.push(Action::Quit);
    actions
}

pub async fn run<C, S>(dash: &mut Dashboard<C, S>) -> anyhow::Result<()>
where
    C: WeatherClient,
    S: KeyValueStore,
{
    loop {
        println!();
        print!("{}", render::render(dash.state()));
        println!();

        let action = match Select::new("What next?", available_actions(dash)).prompt() {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read menu choice"),
        };

        match action {
            Action::Search => {
                let Some(city) = Text::new("City:")
                    .with_initial_value(&dash.state().query)
                    .with_placeholder("Enter city name...")
                    .prompt_skippable()
                    .context("Failed to read city name")?
                else {
                    continue;
                };

                dash.set_query(city.as_str());
                if dash.state().query.trim().is_empty() {
                    continue;
                }
                println!("Fetching weather for {city}...");
                dash.submit().await;
            }
            Action::ClearSearch => dash.clear_query(),
            Action::Refresh => {
                dash.refresh().await;
            }
            Action::PickRecent => {
                if let Some(city) = pick_recent(dash, "Open which city?")? {
                    println!("Fetching weather for {city}...");
                    dash.select_recent(&city).await;
                }
            }
            Action::RemoveRecent => {
                if let Some(city) = pick_recent(dash, "Remove which city?")? {
                    dash.remove_recent(&city);
                }
            }
            Action::ToggleTheme => {
                dash.toggle_theme();
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

fn pick_recent<C, S>(dash: &Dashboard<C, S>, prompt: &str) -> anyhow::Result<Option<String>>
where
    C: WeatherClient,
    S: KeyValueStore,
{
    let options: Vec<String> = dash.state().recent.iter().map(str::to_owned).collect();

    Select::new(prompt, options)
        .prompt_skippable()
        .context("Failed to read recent search choice")
}
