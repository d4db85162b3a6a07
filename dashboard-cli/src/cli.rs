use anyhow::Context;
use clap::{Parser, Subcommand};
use dashboard_core::{Config, Dashboard, FileStore, OpenWeatherClient, Theme, client_from_config};

use crate::{interactive, render};

pub type AppDashboard = Dashboard<OpenWeatherClient, FileStore>;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides this).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `interactive` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum Command {
    /// Save the OpenWeather API key.
    Configure,

    /// Look up a city and show the dashboard.
    Search {
        /// City name, e.g. "Paris" or "Paris,FR".
        city: String,
    },

    /// Re-run the lookup for the city currently shown.
    Refresh,

    /// Show the last saved dashboard without fetching anything.
    Show,

    /// List recent searches, or act on one.
    Recent {
        #[command(subcommand)]
        action: Option<RecentAction>,
    },

    /// Toggle between dark and light theme.
    Theme {
        /// Set a theme explicitly instead of toggling ("dark" or "light").
        #[arg(long)]
        set: Option<String>,
    },

    /// Prompt-driven dashboard (the default).
    Interactive,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum RecentAction {
    /// Fetch weather for a recent search.
    Pick { city: String },

    /// Remove a city from recent searches.
    Remove { city: String },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Search { city } => search(city).await,
            Command::Refresh => refresh().await,
            Command::Show => {
                let dash = open_dashboard()?;
                print!("{}", render::render(dash.state()));
                Ok(())
            }
            Command::Recent { action } => recent(action).await,
            Command::Theme { set } => theme(set),
            Command::Interactive => {
                let mut dash = open_dashboard()?;
                interactive::run(&mut dash).await
            }
        }
    }
}

async fn search(city: String) -> anyhow::Result<()> {
    let mut dash = open_dashboard()?;

    dash.set_query(city);
    if !dash.submit().await {
        println!("Nothing to search for: the city name is empty.");
        return Ok(());
    }

    print!("{}", render::render(dash.state()));
    Ok(())
}

async fn refresh() -> anyhow::Result<()> {
    let mut dash = open_dashboard()?;

    if !dash.refresh().await {
        println!("Nothing to refresh yet. Try `weather-dashboard search <CITY>`.");
        return Ok(());
    }

    print!("{}", render::render(dash.state()));
    Ok(())
}

async fn recent(action: Option<RecentAction>) -> anyhow::Result<()> {
    let mut dash = open_dashboard()?;

    match action {
        None => print!("{}", render::render_recent(dash.state())),
        Some(RecentAction::Pick { city }) => {
            dash.select_recent(&city).await;
            print!("{}", render::render(dash.state()));
        }
        Some(RecentAction::Remove { city }) => {
            if !dash.state().recent.contains(&city) {
                println!("'{city}' is not in recent searches.");
                return Ok(());
            }
            dash.remove_recent(&city);
            print!("{}", render::render_recent(dash.state()));
        }
    }

    Ok(())
}

fn theme(set: Option<String>) -> anyhow::Result<()> {
    let mut dash = open_dashboard()?;

    let theme = match set {
        Some(name) => {
            let theme = Theme::try_from(name.as_str())?;
            dash.set_theme(theme);
            theme
        }
        None => dash.toggle_theme(),
    };

    println!("Theme: {theme}");
    Ok(())
}

fn open_dashboard() -> anyhow::Result<AppDashboard> {
    let config = Config::load()?;
    let client = client_from_config(&config);
    let store = FileStore::open_default()?;

    tracing::debug!(data_dir = %store.dir().display(), "opening dashboard store");

    Ok(Dashboard::restore(client, store))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .with_help_message("Get one at https://openweathermap.org/api")
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(api_key.to_string());
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}
