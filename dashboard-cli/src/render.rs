//! Text rendering of the dashboard panels.

use chrono::Local;
use colored::{Color, Colorize};
use dashboard_core::{AppState, CurrentConditions, Forecast, ForecastEntry, Status, Theme};

struct Palette {
    title: Color,
    accent: Color,
    text: Color,
    muted: Color,
    error: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                title: Color::Black,
                accent: Color::Blue,
                text: Color::Black,
                muted: Color::BrightBlack,
                error: Color::Red,
            },
            Theme::Dark => Palette {
                title: Color::BrightWhite,
                accent: Color::BrightBlue,
                text: Color::White,
                muted: Color::BrightBlack,
                error: Color::BrightRed,
            },
        }
    }
}

/// Rounded to whole degrees, e.g. `18°C`.
pub fn format_temp(celsius: f64) -> String {
    format!("{}°C", celsius.round() as i64)
}

/// Local calendar day of a forecast entry, e.g. `Tue, Nov 14`.
pub fn format_day(entry: &ForecastEntry) -> String {
    entry
        .time()
        .map(|t| t.with_timezone(&Local).format("%a, %b %-d").to_string())
        .unwrap_or_else(|| "??".to_string())
}

/// Terminal glyph for an OpenWeather icon id such as `10d`.
pub fn icon_glyph(icon_id: &str) -> &'static str {
    match icon_id.get(..2).unwrap_or_default() {
        "01" => "☀",
        "02" => "⛅",
        "03" | "04" => "☁",
        "09" | "10" => "🌧",
        "11" => "⛈",
        "13" => "❄",
        "50" => "🌫",
        _ => "·",
    }
}

pub fn render(state: &AppState) -> String {
    let palette = Palette::for_theme(state.theme);
    let mut out = String::new();

    render_header(&mut out, state, &palette);

    if let Some(msg) = state.error() {
        out.push_str(&format!(
            "  {} {}\n\n",
            "!".color(palette.error).bold(),
            msg.color(palette.error)
        ));
    }

    if let Some(weather) = &state.weather {
        render_conditions(&mut out, weather, &palette);
    }

    if let Some(forecast) = &state.forecast {
        render_forecast(&mut out, forecast, &palette);
    }

    out.push_str(&render_recent(state));
    out
}

fn render_header(out: &mut String, state: &AppState, palette: &Palette) {
    let theme_hint = match state.theme {
        Theme::Light => "☾ light",
        Theme::Dark => "☀ dark",
    };
    out.push_str(&format!(
        "{}  {}\n",
        "Weather Dashboard".color(palette.title).bold(),
        theme_hint.color(palette.muted)
    ));

    let query = if state.query.is_empty() {
        "Enter city name...".color(palette.muted)
    } else {
        state.query.as_str().color(palette.text)
    };
    let status = match state.status {
        Status::Loading => " (loading...)",
        _ => "",
    };
    out.push_str(&format!("  Search: {query}{}\n\n", status.color(palette.muted)));
}

fn render_conditions(out: &mut String, weather: &CurrentConditions, palette: &Palette) {
    out.push_str(&format!(
        "── {} ──\n",
        weather.location_name.as_str().color(palette.accent).bold()
    ));
    out.push_str(&format!(
        "  {} {}  {} ({})\n",
        icon_glyph(&weather.condition_icon_id),
        format_temp(weather.temperature_c).color(palette.title).bold(),
        weather.condition_summary.as_str().color(palette.text),
        weather.condition_description.as_str().color(palette.muted),
    ));
    out.push_str(&format!(
        "  Feels like {} · Min {} · Max {}\n",
        format_temp(weather.feels_like_c),
        format_temp(weather.temp_min_c),
        format_temp(weather.temp_max_c),
    ));

    let rows = [
        ("Humidity", format!("{}%", weather.humidity_pct)),
        ("Wind Speed", format!("{} m/s", weather.wind_speed)),
        (
            "Visibility",
            weather
                .visibility_km()
                .map(|km| format!("{km:.1} km"))
                .unwrap_or_else(|| "n/a".to_string()),
        ),
    ];
    for (label, value) in rows {
        out.push_str(&format!(
            "  {:<11}{}\n",
            label.color(palette.muted),
            value.color(palette.text)
        ));
    }
    out.push('\n');
}

fn render_forecast(out: &mut String, forecast: &Forecast, palette: &Palette) {
    out.push_str(&format!("── {} ──\n", "5-Day Forecast".color(palette.accent).bold()));

    for day in forecast.daily() {
        out.push_str(&format!(
            "  {:<12} {} {:>5}  {}\n",
            format_day(day),
            icon_glyph(&day.condition_icon_id),
            format_temp(day.temperature_c).color(palette.title),
            day.condition_summary.as_str().color(palette.muted),
        ));
    }
    out.push('\n');
}

/// The recent-search chips, or nothing when history is empty.
pub fn render_recent(state: &AppState) -> String {
    if state.recent.is_empty() {
        return String::new();
    }

    let palette = Palette::for_theme(state.theme);
    let chips: Vec<String> = state
        .recent
        .iter()
        .map(|name| format!("[{}]", name.color(palette.text)))
        .collect();

    format!("{}\n  {}\n", "Recent Searches".color(palette.title).bold(), chips.join(" "))
}
