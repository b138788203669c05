//! Terminal rendering of the dashboard

use crate::dashboard::{Dashboard, FetchPhase};
use crate::forecast::AQI_SCALE_MAX;
use crate::models::{AqiCategory, AqiReading, ForecastSource, classify};

/// Width of a gauge bar in characters
const GAUGE_WIDTH: usize = 20;
const MISSING: &str = "—";

/// General advice shown next to the forecast
pub const HEALTH_ADVICE: [&str; 3] = [
    "Wear N95 masks outdoors",
    "Prefer indoor workouts",
    "Consult doctors if symptoms worsen",
];

/// Share of the 0–500 AQI scale covered by `value`, clamped to `[0, 100]`.
/// Missing values count as zero.
#[must_use]
pub fn gauge_percent(value: Option<f64>) -> f64 {
    let value = value.filter(|v| !v.is_nan()).unwrap_or(0.0);
    (value / AQI_SCALE_MAX * 100.0).clamp(0.0, 100.0)
}

fn gauge_bar(value: Option<f64>) -> String {
    let filled = (gauge_percent(value) / 100.0 * GAUGE_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(GAUGE_WIDTH - filled))
}

fn format_value<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

fn format_badge(category: AqiCategory) -> String {
    format!("{} ({})", category.label(), category.style_token())
}

struct Gauge {
    title: &'static str,
    subtitle: &'static str,
    value: Option<f64>,
}

fn gauges(reading: Option<&AqiReading>) -> [Gauge; 4] {
    [
        Gauge {
            title: "PM2.5",
            subtitle: "Fine particles",
            value: reading.and_then(|r| r.pm25),
        },
        Gauge {
            title: "PM10",
            subtitle: "Coarse particles",
            value: reading.and_then(|r| r.pm10),
        },
        Gauge {
            title: "CO",
            subtitle: "Carbon monoxide",
            value: reading.and_then(|r| r.co),
        },
        Gauge {
            title: "SO2",
            subtitle: "Sulfur dioxide",
            value: reading.and_then(|r| r.so2),
        },
    ]
}

/// Render the full dashboard as plain text
#[must_use]
pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    let reading = dashboard.reading();

    match dashboard.phase() {
        FetchPhase::Failed(message) => out.push_str(&format!("Error: {message}\n")),
        FetchPhase::Loading => out.push_str("Fetching…\n"),
        FetchPhase::Idle | FetchPhase::Success(_) => {}
    }

    out.push_str(&format!(
        "{} • AQI {} • {}\n\n",
        dashboard.city(),
        format_value(reading.and_then(|r| r.aqi)),
        format_badge(dashboard.category())
    ));

    for gauge in gauges(reading) {
        out.push_str(&gauge_line(&gauge));
    }
    out.push('\n');

    out.push_str(&render_forecast(reading));
    out
}

fn gauge_line(gauge: &Gauge) -> String {
    format!(
        "  {:<6} {:>5} AQI {} {:<20} {}\n",
        gauge.title,
        format_value(gauge.value),
        gauge_bar(gauge.value),
        classify(gauge.value).label(),
        gauge.subtitle
    )
}

fn render_forecast(reading: Option<&AqiReading>) -> String {
    let forecast = reading.and_then(|r| r.forecast_aqi);
    let mut out = format!("Tomorrow's AQI forecast: AQI {}", format_value(forecast));

    if let Some(reading) = reading.filter(|r| r.forecast_aqi.is_some()) {
        out.push_str(&format!(" • {}", format_badge(reading.forecast_category())));
        if reading.forecast_source == Some(ForecastSource::Heuristic) {
            out.push_str(" (estimated)");
        }
    }
    out.push('\n');

    for tip in HEALTH_ADVICE {
        out.push_str(&format!("  - {tip}\n"));
    }
    out
}
