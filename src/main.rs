use anyhow::{Context, Result};
use aqpulse::{
    AqPulseConfig, City, Dashboard, FetchPhase, WaqiClient, classify,
    config::{DEMO_TOKEN, check_watch_interval},
    logging,
    report::render_dashboard,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "aqpulse")]
#[command(version)]
#[command(about = "Real-time air quality for Indian cities", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true, env = "AQPULSE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the current reading for a city
    Fetch {
        /// City to show (defaults to the configured city)
        #[arg(long)]
        city: Option<City>,

        /// Print the reading as JSON
        #[arg(long)]
        json: bool,
    },
    /// Refresh a city's reading periodically until interrupted
    Watch {
        #[arg(long)]
        city: Option<City>,

        /// Seconds between refreshes (defaults to the configured interval)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Show the health category for an AQI value
    Classify {
        /// AQI value; omit it or pass a non-number for "No data"
        #[arg(allow_negative_numbers = true)]
        aqi: Option<String>,
    },
    /// List supported cities
    Cities,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<aqpulse::AqPulseError>() {
                Some(err) => eprintln!("{}", err.user_message()),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = AqPulseConfig::load_from_path(cli.config)?;
    logging::init(&config.logging, cli.verbose)?;

    match cli.command {
        Command::Fetch { city, json } => fetch(&config, city, json).await,
        Command::Watch { city, interval } => watch(&config, city, interval).await,
        Command::Classify { aqi } => {
            let value = aqi.and_then(|raw| raw.trim().parse::<f64>().ok());
            let category = classify(value);
            println!(
                "{} (severity {}, {})",
                category.label(),
                category.severity_rank(),
                category.style_token()
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::Cities => {
            for city in City::ALL {
                println!("{city}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn client(config: &AqPulseConfig) -> Result<WaqiClient> {
    if config.uses_demo_token() {
        warn!(
            "Using the '{}' token; set AQPULSE_PROVIDER__TOKEN for real data",
            DEMO_TOKEN
        );
    }
    WaqiClient::new(&config.provider).context("Failed to set up the WAQI client")
}

fn resolve_city(config: &AqPulseConfig, city: Option<City>) -> Result<City> {
    match city {
        Some(city) => Ok(city),
        None => Ok(config.default_city()?),
    }
}

async fn fetch(config: &AqPulseConfig, city: Option<City>, json: bool) -> Result<ExitCode> {
    let client = client(config)?;
    let mut dashboard = Dashboard::new(resolve_city(config, city)?.name());

    dashboard.refresh(&client).await;
    let failed = dashboard.error_message().is_some();

    if json {
        match dashboard.phase() {
            FetchPhase::Success(reading) => {
                println!("{}", serde_json::to_string_pretty(reading)?);
            }
            FetchPhase::Failed(message) => eprintln!("{message}"),
            FetchPhase::Idle | FetchPhase::Loading => {}
        }
    } else {
        print!("{}", render_dashboard(&dashboard));
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn watch(config: &AqPulseConfig, city: Option<City>, interval: Option<u64>) -> Result<ExitCode> {
    let seconds = check_watch_interval(interval.unwrap_or(config.defaults.watch_interval_seconds))?;
    let client = client(config)?;
    let mut dashboard = Dashboard::new(resolve_city(config, city)?.name());
    let mut ticker = tokio::time::interval(Duration::from_secs(seconds));

    info!("Watching '{}' every {}s", dashboard.city(), seconds);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => break,
        }

        let ticket = dashboard.begin_refresh();
        let city = ticket.city().to_string();

        // Dropping the fetch future on Ctrl-C cancels the in-flight request.
        tokio::select! {
            result = aqpulse::fetch_reading(&client, &city) => {
                dashboard.complete(ticket, result);
                println!("{}", render_dashboard(&dashboard));
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    info!("Stopped watching '{}'", dashboard.city());
    Ok(ExitCode::SUCCESS)
}
