//! festivo - public holiday lookup CLI.
#![allow(clippy::future_not_send)]

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{ApiConfig, AppConfig, resolve_config_path};
use festivo_api::holidays::{
    CheckHolidayResponse, FestivoClient, FestivoClientBuilder, Holiday, HolidayOptions,
    HolidaysResponse, LocalFestivoApi,
};

/// Timeout written by `config init`.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Festivo API base URL (overrides `api.base_url` in config).
    #[arg(long, global = true)]
    base_url: Option<Url>,

    /// API key (overrides the `FESTIVO_KEY` environment variable).
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List holidays for a country.
    Holidays(HolidaysArgs),
    /// List holidays for a city.
    City(CityArgs),
    /// List holidays for a region (ISO 3166-2).
    Region(RegionArgs),
    /// Check whether a date is a holiday.
    Check(CheckArgs),
    /// Inspect or create the config file.
    Config(ConfigCommand),
}

/// Filters shared by the listing subcommands.
#[derive(clap::Args)]
struct ListFilters {
    /// Year (default: current year).
    #[arg(long)]
    year: Option<u32>,

    /// Holiday type filter (e.g. "public").
    #[arg(long = "type")]
    holiday_type: Option<String>,

    /// Language for localized names (e.g. "it").
    #[arg(long)]
    language: Option<String>,

    /// IANA timezone (e.g. "Europe/Rome").
    #[arg(long)]
    timezone: Option<String>,
}

/// Arguments for the `holidays` subcommand.
#[derive(clap::Args)]
struct HolidaysArgs {
    /// Country code (ISO 3166-1 alpha-2, e.g. "US").
    #[arg(long, required = true)]
    country: String,

    /// Comma-separated region or city codes (e.g. "GB-SCT,GB-WLS").
    #[arg(long)]
    regions: Option<String>,

    #[command(flatten)]
    filters: ListFilters,
}

/// Arguments for the `city` subcommand.
#[derive(clap::Args)]
struct CityArgs {
    /// Country code (e.g. "IT").
    #[arg(long, required = true)]
    country: String,

    /// City code (e.g. "IT-MILAN").
    #[arg(long, required = true)]
    city: String,

    #[command(flatten)]
    filters: ListFilters,
}

/// Arguments for the `region` subcommand.
#[derive(clap::Args)]
struct RegionArgs {
    /// Country code (e.g. "GB").
    #[arg(long, required = true)]
    country: String,

    /// Region code (e.g. "GB-SCT").
    #[arg(long, required = true)]
    region: String,

    #[command(flatten)]
    filters: ListFilters,
}

/// Arguments for the `check` subcommand.
#[derive(clap::Args)]
struct CheckArgs {
    /// Country code (e.g. "US").
    #[arg(long, required = true)]
    country: String,

    /// Date to check, YYYY-MM-DD (default: today).
    #[arg(long)]
    date: Option<String>,

    /// Comma-separated region codes.
    #[arg(long)]
    regions: Option<String>,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show the effective connection settings.
    Show,
    /// Write a starter config file.
    Init,
}

impl ListFilters {
    /// Requested year, falling back to the current local year.
    fn year(&self) -> Result<u32> {
        if let Some(year) = self.year {
            return Ok(year);
        }
        u32::try_from(Local::now().year()).context("current year is out of range")
    }

    /// Converts the filters to request options.
    fn options(&self) -> HolidayOptions {
        HolidayOptions {
            regions: None,
            holiday_type: self.holiday_type.clone(),
            language: self.language.clone(),
            timezone: self.timezone.clone(),
        }
    }
}

/// Loads the config file selected by `--dir`, returning its path as well.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved or the file cannot be parsed.
fn load_config(dir: Option<&PathBuf>) -> Result<(PathBuf, AppConfig)> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    Ok((config_path, config))
}

/// Builds a `FestivoClient` from flags, environment and config.
///
/// The API key comes from `--api-key`, then `FESTIVO_KEY`; a missing key
/// sends unauthenticated requests. The base URL comes from `--base-url`,
/// then `api.base_url`, then the public endpoint.
///
/// # Errors
///
/// Returns an error if `api.base_url` is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_client_with(cli: &Cli, api: &ApiConfig) -> Result<FestivoClient> {
    let mut builder = FestivoClientBuilder::from_env().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(key) = &cli.api_key {
        builder = builder.api_key(key);
    }
    let base_url = match &cli.base_url {
        Some(url) => Some(url.clone()),
        None => api.parsed_base_url()?,
    };
    if let Some(url) = base_url {
        builder = builder.base_url(url);
    }
    if let Some(timeout) = api.timeout() {
        builder = builder.timeout(timeout);
    }

    let client = builder.build().context("failed to build Festivo client")?;
    if !client.rest().is_authenticated() {
        tracing::debug!("no API key configured, sending unauthenticated requests");
    }
    Ok(client)
}

/// Loads the config and builds a `FestivoClient` from it.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the client fails to build.
fn build_client(cli: &Cli) -> Result<FestivoClient> {
    let (_, config) = load_config(cli.dir.as_ref())?;
    build_client_with(cli, &config.api)
}

/// Runs the `holidays` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_holidays(cli: &Cli, args: &HolidaysArgs) -> Result<()> {
    let client = build_client(cli)?;

    let mut options = args.filters.options();
    options.regions.clone_from(&args.regions);

    let response = client
        .get_holidays(&args.country, args.filters.year()?, &options)
        .await
        .context("Festivo holidays request failed")?;

    report_holidays(&response);
    Ok(())
}

/// Runs the `city` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_city(cli: &Cli, args: &CityArgs) -> Result<()> {
    let client = build_client(cli)?;

    let response = client
        .get_city_holidays(
            &args.country,
            &args.city,
            args.filters.year()?,
            &args.filters.options(),
        )
        .await
        .context("Festivo city holidays request failed")?;

    report_holidays(&response);
    Ok(())
}

/// Runs the `region` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_region(cli: &Cli, args: &RegionArgs) -> Result<()> {
    let client = build_client(cli)?;

    let response = client
        .get_regional_holidays(
            &args.country,
            &args.region,
            args.filters.year()?,
            &args.filters.options(),
        )
        .await
        .context("Festivo regional holidays request failed")?;

    report_holidays(&response);
    Ok(())
}

/// Runs the `check` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_check(cli: &Cli, args: &CheckArgs) -> Result<()> {
    let client = build_client(cli)?;

    let date = args
        .date
        .clone()
        .unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string());

    let response = client
        .check_holiday(&args.country, &date, args.regions.as_deref())
        .await
        .context("Festivo check request failed")?;

    report_check(&args.country, &date, &response);
    Ok(())
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the client fails to build.
#[instrument(skip_all)]
fn run_config_show(cli: &Cli) -> Result<()> {
    let (config_path, config) = load_config(cli.dir.as_ref())?;
    let client = build_client_with(cli, &config.api)?;

    let exists = if config_path.exists() {
        ""
    } else {
        " (not found, using defaults)"
    };
    tracing::info!("Config file: {}{}", config_path.display(), exists);
    tracing::info!("Base URL: {}", client.rest().base_url());
    tracing::info!(
        "Timeout: {}",
        config
            .api
            .timeout()
            .map_or_else(|| String::from("none"), |t| format!("{}s", t.as_secs()))
    );
    let key_state = if client.rest().is_authenticated() {
        "set"
    } else {
        "not set"
    };
    tracing::info!("API key: {}", key_state);
    Ok(())
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the config file already exists or cannot be written.
#[instrument(skip_all)]
fn run_config_init(dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    if config_path.exists() {
        bail!("config file already exists: {}", config_path.display());
    }

    let config = AppConfig {
        api: ApiConfig {
            base_url: None,
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
        },
    };
    config.save(&config_path).context("failed to save config")?;

    tracing::info!("Wrote {}", config_path.display());
    Ok(())
}

/// Display name with the local name appended when it differs.
fn display_name(holiday: &Holiday) -> String {
    match holiday.name_local.as_deref() {
        Some(local) if !local.is_empty() && local != holiday.name => {
            format!("{} ({local})", holiday.name)
        }
        _ => holiday.name.clone(),
    }
}

/// Logs a holiday listing as a table.
fn report_holidays(response: &HolidaysResponse) {
    tracing::info!("Date\t\tObserved\tType\t\tName");
    for holiday in &response.holidays {
        let observed = if holiday.observed.is_empty() {
            "-"
        } else {
            holiday.observed.as_str()
        };
        let holiday_type = if holiday.holiday_type.is_empty() {
            "-"
        } else {
            holiday.holiday_type.as_str()
        };
        tracing::info!(
            "{}\t{}\t{}\t\t{}",
            holiday.date,
            observed,
            holiday_type,
            display_name(holiday)
        );
    }
    tracing::info!("Total: {} holidays", response.total);
}

/// Logs the outcome of a single-date check.
fn report_check(country: &str, date: &str, response: &CheckHolidayResponse) {
    match (response.is_holiday, response.holiday.as_ref()) {
        (true, Some(holiday)) => {
            tracing::info!(
                "{} is a holiday in {}: {}",
                date,
                country,
                display_name(holiday)
            );
        }
        (true, None) => tracing::info!("{} is a holiday in {}", date, country),
        (false, _) => tracing::info!("{} is not a holiday in {}", date, country),
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    match &cli.command {
        Commands::Holidays(args) => run_holidays(&cli, args).await,
        Commands::City(args) => run_city(&cli, args).await,
        Commands::Region(args) => run_region(&cli, args).await,
        Commands::Check(args) => run_check(&cli, args).await,
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Show => run_config_show(&cli),
            ConfigSubcommands::Init => run_config_init(cli.dir.as_ref()),
        },
    }
}
