//! cinescope - movie and TV discovery CLI.

/// Application configuration (TOML).
mod config;
/// Log-based rendering of catalog data.
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path};
use cinescope_api::tmdb::{
    Credential, ListParams, LocalTmdbApi, SearchAggregator, SearchOptions, TmdbClient,
};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Search movies, TV series and people.
    Search(SearchArgs),
    /// List popular movies or TV series.
    Popular(ListArgs),
    /// List top rated movies or TV series.
    TopRated(ListArgs),
    /// List TV series airing today.
    AiringToday(PageArgs),
    /// Show TV series details.
    TvDetails(TvDetailsArgs),
    /// Show a TV season's episodes.
    TvSeason(TvSeasonArgs),
    /// Show where a TV series can be watched.
    Providers(ProvidersArgs),
    /// Manage stored TMDB credentials.
    Config(ConfigCommand),
}

/// Catalog section to list.
#[derive(Clone, Copy, ValueEnum)]
enum MediaKind {
    /// Movies.
    Movie,
    /// TV series.
    Tv,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search text (e.g. "Fallout").
    #[arg(long, required = true)]
    query: String,
    /// Result page (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Also list matching people.
    #[arg(long)]
    include_people: bool,
}

/// Arguments for list subcommands.
#[derive(clap::Args)]
struct ListArgs {
    /// Catalog section.
    #[arg(long, value_enum)]
    kind: MediaKind,
    /// Result page (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for paged subcommands.
#[derive(clap::Args)]
struct PageArgs {
    /// Result page (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `tv-details` subcommand.
#[derive(clap::Args)]
struct TvDetailsArgs {
    /// TMDB series ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `tv-season` subcommand.
#[derive(clap::Args)]
struct TvSeasonArgs {
    /// TMDB series ID.
    #[arg(long, required = true)]
    id: u64,
    /// Season number.
    #[arg(long, required = true)]
    season: u32,
}

/// Arguments for the `providers` subcommand.
#[derive(clap::Args)]
struct ProvidersArgs {
    /// TMDB series ID.
    #[arg(long, required = true)]
    id: u64,
    /// Region code (ISO 3166-1).
    #[arg(long, default_value = "IT")]
    region: String,
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
    /// Store the TMDB v3 API key.
    SetApiKey {
        /// API key.
        key: String,
    },
    /// Store the TMDB read access token.
    SetAccessToken {
        /// Access token.
        token: String,
    },
    /// Show which credentials are configured.
    Show,
}

/// Loads the config file and applies `TMDB_API_KEY` / `TMDB_ACCESS_TOKEN`.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    Ok(config.with_credential_overrides(
        std::env::var("TMDB_API_KEY").ok(),
        std::env::var("TMDB_ACCESS_TOKEN").ok(),
    ))
}

/// Builds a `TmdbClient` for the given credential.
///
/// # Errors
///
/// Returns an error if the client fails to build.
fn build_client(credential: Credential) -> Result<TmdbClient> {
    TmdbClient::builder()
        .credential(credential)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build TMDB client")
}

/// Builds the client used for plain catalog reads.
///
/// # Errors
///
/// Returns an error if no credential is configured or the client fails to build.
fn catalog_client(config: &AppConfig) -> Result<TmdbClient> {
    build_client(config.tmdb.catalog_credential()?)
}

/// Completes on Ctrl-C; never completes if the handler cannot be installed.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if no credential is configured or a client fails to build.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, config: &AppConfig) -> Result<()> {
    let (primary, fallback) = config.tmdb.search_credentials()?;
    tracing::debug!(
        primary = primary.kind(),
        fallback = fallback.kind(),
        "Search transports"
    );
    let aggregator = SearchAggregator::new(build_client(primary)?, build_client(fallback)?);

    let options = SearchOptions {
        include_people: args.include_people,
    };
    let Some(response) = aggregator
        .search_cancellable(&args.query, args.page, options, interrupted())
        .await
    else {
        tracing::info!("Search cancelled");
        return Ok(());
    };

    render::search_response(&response);
    Ok(())
}

/// Runs the `popular` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_popular(args: &ListArgs, config: &AppConfig) -> Result<()> {
    let client = catalog_client(config)?;
    let params = ListParams::default()
        .language(&config.tmdb.language)
        .page(args.page);

    match args.kind {
        MediaKind::Movie => {
            let page = client
                .popular_movies(&params)
                .await
                .context("TMDB movie/popular request failed")?;
            render::movie_page(&page);
        }
        MediaKind::Tv => {
            let page = client
                .popular_tv(&params)
                .await
                .context("TMDB tv/popular request failed")?;
            render::tv_page(&page);
        }
    }
    Ok(())
}

/// Runs the `top-rated` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_top_rated(args: &ListArgs, config: &AppConfig) -> Result<()> {
    let client = catalog_client(config)?;
    let params = ListParams::default()
        .language(&config.tmdb.language)
        .page(args.page);

    match args.kind {
        MediaKind::Movie => {
            let page = client
                .top_rated_movies(&params)
                .await
                .context("TMDB movie/top_rated request failed")?;
            render::movie_page(&page);
        }
        MediaKind::Tv => {
            let page = client
                .top_rated_tv(&params)
                .await
                .context("TMDB tv/top_rated request failed")?;
            render::tv_page(&page);
        }
    }
    Ok(())
}

/// Runs the `airing-today` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_airing_today(args: &PageArgs, config: &AppConfig) -> Result<()> {
    let client = catalog_client(config)?;
    let params = ListParams::default()
        .language(&config.tmdb.language)
        .page(args.page);

    let page = client
        .tv_airing_today(&params)
        .await
        .context("TMDB tv/airing_today request failed")?;
    render::tv_page(&page);
    Ok(())
}

/// Runs the `tv-details` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_tv_details(args: &TvDetailsArgs, config: &AppConfig) -> Result<()> {
    let client = catalog_client(config)?;
    let details = client
        .tv_details(args.id, &config.tmdb.language)
        .await
        .context("TMDB tv details request failed")?;
    render::tv_details(&details);
    Ok(())
}

/// Runs the `tv-season` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_tv_season(args: &TvSeasonArgs, config: &AppConfig) -> Result<()> {
    let client = catalog_client(config)?;
    let season = client
        .tv_season(args.id, args.season, &config.tmdb.language)
        .await
        .context("TMDB tv season request failed")?;
    render::tv_season(&season);
    Ok(())
}

/// Runs the `providers` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_providers(args: &ProvidersArgs, config: &AppConfig) -> Result<()> {
    let client = catalog_client(config)?;
    let providers = client
        .tv_watch_providers(args.id)
        .await
        .context("TMDB watch providers request failed")?;
    render::watch_providers(&providers, &args.region);
    Ok(())
}

/// Runs the `config` subcommands against the file only (no env overrides).
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written.
#[instrument(skip_all)]
fn run_config(cmd: &ConfigSubcommands, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let mut config = AppConfig::load(&config_path).context("failed to load config")?;

    match cmd {
        ConfigSubcommands::SetApiKey { key } => {
            config.tmdb.api_key = Some(key.clone());
            config.save(&config_path).context("failed to save config")?;
            tracing::info!("Saved API key to {}", config_path.display());
        }
        ConfigSubcommands::SetAccessToken { token } => {
            config.tmdb.access_token = Some(token.clone());
            config.save(&config_path).context("failed to save config")?;
            tracing::info!("Saved access token to {}", config_path.display());
        }
        ConfigSubcommands::Show => {
            let state = |set: bool| if set { "set" } else { "not set" };
            tracing::info!("Config: {}", config_path.display());
            tracing::info!("API key: {}", state(config.tmdb.api_key.is_some()));
            tracing::info!("Access token: {}", state(config.tmdb.access_token.is_some()));
            tracing::info!("Language: {}", config.tmdb.language);
        }
    }
    Ok(())
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
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Search(args) => run_search(&args, &load_config(dir)?).await,
        Commands::Popular(args) => run_popular(&args, &load_config(dir)?).await,
        Commands::TopRated(args) => run_top_rated(&args, &load_config(dir)?).await,
        Commands::AiringToday(args) => run_airing_today(&args, &load_config(dir)?).await,
        Commands::TvDetails(args) => run_tv_details(&args, &load_config(dir)?).await,
        Commands::TvSeason(args) => run_tv_season(&args, &load_config(dir)?).await,
        Commands::Providers(args) => run_providers(&args, &load_config(dir)?).await,
        Commands::Config(cmd) => run_config(&cmd.command, dir),
    }
}
