//! LiveSignal Dashboard Server
//!
//! Run with: cargo run --bin livesignal
//!
//! # Configuration
//!
//! Reads `--config <path>` or the first config file found in the default
//! locations (a malformed file stops startup), then applies environment
//! overrides:
//! - `LIVESIGNAL_API_KEY` / `GEMINI_API_KEY` / `API_KEY`: Gemini API key
//! - `LIVESIGNAL_MODEL`: Model name (default: gemini-3-flash-preview)
//! - `LIVESIGNAL_GEMINI_URL`: Gemini REST endpoint
//! - `LIVESIGNAL_API_HOST`: Host to bind to (default: 127.0.0.1)
//! - `LIVESIGNAL_API_PORT`: Port to listen on (default: 8090)
//! - `LIVESIGNAL_LOG_LEVEL` / `LIVESIGNAL_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full filter directive, overrides the log level

use clap::Parser;
use livesignal::api::{serve, AppState};
use livesignal::config::{Config, LoggingConfig};
use livesignal::gemini::GeminiClient;
use livesignal::session::Session;
use livesignal::signal::SignalVerifier;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "livesignal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "LiveSignal dashboard server")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (config, config_path) = Config::resolve(args.config.as_deref())?;

    init_tracing(&config.logging);

    tracing::info!("Starting LiveSignal v{}", env!("CARGO_PKG_VERSION"));
    match &config_path {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }

    // Gemini transport
    let client = GeminiClient::new(config.gemini.client_config())?;
    if config.gemini.api_key.is_none() {
        tracing::warn!(
            "No Gemini API key configured (set LIVESIGNAL_API_KEY); verifications will fail"
        );
    } else {
        match client.check_model().await {
            Ok(()) => tracing::info!("Gemini model {} reachable", client.config().model),
            Err(e) => tracing::warn!("Gemini model check failed: {} (continuing anyway)", e),
        }
    }

    let verifier = Arc::new(SignalVerifier::new(
        Arc::new(client),
        config.gemini.verifier_config(),
    ));

    let watchlist = config.watchlist.build();
    tracing::info!("Watchlist seeded with {} topics", watchlist.len());

    let state = AppState::new(
        verifier,
        Session::with_watchlist(watchlist),
        config.api.clone(),
    );

    // Initial trend fetch runs in the background so startup is not blocked
    let trends_state = state.clone();
    tokio::spawn(async move {
        let topics = trends_state.refresh_trends().await;
        tracing::info!("Loaded {} trending topics", topics.len());
    });

    serve(state).await?;

    tracing::info!("LiveSignal stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("livesignal={},tower_http=info", logging.level))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
