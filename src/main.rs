mod api;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;

use clap::Parser;
use cli::Cli;
use config::Config;
use datasources::{MarketClient, OpenWeatherMapClient};
use models::MarketPrice;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load configuration
    let mut config = match Config::load(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Please copy config/config.yaml.example to config/config.yaml");
            std::process::exit(1);
        }
    };
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let weather = OpenWeatherMapClient::new(config.openweathermap.clone());
    let market = MarketClient::new(config.market.clone());

    let state = api::AppState {
        weather: Arc::new(weather),
        market_prices: Arc::new(RwLock::new(Vec::new())),
        base_temp_c: config.agronomy.base_temp_c,
    };

    spawn_market_refresh(
        market,
        state.market_prices.clone(),
        config.market.refresh_minutes,
    );

    let app = api::router(state);

    let host: IpAddr = config
        .server
        .host
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid server.host {:?}: {}", config.server.host, e))?;
    let addr = SocketAddr::from((host, config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Re-fetch the market ticker on a fixed interval. The first tick fires
/// immediately, so the cache is populated at startup. Failures keep the
/// previous cache contents.
fn spawn_market_refresh(
    client: MarketClient,
    cache: Arc<RwLock<Vec<MarketPrice>>>,
    refresh_minutes: u64,
) {
    tokio::spawn(async move {
        let mut ticker =
            tokio::time::interval(Duration::from_secs(refresh_minutes.max(1) * 60));
        loop {
            ticker.tick().await;
            match client.fetch_prices().await {
                Ok(prices) => {
                    tracing::debug!("Refreshed {} market price rows", prices.len());
                    *cache.write().await = prices;
                }
                Err(e) => {
                    tracing::warn!("Market price refresh failed: {}", e);
                }
            }
        }
    });
}
