//! Technology News API Server
//!
//! HTTP API server that stores technology headlines from NewsAPI.org and
//! serves them as JSON.

mod config;
mod error;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use newsapi_services::{NewsService, NewsStorage, ReloadConfig};
use newsapi_source::{ArticleSource, NewsApiClient};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::AppConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub news_service: Arc<NewsService>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if the file doesn't exist
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,newsapi_server=debug")),
        )
        .init();

    info!("Starting Technology News API");

    let config = AppConfig::from_env()?;

    // Initialize news storage (SQLite database)
    info!("Initializing news storage at: {}", config.db_path.display());
    let storage = Arc::new(NewsStorage::new(&config.db_path)?);

    // NEWSAPI_KEY is optional - stored news are served without it
    let source: Option<Arc<dyn ArticleSource>> = match &config.api_key {
        Some(api_key) => {
            let client = NewsApiClient::new(api_key.clone(), &config.base_url)?;
            info!("NewsAPI client configured for {}", client.endpoint());
            Some(Arc::new(client))
        }
        None => {
            warn!("NEWSAPI_KEY not set - reload requests will be ignored");
            None
        }
    };

    let news_service = NewsService::new(
        storage,
        source,
        ReloadConfig {
            query: config.query.clone(),
            offset: config.utc_offset,
        },
    );

    let state = AppState {
        news_service: Arc::new(news_service),
    };

    let app = routes::app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
