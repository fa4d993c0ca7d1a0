mod config;
mod errors;
mod extract;
mod models;
mod routes;
mod screening;
mod sessions;
mod state;
mod summarize;
mod wordcloud;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::sessions::SessionStore;
use crate::state::AppState;
use crate::summarize::{RemoteSummarizer, Summarizer};
use crate::wordcloud::{Visualizer, WordcloudRenderer};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Screener API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the summarizer backend
    let summarizer: Arc<dyn Summarizer> = Arc::new(RemoteSummarizer::from_config(&config));
    info!("Summarizer initialized (model: {})", config.summarizer_model);

    // Initialize the word cloud renderer (fails fast on a missing font)
    let visualizer: Arc<dyn Visualizer> =
        Arc::new(WordcloudRenderer::from_font_path(&config.wordcloud_font_path)?);
    info!(
        "Word cloud renderer initialized (font: {})",
        config.wordcloud_font_path.display()
    );

    // Build app state
    let state = AppState {
        sessions: SessionStore::new(),
        summarizer,
        visualizer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
