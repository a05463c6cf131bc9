mod analysis;
mod config;
mod errors;
mod jobs;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::analysis::HttpResumeAnalyzer;
use crate::config::Config;
use crate::jobs::aggregator::JobAggregator;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // One connection pool shared by every provider and the analyzer; timeouts are per request.
    let http = reqwest::Client::new();

    let aggregator = JobAggregator::from_settings(
        http.clone(),
        &config.providers,
        config.job_fetch_deadline,
    );
    info!(
        "Job aggregator initialized (deadline: {}s)",
        config.job_fetch_deadline.as_secs()
    );

    let analyzer = HttpResumeAnalyzer::new(http, config.analyzer_url.clone());
    info!("Resume analyzer client initialized ({})", config.analyzer_url);

    let state = AppState {
        aggregator: Arc::new(aggregator),
        analyzer: Arc::new(analyzer),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
