// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::{DashboardService, DataSources};
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::csv_repository::CsvRepository;
use crate::infrastructure::table_cache::CachedTableSource;
use crate::presentation::app_state::{AppState, ViewSettings};
use crate::presentation::handlers::{
    dashboard_json, health_check, index, login, login_page, logout, refresh_data,
    reset_settings, update_settings,
};
use crate::presentation::session_store::SessionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("aquaeco_dashboard=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create table source (infrastructure layer)
    let repository = CsvRepository::new(config.sources.fetch_timeout_secs.map(Duration::from_secs))?;
    let cache_ttl = config.sources.cache_ttl_secs.map(Duration::from_secs);
    let source = Arc::new(CachedTableSource::new(repository, cache_ttl));
    match cache_ttl {
        Some(ttl) => tracing::info!("CSV tables cached for {:?}", ttl),
        None => tracing::info!("CSV tables cached until restart or manual refresh"),
    }

    // Create services (application layer)
    let dashboard_service = DashboardService::new(
        source,
        DataSources {
            energy_url: config.sources.energy_url.clone(),
            water_url: config.sources.water_url.clone(),
        },
    );

    // Create application state
    let view = ViewSettings::from_config(&config);
    if view.auth_enabled {
        tracing::info!("Password gate enabled");
    }
    let state = Arc::new(AppState {
        dashboard_service,
        sessions: SessionStore::new(Duration::from_secs(config.server.session_idle_secs)),
        view,
        password: config.auth.password.clone(),
    });

    // Build router (presentation layer)
    // Pages are compressed in the response builders, so no CompressionLayer here
    let router = Router::new()
        .route("/", get(index))
        .route("/settings", post(update_settings))
        .route("/settings/reset", post(reset_settings))
        .route("/refresh", post(refresh_data))
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
        .route("/api/dashboard", get(dashboard_json))
        .route("/healthz", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting aquaeco-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
