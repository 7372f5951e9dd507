// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::broadcast_service::LiveBroadcastService;
use crate::application::command_service::CommandService;
use crate::application::dashboard_service::DashboardService;
use crate::application::query_service::TelemetryQueryService;
use crate::application::signal_generator::SignalGenerator;
use crate::application::telemetry_store::TelemetryStore;
use crate::infrastructure::config::load_server_config;
use crate::infrastructure::memory_store::MemoryStore;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_telemetry, health_check, list_dashboards, post_command, save_dashboard, telemetry_ws,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_server_config()?;

    // Create the store collaborator (infrastructure layer)
    let store: Arc<dyn TelemetryStore> = Arc::new(MemoryStore::new());

    // Background signal simulation; runs for the life of the process
    SignalGenerator::new(store.clone(), config.generator_interval()).spawn();

    // Create services (application layer)
    let state = Arc::new(AppState {
        query_service: TelemetryQueryService::new(store.clone()),
        command_service: CommandService::new(
            store.clone(),
            config.command_delay(),
            config.command_failure_rate,
        ),
        dashboard_service: DashboardService::new(store),
        broadcast_service: LiveBroadcastService::new(config.broadcast_interval()),
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/", get(health_check))
        .route("/api/telemetry", get(get_telemetry))
        .route("/api/command", post(post_command))
        .route("/api/dashboard", post(save_dashboard).get(list_dashboards))
        .route("/ws/telemetry", get(telemetry_ws))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    tracing::info!("starting mission-control service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
