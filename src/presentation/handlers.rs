// HTTP request handlers
use crate::application::error::ServiceError;
use crate::domain::command::{Command, CommandRequest};
use crate::domain::dashboard::{DashboardConfig, DashboardRequest};
use crate::domain::telemetry::GroupedReading;
use crate::presentation::app_state::AppState;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct TelemetryParams {
    pub signal: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Liveness probe.
pub async fn health_check() -> &'static str {
    "Mission Control backend is running"
}

/// Recent telemetry grouped by timestamp, optionally filtered by signal and
/// time range.
pub async fn get_telemetry(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TelemetryParams>,
) -> Result<Json<Vec<GroupedReading>>, ServiceError> {
    let readings = state
        .query_service
        .query(
            params.signal.as_deref(),
            params.start.as_deref(),
            params.end.as_deref(),
        )
        .await?;
    Ok(Json(readings))
}

/// Submit a command through the gate. Hazardous commands require a 6-digit
/// 2FA code.
pub async fn post_command(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CommandRequest>,
) -> Result<Json<Command>, ServiceError> {
    let command = state.command_service.submit(request).await?;
    Ok(Json(command))
}

/// Save a dashboard layout.
pub async fn save_dashboard(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DashboardRequest>,
) -> Result<Json<DashboardConfig>, ServiceError> {
    let config = state.dashboard_service.save(request).await?;
    Ok(Json(config))
}

/// Saved dashboard layouts with a valid JSON blob.
pub async fn list_dashboards(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DashboardConfig>>, ServiceError> {
    let configs = state.dashboard_service.list().await?;
    Ok(Json(configs))
}

/// Upgrade to the live telemetry stream. The viewer receives one JSON frame
/// per broadcast tick until it disconnects.
pub async fn telemetry_ws(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| async move {
        state.broadcast_service.serve_viewer(socket).await;
    })
    .into_response()
}
