// Application state for HTTP handlers
use crate::application::broadcast_service::LiveBroadcastService;
use crate::application::command_service::CommandService;
use crate::application::dashboard_service::DashboardService;
use crate::application::query_service::TelemetryQueryService;

pub struct AppState {
    pub query_service: TelemetryQueryService,
    pub command_service: CommandService,
    pub dashboard_service: DashboardService,
    pub broadcast_service: LiveBroadcastService,
}
