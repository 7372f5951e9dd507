// Dashboard service - save and list layout configs
use crate::application::error::ServiceError;
use crate::application::telemetry_store::TelemetryStore;
use crate::domain::dashboard::{DashboardConfig, DashboardRequest};
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn TelemetryStore>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn TelemetryStore>) -> Self {
        Self { store }
    }

    /// Persist a layout. Saving again under the same name creates a new
    /// record rather than updating the old one.
    pub async fn save(&self, request: DashboardRequest) -> Result<DashboardConfig, ServiceError> {
        if request.name.is_empty() || request.json_config.is_empty() {
            return Err(ServiceError::Validation(
                "name and JsonConfig required".to_string(),
            ));
        }

        let config = self
            .store
            .insert_dashboard(&request.name, &request.json_config)
            .await?;
        Ok(config)
    }

    /// All saved layouts whose blob still parses as JSON; anything else is
    /// dropped from the result.
    pub async fn list(&self) -> Result<Vec<DashboardConfig>, ServiceError> {
        let configs = self.store.list_dashboards().await?;
        Ok(configs
            .into_iter()
            .filter(DashboardConfig::has_valid_layout)
            .collect())
    }
}
