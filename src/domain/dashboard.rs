// Dashboard layout domain model
use serde::{Deserialize, Serialize};

/// Saved dashboard layout. Records are never updated in place; re-saving a
/// layout creates a new record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardConfig {
    pub id: u64,
    pub name: String,
    #[serde(rename = "jsonConfig")]
    pub json_config: String,
}

impl DashboardConfig {
    pub fn new(id: u64, name: String, json_config: String) -> Self {
        Self {
            id,
            name,
            json_config,
        }
    }

    /// Whether the stored layout blob is syntactically valid JSON. Queries
    /// only return configs that pass this check.
    pub fn has_valid_layout(&self) -> bool {
        serde_json::from_str::<serde_json::Value>(&self.json_config).is_ok()
    }
}

/// Inbound save request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "jsonConfig")]
    pub json_config: String,
}
