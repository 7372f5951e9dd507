// Store collaborator trait for telemetry, command and dashboard records
use crate::domain::command::{Command, CommandParam, CommandStatus};
use crate::domain::dashboard::DashboardConfig;
use crate::domain::telemetry::SignalSample;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Filter applied to a sample scan. `range` is only populated when both
/// bounds were supplied; a single bound never filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleFilter {
    pub signal: Option<String>,
    pub range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

/// Command record ready to persist, status already resolved.
#[derive(Debug, Clone)]
pub struct NewCommand {
    pub name: String,
    pub code: String,
    pub status: CommandStatus,
    pub hazardous: bool,
    pub params: Vec<CommandParam>,
}

/// Durable storage seam. Implementations provide their own concurrency
/// safety for the generator writing while queries read.
#[async_trait]
pub trait TelemetryStore: Send + Sync {
    /// Append one signal sample.
    async fn insert_sample(
        &self,
        signal: &str,
        value: f64,
        time: DateTime<Utc>,
    ) -> anyhow::Result<SignalSample>;

    /// Scan samples most recent first, filtered, capped at `limit` rows.
    async fn query_samples(
        &self,
        filter: &SampleFilter,
        limit: usize,
    ) -> anyhow::Result<Vec<SignalSample>>;

    /// Persist a command record and assign its identifier.
    async fn insert_command(&self, command: NewCommand) -> anyhow::Result<Command>;

    /// Persist a dashboard layout and assign its identifier.
    async fn insert_dashboard(
        &self,
        name: &str,
        json_config: &str,
    ) -> anyhow::Result<DashboardConfig>;

    /// Every saved dashboard layout, oldest first.
    async fn list_dashboards(&self) -> anyhow::Result<Vec<DashboardConfig>>;
}

/// Store double whose every operation fails, for driving the internal-error
/// paths in service tests.
#[cfg(test)]
pub struct FailingStore;

#[cfg(test)]
#[async_trait]
impl TelemetryStore for FailingStore {
    async fn insert_sample(
        &self,
        _signal: &str,
        _value: f64,
        _time: DateTime<Utc>,
    ) -> anyhow::Result<SignalSample> {
        anyhow::bail!("store unavailable")
    }

    async fn query_samples(
        &self,
        _filter: &SampleFilter,
        _limit: usize,
    ) -> anyhow::Result<Vec<SignalSample>> {
        anyhow::bail!("store unavailable")
    }

    async fn insert_command(&self, _command: NewCommand) -> anyhow::Result<Command> {
        anyhow::bail!("store unavailable")
    }

    async fn insert_dashboard(
        &self,
        _name: &str,
        _json_config: &str,
    ) -> anyhow::Result<DashboardConfig> {
        anyhow::bail!("store unavailable")
    }

    async fn list_dashboards(&self) -> anyhow::Result<Vec<DashboardConfig>> {
        anyhow::bail!("store unavailable")
    }
}
