// In-process store implementation
use crate::application::telemetry_store::{NewCommand, SampleFilter, TelemetryStore};
use crate::domain::command::Command;
use crate::domain::dashboard::DashboardConfig;
use crate::domain::telemetry::SignalSample;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// Store collaborator backed by process memory. Safe for the generator
/// writing while queries read; retention is the process lifetime. Identifiers
/// are assigned per record type, starting at 1.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    samples: Vec<SignalSample>,
    commands: Vec<Command>,
    dashboards: Vec<DashboardConfig>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted commands; there is no read path for commands in
    /// the service surface, so tests inspect the store directly.
    #[cfg(test)]
    pub async fn command_count(&self) -> usize {
        self.inner.read().await.commands.len()
    }
}

#[async_trait]
impl TelemetryStore for MemoryStore {
    async fn insert_sample(
        &self,
        signal: &str,
        value: f64,
        time: DateTime<Utc>,
    ) -> anyhow::Result<SignalSample> {
        let mut tables = self.inner.write().await;
        let id = tables.samples.len() as u64 + 1;
        let sample = SignalSample::new(id, signal.to_string(), value, time);
        tables.samples.push(sample.clone());
        Ok(sample)
    }

    async fn query_samples(
        &self,
        filter: &SampleFilter,
        limit: usize,
    ) -> anyhow::Result<Vec<SignalSample>> {
        let tables = self.inner.read().await;
        let mut matches: Vec<SignalSample> = tables
            .samples
            .iter()
            .filter(|sample| {
                filter
                    .signal
                    .as_ref()
                    .is_none_or(|signal| &sample.signal == signal)
            })
            .filter(|sample| {
                filter
                    .range
                    .is_none_or(|(start, end)| sample.time >= start && sample.time <= end)
            })
            .cloned()
            .collect();

        // Most recent first; the sort is stable, so samples written in the
        // same instant keep their insertion order.
        matches.sort_by(|a, b| b.time.cmp(&a.time));
        matches.truncate(limit);
        Ok(matches)
    }

    async fn insert_command(&self, command: NewCommand) -> anyhow::Result<Command> {
        let mut tables = self.inner.write().await;
        let record = Command {
            id: tables.commands.len() as u64 + 1,
            name: command.name,
            code: command.code,
            status: command.status,
            hazardous: command.hazardous,
            params: command.params,
        };
        tables.commands.push(record.clone());
        Ok(record)
    }

    async fn insert_dashboard(
        &self,
        name: &str,
        json_config: &str,
    ) -> anyhow::Result<DashboardConfig> {
        let mut tables = self.inner.write().await;
        let config = DashboardConfig::new(
            tables.dashboards.len() as u64 + 1,
            name.to_string(),
            json_config.to_string(),
        );
        tables.dashboards.push(config.clone());
        Ok(config)
    }

    async fn list_dashboards(&self) -> anyhow::Result<Vec<DashboardConfig>> {
        Ok(self.inner.read().await.dashboards.clone())
    }
}
