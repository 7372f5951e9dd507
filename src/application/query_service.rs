// Telemetry query service - time-windowed retrieval and grouping
use crate::application::error::ServiceError;
use crate::application::telemetry_store::{SampleFilter, TelemetryStore};
use crate::domain::telemetry::GroupedReading;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Rows fetched from the store per query, post-filter and pre-grouping.
/// Grouping may legitimately yield fewer rows when signals share timestamps.
const MAX_ROWS: usize = 300;

#[derive(Clone)]
pub struct TelemetryQueryService {
    store: Arc<dyn TelemetryStore>,
}

impl TelemetryQueryService {
    pub fn new(store: Arc<dyn TelemetryStore>) -> Self {
        Self { store }
    }

    /// Fetch recent samples and fold them into one reading per timestamp,
    /// newest first. Bounds must be RFC 3339 when supplied; the range only
    /// narrows the scan when both bounds are present.
    pub async fn query(
        &self,
        signal: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Vec<GroupedReading>, ServiceError> {
        let start = parse_bound(start, "Invalid start time format")?;
        let end = parse_bound(end, "Invalid end time format")?;

        let filter = SampleFilter {
            signal: signal.filter(|s| !s.is_empty()).map(str::to_string),
            range: start.zip(end),
        };

        let samples = self.store.query_samples(&filter, MAX_ROWS).await?;

        // Keyed by the canonical timestamp string. RFC 3339 UTC strings sort
        // lexicographically in time order, so walking the map backwards
        // yields groups newest first.
        let mut grouped: BTreeMap<String, GroupedReading> = BTreeMap::new();
        for sample in samples {
            grouped
                .entry(sample.time_key())
                .or_insert_with_key(|key| GroupedReading::new(key.clone()))
                .insert(sample.signal, sample.value);
        }

        Ok(grouped.into_values().rev().collect())
    }
}

fn parse_bound(raw: Option<&str>, message: &str) -> Result<Option<DateTime<Utc>>, ServiceError> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => DateTime::parse_from_rfc3339(value)
            .map(|time| Some(time.with_timezone(&Utc)))
            .map_err(|_| ServiceError::Validation(message.to_string())),
    }
}
