// Telemetry data domain models
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One persisted reading of one signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSample {
    pub id: u64,
    pub signal: String,
    pub value: f64,
    pub time: DateTime<Utc>,
}

impl SignalSample {
    pub fn new(id: u64, signal: String, value: f64, time: DateTime<Utc>) -> Self {
        Self {
            id,
            signal,
            value,
            time,
        }
    }

    /// Canonical textual timestamp used to group samples across signals.
    pub fn time_key(&self) -> String {
        format_time(self.time)
    }
}

/// RFC 3339, UTC, second precision. All timestamps rendered to clients go
/// through here so samples taken in the same tick land in the same group.
pub fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Derived row combining every signal observed at one timestamp.
/// Serializes flat: `{"time": "...", "temp": 1.0, "pressure": 2.0}`.
/// Signals absent at that timestamp are absent keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedReading {
    pub time: String,
    #[serde(flatten)]
    pub signals: BTreeMap<String, f64>,
}

impl GroupedReading {
    pub fn new(time: String) -> Self {
        Self {
            time,
            signals: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, signal: String, value: f64) {
        self.signals.insert(signal, value);
    }
}

/// Snapshot pushed to live viewers. Synthesized, never read from the store.
#[derive(Debug, Clone, Serialize)]
pub struct LiveReading {
    pub temp: f64,
    pub pressure: f64,
    pub voltage: f64,
    pub time: String,
    pub status: String,
}
