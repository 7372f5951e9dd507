// Background signal simulation
use crate::application::telemetry_store::TelemetryStore;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Fixed registry of simulated signals.
pub const SIGNALS: [&str; 3] = ["temp", "pressure", "voltage"];

/// Produces one sample per registered signal on every tick and hands it to
/// the store. Fire and forget: a failed insert is logged and the stream
/// keeps going.
pub struct SignalGenerator {
    store: Arc<dyn TelemetryStore>,
    interval: Duration,
}

impl SignalGenerator {
    pub fn new(store: Arc<dyn TelemetryStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Spawn the generation loop for the life of the process.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            loop {
                ticker.tick().await;
                self.tick().await;
            }
        })
    }

    async fn tick(&self) {
        let now = Utc::now();
        for signal in SIGNALS {
            let value = rand::random::<f64>() * 100.0;
            if let Err(err) = self.store.insert_sample(signal, value, now).await {
                tracing::warn!(signal, "failed to persist sample: {:#}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::telemetry_store::{FailingStore, SampleFilter};
    use crate::infrastructure::memory_store::MemoryStore;

    #[tokio::test(start_paused = true)]
    async fn test_every_registered_signal_is_sampled() {
        let store = Arc::new(MemoryStore::new());
        let generator = SignalGenerator::new(store.clone(), Duration::from_secs(2));
        let handle = generator.spawn();

        tokio::time::sleep(Duration::from_secs(5)).await;
        handle.abort();

        let samples = store
            .query_samples(&SampleFilter::default(), 300)
            .await
            .unwrap();
        // First tick fires immediately, then every two seconds.
        assert!(samples.len() >= 6);
        for signal in SIGNALS {
            assert!(samples.iter().any(|s| s.signal == signal));
        }
        assert!(samples.iter().all(|s| (0.0..100.0).contains(&s.value)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_persist_failure_does_not_halt_the_loop() {
        let generator = SignalGenerator::new(Arc::new(FailingStore), Duration::from_secs(2));
        let handle = generator.spawn();

        tokio::time::sleep(Duration::from_secs(7)).await;
        assert!(!handle.is_finished());
        handle.abort();
    }
}
