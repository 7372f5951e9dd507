// Live broadcast service - per-viewer streaming loops
use crate::domain::telemetry::{format_time, LiveReading};
use axum::extract::ws::{Message, WebSocket};
use chrono::Utc;
use futures::{SinkExt, StreamExt};
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Pushes a synthesized reading to every connected live viewer on its own
/// cadence. Each viewer is served by an isolated loop with its own ticker,
/// so a slow or dead peer never holds up the others. There is no buffering
/// or replay: a viewer that misses a tick misses it.
pub struct LiveBroadcastService {
    interval: Duration,
    viewers: AtomicUsize,
}

impl LiveBroadcastService {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            viewers: AtomicUsize::new(0),
        }
    }

    /// Currently connected viewers.
    pub fn viewer_count(&self) -> usize {
        self.viewers.load(Ordering::Relaxed)
    }

    /// Serve one viewer until its socket goes away. The socket and ticker
    /// are dropped on every exit path; the viewer must reconnect to resume.
    pub async fn serve_viewer(&self, socket: WebSocket) {
        self.viewers.fetch_add(1, Ordering::Relaxed);
        tracing::info!(viewers = self.viewer_count(), "live viewer connected");

        let (mut sink, mut stream) = socket.split();
        let mut ticker = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let frame = match serde_json::to_string(&self.synthesize_reading()) {
                        Ok(frame) => frame,
                        Err(err) => {
                            tracing::warn!("failed to encode live reading: {}", err);
                            continue;
                        }
                    };
                    if sink.send(Message::Text(frame)).await.is_err() {
                        break;
                    }
                }
                inbound = stream.next() => {
                    // Viewers are not expected to send anything; only a
                    // close frame or a dead socket matters.
                    match inbound {
                        None | Some(Err(_)) | Some(Ok(Message::Close(_))) => break,
                        Some(Ok(_)) => {}
                    }
                }
            }
        }

        self.viewers.fetch_sub(1, Ordering::Relaxed);
        tracing::info!(viewers = self.viewer_count(), "live viewer disconnected");
    }

    /// One synthesized snapshot of the current readings. Independent of the
    /// persisted samples.
    pub fn synthesize_reading(&self) -> LiveReading {
        let mut rng = rand::thread_rng();
        LiveReading {
            temp: rng.gen_range(50.0..150.0),
            pressure: rng.gen_range(10.0..60.0),
            voltage: rng.gen_range(1.0..6.0),
            time: format_time(Utc::now()),
            status: "OK".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_has_exactly_the_broadcast_keys() {
        let service = LiveBroadcastService::new(Duration::from_secs(1));
        let json = serde_json::to_value(service.synthesize_reading()).unwrap();

        let object = json.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["pressure", "status", "temp", "time", "voltage"]);
        assert_eq!(object["status"], "OK");
    }

    #[test]
    fn test_reading_values_are_in_range() {
        let service = LiveBroadcastService::new(Duration::from_secs(1));
        for _ in 0..100 {
            let reading = service.synthesize_reading();
            assert!((50.0..150.0).contains(&reading.temp));
            assert!((10.0..60.0).contains(&reading.pressure));
            assert!((1.0..6.0).contains(&reading.voltage));
        }
    }

    #[test]
    fn test_viewer_count_starts_at_zero() {
        let service = LiveBroadcastService::new(Duration::from_secs(1));
        assert_eq!(service.viewer_count(), 0);
    }
}
