// Server configuration loading
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Seconds between generated sample batches.
    pub generator_interval_secs: u64,
    /// Seconds between frames pushed to each live viewer.
    pub broadcast_interval_secs: u64,
    /// Simulated command execution latency, in milliseconds.
    pub command_delay_ms: u64,
    /// Probability in [0, 1] that a command execution fails.
    pub command_failure_rate: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            generator_interval_secs: 2,
            broadcast_interval_secs: 1,
            command_delay_ms: 1000,
            command_failure_rate: 0.2,
        }
    }
}

impl ServerConfig {
    pub fn generator_interval(&self) -> Duration {
        Duration::from_secs(self.generator_interval_secs)
    }

    pub fn broadcast_interval(&self) -> Duration {
        Duration::from_secs(self.broadcast_interval_secs)
    }

    pub fn command_delay(&self) -> Duration {
        Duration::from_millis(self.command_delay_ms)
    }
}

/// Load `config/server.toml` if present; every setting has a default, so a
/// missing file yields a fully usable config.
pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/server").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}
