// Command gate - validation, simulated execution, persistence
use crate::application::error::ServiceError;
use crate::application::telemetry_store::{NewCommand, TelemetryStore};
use crate::domain::command::{Command, CommandRequest, CommandStatus};
use std::sync::Arc;
use std::time::Duration;

/// Required length of the authorization code on hazardous commands. Only the
/// length is checked, not digit composition.
const AUTH_CODE_LEN: usize = 6;

#[derive(Clone)]
pub struct CommandService {
    store: Arc<dyn TelemetryStore>,
    execution_delay: Duration,
    failure_rate: f64,
}

impl CommandService {
    pub fn new(store: Arc<dyn TelemetryStore>, execution_delay: Duration, failure_rate: f64) -> Self {
        Self {
            store,
            execution_delay,
            failure_rate,
        }
    }

    /// Validate, simulate execution, persist on success. Validation failures
    /// return before the simulated delay ever starts; a simulated execution
    /// failure persists nothing.
    pub async fn submit(&self, request: CommandRequest) -> Result<Command, ServiceError> {
        self.validate(&request)?;

        // Models uplink latency and an unreliable link, so callers exercise
        // their retry and error paths even against the simulator.
        tokio::time::sleep(self.execution_delay).await;
        if rand::random::<f64>() < self.failure_rate {
            tracing::warn!(command = %request.name, "simulated command failure");
            return Err(ServiceError::SimulatedFailure);
        }

        let command = self
            .store
            .insert_command(NewCommand {
                name: request.name,
                code: request.code,
                status: CommandStatus::Success,
                hazardous: request.hazardous,
                params: request.params,
            })
            .await?;

        tracing::info!(command = %command.name, id = command.id, "command executed");
        Ok(command)
    }

    fn validate(&self, request: &CommandRequest) -> Result<(), ServiceError> {
        if request.name.is_empty() {
            return Err(ServiceError::Validation("command name required".to_string()));
        }
        if request.hazardous && request.code.len() != AUTH_CODE_LEN {
            return Err(ServiceError::Validation(
                "Hazardous commands require a 6-digit 2FA code".to_string(),
            ));
        }
        if request.params.iter().any(|p| p.key.is_empty()) {
            return Err(ServiceError::Validation(
                "Each parameter must have a key".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::telemetry_store::FailingStore;
    use crate::domain::command::CommandParam;
    use crate::infrastructure::memory_store::MemoryStore;

    const NO_DELAY: Duration = Duration::ZERO;
    const NEVER_FAILS: f64 = 0.0;
    const ALWAYS_FAILS: f64 = 1.0;

    fn request(name: &str) -> CommandRequest {
        CommandRequest {
            name: name.to_string(),
            ..CommandRequest::default()
        }
    }

    #[tokio::test]
    async fn test_successful_command_is_persisted() {
        let store = Arc::new(MemoryStore::new());
        let service = CommandService::new(store.clone(), NO_DELAY, NEVER_FAILS);

        let command = service.submit(request("CALIBRATE")).await.unwrap();
        assert_eq!(command.id, 1);
        assert_eq!(command.status, CommandStatus::Success);
        assert_eq!(store.command_count().await, 1);
    }

    #[tokio::test]
    async fn test_simulated_failure_persists_nothing() {
        let store = Arc::new(MemoryStore::new());
        let service = CommandService::new(store.clone(), NO_DELAY, ALWAYS_FAILS);

        let err = service.submit(request("CALIBRATE")).await.unwrap_err();
        assert!(matches!(err, ServiceError::SimulatedFailure));
        assert_eq!(store.command_count().await, 0);
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let store = Arc::new(MemoryStore::new());
        let service = CommandService::new(store.clone(), NO_DELAY, NEVER_FAILS);

        let err = service.submit(request("")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(m) if m == "command name required"));
        assert_eq!(store.command_count().await, 0);
    }

    #[tokio::test]
    async fn test_hazardous_code_must_be_six_characters() {
        let store = Arc::new(MemoryStore::new());
        let service = CommandService::new(store.clone(), NO_DELAY, NEVER_FAILS);

        let mut bad = request("DELETE_ALL");
        bad.hazardous = true;
        bad.code = "123".to_string();

        let err = service.submit(bad).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(m) if m == "Hazardous commands require a 6-digit 2FA code"
        ));
        assert_eq!(store.command_count().await, 0);
    }

    #[tokio::test]
    async fn test_six_letter_code_passes_the_gate() {
        // Length is the contract; digit composition is not enforced.
        let store = Arc::new(MemoryStore::new());
        let service = CommandService::new(store, NO_DELAY, NEVER_FAILS);

        let mut hazardous = request("DELETE_ALL");
        hazardous.hazardous = true;
        hazardous.code = "ABCDEF".to_string();

        let command = service.submit(hazardous).await.unwrap();
        assert_eq!(command.status, CommandStatus::Success);
    }

    #[tokio::test]
    async fn test_param_without_key_rejected() {
        let store = Arc::new(MemoryStore::new());
        let service = CommandService::new(store.clone(), NO_DELAY, NEVER_FAILS);

        let mut bad = request("SET_MODE");
        bad.params = vec![
            CommandParam {
                key: "mode".to_string(),
                value: "safe".to_string(),
            },
            CommandParam {
                key: String::new(),
                value: "orphan".to_string(),
            },
        ];

        let err = service.submit(bad).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(m) if m == "Each parameter must have a key"));
        assert_eq!(store.command_count().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_validation_returns_before_the_simulated_delay() {
        let store = Arc::new(MemoryStore::new());
        let service = CommandService::new(store, Duration::from_secs(1), NEVER_FAILS);

        let before = tokio::time::Instant::now();
        let err = service.submit(request("")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        // The paused clock only advances across sleeps; a rejected command
        // must not have slept.
        assert_eq!(tokio::time::Instant::now(), before);
    }

    #[tokio::test]
    async fn test_persist_failure_surfaces_as_internal() {
        let service = CommandService::new(Arc::new(FailingStore), NO_DELAY, NEVER_FAILS);
        let err = service.submit(request("CALIBRATE")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Internal(_)));
    }
}
