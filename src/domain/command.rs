// Command domain model
use serde::{Deserialize, Serialize};

/// A single key-value input for a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandParam {
    pub key: String,
    pub value: String,
}

/// Outcome recorded on a command before it is persisted. A command that is
/// still in flight has no status; the record is immutable once written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandStatus {
    Success,
    Error,
}

/// Persisted command record with its assigned identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Command {
    pub id: u64,
    pub name: String,
    pub code: String,
    pub status: CommandStatus,
    pub hazardous: bool,
    pub params: Vec<CommandParam>,
}

/// Inbound command submission, before validation and outcome resolution.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub hazardous: bool,
    #[serde(default)]
    pub params: Vec<CommandParam>,
}
