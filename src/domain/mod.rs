// Domain layer - Core data model
pub mod command;
pub mod dashboard;
pub mod telemetry;
