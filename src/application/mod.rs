// Application layer - Services and collaborator seams
pub mod broadcast_service;
pub mod command_service;
pub mod dashboard_service;
pub mod error;
pub mod query_service;
pub mod signal_generator;
pub mod telemetry_store;
