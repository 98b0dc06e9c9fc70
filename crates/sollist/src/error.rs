use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::soll_ist::{IngestError, PeriodError, SnapshotError};

/// Errors surfaced by the calling layer. The engine itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("invalid period: {0}")]
    Period(#[from] PeriodError),
    #[error("{0}")]
    Snapshot(#[from] SnapshotError),
    #[error("invalid portfolio data: {0}")]
    Ingest(#[from] IngestError),
}
