use thiserror::Error;
use uuid::Uuid;

/// Error type that captures reconciliation failures.
///
/// Read-path aggregation degrades per-row problems instead of raising;
/// these variants surface on write paths and at the source boundary.
#[derive(Debug, Error)]
pub enum ReconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("unknown purchase: {0}")]
    UnknownPurchase(Uuid),
    #[error("inconsistent settlement: {0}")]
    InconsistentSettlement(String),
    #[error("source fetch failed: {0}")]
    SourceFetch(String),
}
