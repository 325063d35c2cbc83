use async_trait::async_trait;
use court_booker_types::{SessionId, TimeSlotGrid};
use thiserror::Error;

/// Produces the availability grid for a booking run
#[async_trait]
pub trait AvailabilitySource: Send + Sync {
    /// Fetch a fresh snapshot; called once per run
    async fn fetch(&self) -> Result<TimeSlotGrid, SourceError>;
}

/// Performs the reservation side effect
#[async_trait]
pub trait ActionSink: Send + Sync {
    /// Reserve one session. `Ok(false)` means the facility declined it.
    async fn reserve(&self, session_id: &SessionId) -> Result<bool, SinkError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("malformed availability payload: {0}")]
    Payload(String),
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed reservation response: {0}")]
    Payload(String),
}
