use async_trait::async_trait;
use thiserror::Error;

use super::Event;

/// Errors from the upstream event listings service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventSourceError {
    #[error("Upstream request failed: {0}")]
    Request(String),
    #[error("Upstream returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),
}

/// Result type for event source operations.
pub type Result<T> = std::result::Result<T, EventSourceError>;

/// Read-only source of event listings.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Lists events near a city.
    async fn list_events(&self, city: &str) -> Result<Vec<Event>>;

    /// Lists the featured events of a city.
    async fn featured_events(&self, city: &str) -> Result<Vec<Event>>;

    /// Gets an event by id. Returns `None` when the upstream does not know it.
    async fn get_event(&self, id: &str) -> Result<Option<Event>>;
}
