//! EventPublisher port - Interface for publishing domain events.
//!
//! The engine publishes lifecycle events without knowing the transport.
//! Delivery is at-least-once; consumers must tolerate duplicates.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish multiple events in order.
    ///
    /// Default implementation publishes sequentially and stops at the first
    /// failure; adapters with a transactional transport may override.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}
