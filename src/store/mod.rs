//! Persistence for events.
//!
//! Handlers talk to an [`EventStore`]; production wires in [`MySqlEventStore`],
//! which opens a fresh connection for every call and never pools.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Event, NewEvent};

#[cfg(test)]
pub mod memory;
pub mod mysql;

#[cfg(test)]
pub use memory::InMemoryEventStore;
pub use mysql::MySqlEventStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing environment variables: {}", .missing.join(", "))]
    Configuration { missing: Vec<&'static str> },

    #[error("Failed to connect to the database: {0}")]
    Connectivity(#[source] sqlx::Error),

    #[error("Table creation failed: {0}")]
    Schema(#[source] sqlx::Error),

    #[error("{0}")]
    Persistence(#[from] sqlx::Error),

    #[error("{0}")]
    NotImplemented(String),
}

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Persist one event.
    async fn create(&self, event: NewEvent) -> Result<(), StoreError>;

    /// All events, ordered by date then id.
    async fn list(&self) -> Result<Vec<Event>, StoreError> {
        Err(StoreError::NotImplemented(
            "Listing events is not supported by this store".to_string(),
        ))
    }
}
