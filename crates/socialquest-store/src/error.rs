//! Error types for the storage layer.
//!
//! Adapters surface failures through [`StoreError`]. The
//! [`StateRepository`](crate::StateRepository) never propagates them to the
//! game: reads fall back to defaults and writes are logged and dropped.

/// Errors that can occur in a key-value store adapter.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A `Dragonfly`/Redis operation failed.
    #[error("Dragonfly error: {0}")]
    Dragonfly(#[from] fred::error::Error),

    /// A value could not be serialized for storage.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The adapter is misconfigured (bad URL, etc).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The adapter refused the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
