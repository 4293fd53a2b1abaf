//! Error types for the bot binary.
//!
//! Only startup can fail. Once the subscription is running, per-message
//! problems are logged and the message is skipped.

use socialquest_game::GameError;
use socialquest_store::StoreError;

use crate::config::ConfigError;

/// Errors that can stop the bot.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The state store could not be reached.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The game engine rejected its configuration.
    #[error("game setup error: {0}")]
    Game(#[from] GameError),

    /// Failed to connect to or communicate with the NATS server.
    #[error("NATS error: {0}")]
    Nats(String),

    /// Serialization or deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
