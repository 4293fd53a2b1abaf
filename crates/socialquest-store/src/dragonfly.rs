//! `Dragonfly` (Redis-compatible) backed key-value store.
//!
//! Each scalar is stored as a JSON document under its own key, so booleans,
//! integers, and strings survive the round trip with their kind intact.
//!
//! # Key Patterns
//!
//! | Pattern | Type | Description |
//! |---------|------|-------------|
//! | `lxbot_socialquest_{room}_{user}_enable` | JSON bool | Participation flag |
//! | `lxbot_socialquest_{room}_{user}_hp` | JSON int | Remaining hit points |
//! | `lxbot_socialquest_{room}_{user}_rebirth` | JSON int | Rebirth counter |
//! | `lxbot_socialquest_{room}_{user}_auto` | JSON bool | Auto rebirth flag |
//! | `lxbot_socialquest_{room}_{user}_last` | JSON string | RFC 3339 date of last activity |

use fred::prelude::*;

use crate::error::StoreError;
use crate::kv::KvStore;
use crate::value::StoredValue;

/// Connection handle to a `Dragonfly` (Redis-compatible) instance.
#[derive(Clone)]
pub struct DragonflyStore {
    client: Client,
}

impl DragonflyStore {
    /// Connect to `Dragonfly` at the given URL.
    ///
    /// The URL should follow the Redis URL scheme:
    /// `redis://host:port` or `redis://host:port/db`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the URL cannot be parsed.
    /// Returns [`StoreError::Dragonfly`] if the connection fails.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let config = Config::from_url(url)
            .map_err(|e| StoreError::Config(format!("Invalid Dragonfly URL: {e}")))?;

        let client = Builder::from_config(config).build()?;
        client.init().await?;

        tracing::info!("Connected to Dragonfly");
        Ok(Self { client })
    }

    /// Delete a key. Only used by maintenance tooling and tests; the game
    /// itself never deletes state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Dragonfly`] if the delete fails.
    pub async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let _: u32 = self.client.del(key).await?;
        Ok(())
    }
}

impl KvStore for DragonflyStore {
    async fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        let raw: Option<String> = self.client.get(key).await?;
        Ok(raw.map(|s| decode(key, s)))
    }

    async fn set(&self, key: &str, value: StoredValue) -> Result<(), StoreError> {
        let json = serde_json::to_string(&value)?;
        let _: () = self.client.set(key, json.as_str(), None, None, false).await?;
        Ok(())
    }
}

impl std::fmt::Debug for DragonflyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragonflyStore").finish_non_exhaustive()
    }
}

/// Values written by other tools may be bare strings rather than JSON;
/// keep them as text instead of failing the read.
fn decode(key: &str, raw: String) -> StoredValue {
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::debug!(key = key, error = %e, "non-JSON value, reading as text");
        StoredValue::Text(raw)
    })
}
