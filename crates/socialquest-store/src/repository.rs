//! Typed access to per-entity game state.
//!
//! A [`GameState`] is spread over five independent scalar keys. Loading
//! never fails: each field that is absent, unreadable, or of the wrong kind
//! falls back to its default on its own. Saving writes the fields one by
//! one; a failed write is logged and the remaining fields are still written.
//! There is no atomicity across fields and no locking across read-modify-
//! write cycles, so two concurrent updates to one entity can lose one of
//! them.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat};
use socialquest_types::{EntityKey, GameState};
use tracing::{debug, warn};

use crate::kv::KvStore;
use crate::value::StoredValue;

/// Namespace shared by every key the game writes.
pub const KEY_PREFIX: &str = "lxbot_socialquest_";

/// One persisted field of a [`GameState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateField {
    /// [`GameState::enabled`]
    Enabled,
    /// [`GameState::hp`]
    Hp,
    /// [`GameState::rebirth_count`]
    RebirthCount,
    /// [`GameState::auto_rebirth`]
    AutoRebirth,
    /// [`GameState::last_activity`]
    LastActivity,
}

impl StateField {
    /// Key suffix for this field.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Enabled => "_enable",
            Self::Hp => "_hp",
            Self::RebirthCount => "_rebirth",
            Self::AutoRebirth => "_auto",
            Self::LastActivity => "_last",
        }
    }
}

/// Full store key for one field of one entity.
///
/// The layout `{prefix}{room}_{user}{suffix}` is shared with existing
/// deployments and is not injective: room `a_b` with user `c` and room `a`
/// with user `b_c` map to the same keys.
pub fn storage_key(entity: &EntityKey, field: StateField) -> String {
    format!(
        "{KEY_PREFIX}{}_{}{}",
        entity.room,
        entity.user,
        field.suffix()
    )
}

/// Loads and saves [`GameState`] records through a [`KvStore`].
#[derive(Debug, Clone)]
pub struct StateRepository<S> {
    store: S,
    max_hp: i64,
}

impl<S: KvStore> StateRepository<S> {
    /// Wrap a store. `max_hp` is the hit point default for new entities.
    pub const fn new(store: S, max_hp: i64) -> Self {
        Self { store, max_hp }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Load the state of `entity`, defaulting each missing or malformed
    /// field independently. `today` is the default activity date.
    pub async fn load(&self, entity: &EntityKey, today: NaiveDate) -> GameState {
        let defaults = GameState::fresh(self.max_hp, today);

        let enabled = self
            .read(entity, StateField::Enabled)
            .await
            .and_then(|v| decoded(entity, StateField::Enabled, v.as_bool()))
            .unwrap_or(defaults.enabled);

        let hp = self
            .read(entity, StateField::Hp)
            .await
            .and_then(|v| decoded(entity, StateField::Hp, v.as_i64()))
            .unwrap_or(defaults.hp);

        let rebirth_count = self
            .read(entity, StateField::RebirthCount)
            .await
            .and_then(|v| {
                let count = v.as_i64().and_then(|n| u32::try_from(n).ok());
                decoded(entity, StateField::RebirthCount, count)
            })
            .unwrap_or(defaults.rebirth_count);

        let auto_rebirth = self
            .read(entity, StateField::AutoRebirth)
            .await
            .and_then(|v| decoded(entity, StateField::AutoRebirth, v.as_bool()))
            .unwrap_or(defaults.auto_rebirth);

        let last_activity = self
            .read(entity, StateField::LastActivity)
            .await
            .and_then(|v| {
                let date = v.as_text().and_then(parse_date);
                decoded(entity, StateField::LastActivity, date)
            })
            .unwrap_or(defaults.last_activity);

        GameState {
            enabled,
            hp,
            rebirth_count,
            auto_rebirth,
            last_activity,
        }
    }

    /// Persist every field of `state`. Failures are logged and dropped.
    pub async fn save(&self, entity: &EntityKey, state: &GameState) {
        let fields = [
            (StateField::Enabled, StoredValue::from(state.enabled)),
            (StateField::Hp, StoredValue::from(state.hp)),
            (StateField::RebirthCount, StoredValue::from(state.rebirth_count)),
            (StateField::AutoRebirth, StoredValue::from(state.auto_rebirth)),
            (
                StateField::LastActivity,
                StoredValue::from(format_date(state.last_activity)),
            ),
        ];

        for (field, value) in fields {
            let key = storage_key(entity, field);
            if let Err(e) = self.store.set(&key, value).await {
                warn!(
                    entity = %entity,
                    key = key,
                    error = %e,
                    "failed to write state field, dropping"
                );
            }
        }
    }

    async fn read(&self, entity: &EntityKey, field: StateField) -> Option<StoredValue> {
        let key = storage_key(entity, field);
        match self.store.get(&key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    entity = %entity,
                    key = key,
                    error = %e,
                    "failed to read state field, using default"
                );
                None
            }
        }
    }
}

fn decoded<T>(entity: &EntityKey, field: StateField, value: Option<T>) -> Option<T> {
    if value.is_none() {
        debug!(
            entity = %entity,
            field = ?field,
            "malformed state field, using default"
        );
    }
    value
}

/// Dates are written as RFC 3339 midnight UTC (`2026-10-18T00:00:00Z`).
pub fn format_date(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a stored date. RFC 3339 timestamps keep the calendar date of their
/// own offset; bare `YYYY-MM-DD` is accepted too.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}
