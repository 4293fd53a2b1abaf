//! Entity identity and per-entity game state.
//!
//! An entity is one `(room, user)` pair. Every entity owns exactly one
//! [`GameState`], created implicitly the first time it is read and never
//! deleted. Leaving the game only clears [`GameState::enabled`]; hit points
//! and the rebirth counter survive.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Composite key identifying one entity: a user inside a room.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityKey {
    /// Room (channel) identifier from the router.
    pub room: String,
    /// User identifier from the router.
    pub user: String,
}

impl EntityKey {
    /// Build a key from room and user identifiers.
    pub fn new(room: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            room: room.into(),
            user: user.into(),
        }
    }
}

impl core::fmt::Display for EntityKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.room, self.user)
    }
}

/// Lifecycle phase derived from a [`GameState`].
///
/// The phase is never stored; it is computed from `enabled` and `hp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityPhase {
    /// Not participating (never registered, left, or died without revival).
    Unregistered,
    /// Participating with positive hit points.
    Alive,
    /// Participating with hit points at or below zero. Only observable in
    /// the middle of an attack, before death handling runs.
    Dying,
}

/// Persistent game state of a single entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Whether the entity is actively participating.
    pub enabled: bool,
    /// Remaining hit points. May be zero or negative after a death without
    /// revival.
    pub hp: i64,
    /// Number of completed death cycles. Never decreases.
    pub rebirth_count: u32,
    /// Whether death immediately revives the entity at full health.
    pub auto_rebirth: bool,
    /// Calendar date of the last processed attack or registration.
    pub last_activity: NaiveDate,
}

impl GameState {
    /// The state of an entity that has never been persisted.
    pub const fn fresh(max_hp: i64, today: NaiveDate) -> Self {
        Self {
            enabled: false,
            hp: max_hp,
            rebirth_count: 0,
            auto_rebirth: false,
            last_activity: today,
        }
    }

    /// Derive the lifecycle phase from the stored fields.
    pub const fn phase(&self) -> EntityPhase {
        if !self.enabled {
            EntityPhase::Unregistered
        } else if self.hp > 0 {
            EntityPhase::Alive
        } else {
            EntityPhase::Dying
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    }

    #[test]
    fn fresh_state_is_unregistered_at_full_health() {
        let state = GameState::fresh(100, day(2026, 1, 2));
        assert!(!state.enabled);
        assert_eq!(state.hp, 100);
        assert_eq!(state.rebirth_count, 0);
        assert!(!state.auto_rebirth);
        assert_eq!(state.last_activity, day(2026, 1, 2));
        assert_eq!(state.phase(), EntityPhase::Unregistered);
    }

    #[test]
    fn phase_follows_enabled_and_hp() {
        let mut state = GameState::fresh(100, day(2026, 1, 2));
        state.enabled = true;
        assert_eq!(state.phase(), EntityPhase::Alive);
        state.hp = 0;
        assert_eq!(state.phase(), EntityPhase::Dying);
        state.hp = -7;
        assert_eq!(state.phase(), EntityPhase::Dying);
        state.enabled = false;
        assert_eq!(state.phase(), EntityPhase::Unregistered);
    }

    #[test]
    fn entity_key_display() {
        let key = EntityKey::new("lobby", "u42");
        assert_eq!(key.to_string(), "lobby/u42");
    }
}
