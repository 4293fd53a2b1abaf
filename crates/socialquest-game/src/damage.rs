//! Damage rolls and attack intensity.
//!
//! Damage for a message with `L` keyword matches is drawn uniformly from
//! `0..=max_damage * L`, so denser complaints hit harder on average but can
//! still be dodged entirely.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Attack flavor derived from the number of keyword matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackTier {
    /// Exactly one match.
    Attack,
    /// Exactly two matches.
    DoubleStrike,
    /// Three or more matches.
    Combo,
}

impl AttackTier {
    /// Classify a positive match count. Zero is treated as a single attack;
    /// callers never roll damage for it.
    pub const fn from_match_count(match_count: u32) -> Self {
        match match_count {
            0 | 1 => Self::Attack,
            2 => Self::DoubleStrike,
            _ => Self::Combo,
        }
    }
}

/// Largest damage a roll may produce for `match_count` matches.
pub const fn damage_bound(max_damage: u32, match_count: u32) -> u32 {
    max_damage.saturating_mul(match_count)
}

/// A source of damage rolls.
///
/// The engine shares one source across all concurrent events, so
/// implementations use interior mutability.
pub trait DamageSource: Send + Sync {
    /// Roll damage for a message with `match_count` keyword matches.
    ///
    /// Must return 0 for `match_count == 0` and never exceed
    /// [`damage_bound`] for the configured maximum.
    fn roll(&self, match_count: u32) -> u32;
}

/// Uniform damage from a seeded, reproducible generator.
#[derive(Debug)]
pub struct SeededDamage {
    max_damage: u32,
    rng: Mutex<StdRng>,
}

impl SeededDamage {
    /// Create a source. With `Some(seed)` the sequence of rolls is fully
    /// reproducible; with `None` the generator is seeded from the OS.
    pub fn new(max_damage: u32, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            max_damage,
            rng: Mutex::new(rng),
        }
    }
}

impl DamageSource for SeededDamage {
    fn roll(&self, match_count: u32) -> u32 {
        if match_count == 0 {
            return 0;
        }
        let bound = damage_bound(self.max_damage, match_count);
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(0..=bound)
    }
}

/// Always deals the same damage, clamped to the bound for the match count.
///
/// Used by tests and replays that need a predetermined outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDamage {
    /// Damage dealt per roll before clamping.
    pub amount: u32,
    /// Per-match maximum used for clamping.
    pub max_damage: u32,
}

impl FixedDamage {
    /// Deal `amount` on every roll, clamped to `max_damage * match_count`.
    pub const fn new(amount: u32, max_damage: u32) -> Self {
        Self { amount, max_damage }
    }
}

impl DamageSource for FixedDamage {
    fn roll(&self, match_count: u32) -> u32 {
        let bound = damage_bound(self.max_damage, match_count);
        self.amount.min(bound)
    }
}
