//! Game rules for Social Quest.
//!
//! Chat members join with a command and are then attacked by their own
//! complaints: every fatigue keyword in a message deals random damage.
//! Resting (not posting) for whole days heals, and running out of hit
//! points either ends participation or, with auto rebirth, starts over at
//! full health.
//!
//! ```text
//! Envelope --> MessageHandler --> GameEngine --> StateRepository
//!                    |                 |
//!                    |                 +-- FatigueMatcher, DamageSource, Clock
//!                    v
//!              ReplyDispatcher --> mpsc::Sender<Envelope>
//! ```
//!
//! # Modules
//!
//! - [`config`] -- Tunable parameters and rule switches
//! - [`matcher`] -- Fatigue keyword counting
//! - [`damage`] -- Attack tiers and damage rolls
//! - [`calendar`] -- Clock, elapsed days, rest healing
//! - [`command`] -- Command parsing
//! - [`messages`] -- Reply texts
//! - [`engine`] -- The per-entity state machine
//! - [`dispatch`] -- Ordered reply emission
//! - [`handler`] -- Envelope validation and the full pipeline
//! - [`error`] -- Construction errors

pub mod calendar;
pub mod command;
pub mod config;
pub mod damage;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod handler;
pub mod matcher;
pub mod messages;

pub use calendar::{Clock, FixedClock, SystemClock};
pub use command::Command;
pub use config::{GameConfig, RulesConfig};
pub use damage::{AttackTier, DamageSource, FixedDamage, SeededDamage};
pub use dispatch::ReplyDispatcher;
pub use engine::GameEngine;
pub use error::GameError;
pub use handler::MessageHandler;
pub use matcher::FatigueMatcher;
