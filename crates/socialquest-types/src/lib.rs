//! Shared type definitions for the Social Quest chat game.
//!
//! This crate is the single source of truth for the data that flows between
//! the message router, the game engine, and the state store.
//!
//! # Modules
//!
//! - [`envelope`] -- Typed chat message envelope and boundary validation
//! - [`entity`] -- Entity keys, per-entity game state, and lifecycle phases

pub mod entity;
pub mod envelope;

// Re-export all public types at crate root for convenience.
pub use entity::{EntityKey, EntityPhase, GameState};
pub use envelope::{Envelope, EnvelopeError, MessageBody, REPLY_MODE, Room, Sender, User};
