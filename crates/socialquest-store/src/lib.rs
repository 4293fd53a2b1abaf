//! Storage layer for Social Quest.
//!
//! The game consumes a bare `get`/`set` capability ([`KvStore`]) and maps
//! its typed [`GameState`](socialquest_types::GameState) onto five scalar
//! keys per entity through the [`StateRepository`].
//!
//! ```text
//! GameEngine --load/save--> StateRepository --get/set--> KvStore
//!                                                          |-- MemoryStore
//!                                                          +-- DragonflyStore
//! ```
//!
//! # Modules
//!
//! - [`kv`] -- The `KvStore` capability trait
//! - [`value`] -- Scalar values and width-tolerant decoding
//! - [`memory`] -- In-process store
//! - [`dragonfly`] -- `Dragonfly` (Redis-compatible) store
//! - [`repository`] -- Typed game state load/save
//! - [`error`] -- Shared error types

pub mod dragonfly;
pub mod error;
pub mod kv;
pub mod memory;
pub mod repository;
pub mod value;

// Re-export primary types for convenience.
pub use dragonfly::DragonflyStore;
pub use error::StoreError;
pub use kv::KvStore;
pub use memory::MemoryStore;
pub use repository::{KEY_PREFIX, StateField, StateRepository, storage_key};
pub use value::StoredValue;
