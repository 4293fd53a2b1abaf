//! The key-value capability consumed by the game.
//!
//! The game only ever needs `get` and `set` on scalar values. No locking,
//! transactions, or multi-key atomicity are assumed: two writers racing on
//! the same key simply overwrite each other.

use std::future::Future;

use crate::error::StoreError;
use crate::value::StoredValue;

/// A scalar key-value store.
///
/// Implementations must be cheap to share across tasks; the engine holds one
/// instance for the lifetime of the process.
pub trait KvStore: Send + Sync {
    /// Read the value at `key`. Absent keys yield `Ok(None)`.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<StoredValue>, StoreError>> + Send;

    /// Write `value` at `key`, replacing any previous value.
    fn set(
        &self,
        key: &str,
        value: StoredValue,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
