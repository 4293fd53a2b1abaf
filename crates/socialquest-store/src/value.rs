//! Scalar values held by a key-value store.
//!
//! Stores written by older deployments hold integers in more than one
//! width, so decoding accepts every integral representation and normalizes
//! it right away.

use serde::{Deserialize, Serialize};

/// One scalar value in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    /// Boolean flag.
    Bool(bool),
    /// Native-width integer.
    Int(i64),
    /// Fixed 32-bit integer.
    Int32(i32),
    /// Text (dates, or integers written as strings).
    Text(String),
}

impl StoredValue {
    /// Interpret the value as a boolean.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Interpret the value as an integer, whatever width it was stored as.
    ///
    /// Text is accepted when it parses as a base-10 integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Int32(n) => Some(i64::from(*n)),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Bool(_) => None,
        }
    }

    /// Interpret the value as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for StoredValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for StoredValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for StoredValue {
    fn from(value: i32) -> Self {
        Self::Int32(value)
    }
}

impl From<u32> for StoredValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<String> for StoredValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
