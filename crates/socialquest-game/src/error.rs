//! Error types for the socialquest-game crate.
//!
//! Gameplay itself never fails: store problems degrade to defaults inside the
//! repository. Errors only arise while building an engine.

/// Errors that can occur while constructing game components.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The keyword pattern failed to compile.
    #[error("keyword pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// A configuration value is out of range.
    #[error("invalid game configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}
