//! Bot configuration.
//!
//! Settings are read from `socialquest.yaml` (or the file named by
//! `SOCIALQUEST_CONFIG`), then selected environment variables override the
//! file. A missing default file is not an error; every field has a default.
//!
//! ```yaml
//! nats_url: nats://localhost:4222
//! inbound_subject: lxbot.message
//! outbound_subject: lxbot.reply
//! dragonfly_url: redis://localhost:6379
//! game:
//!   max_hp: 100
//!   command_prefix: "!"
//! ```

use std::path::Path;

use serde::Deserialize;
use socialquest_game::GameConfig;

/// Config file used when `SOCIALQUEST_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "socialquest.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override could not be parsed.
    #[error("invalid {variable}: {reason}")]
    Env {
        /// Name of the offending variable.
        variable: &'static str,
        /// What was wrong with its value.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Complete bot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// NATS server URL (default: `nats://localhost:4222`).
    pub nats_url: String,
    /// Subject inbound chat envelopes arrive on (default: `lxbot.message`).
    pub inbound_subject: String,
    /// Subject replies are published to (default: `lxbot.reply`).
    pub outbound_subject: String,
    /// `Dragonfly` URL. When absent, state lives in process memory only.
    pub dragonfly_url: Option<String>,
    /// Replies buffered between the game and the NATS publisher
    /// (default: 256).
    pub outbound_capacity: usize,
    /// Game parameters.
    pub game: GameConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            nats_url: "nats://localhost:4222".to_owned(),
            inbound_subject: "lxbot.message".to_owned(),
            outbound_subject: "lxbot.reply".to_owned(),
            dragonfly_url: None,
            outbound_capacity: 256,
            game: GameConfig::default(),
        }
    }
}

impl BotConfig {
    /// Load the configuration the way the binary does: file, then
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an explicitly named file cannot be read,
    /// the YAML is malformed, or an override is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var("SOCIALQUEST_CONFIG").ok();
        let path = explicit.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        let mut config = if explicit.is_none() && !Path::new(path).exists() {
            Self::default()
        } else {
            Self::from_file(Path::new(path))?
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply environment overrides, reading variables through `lookup`.
    ///
    /// - `NATS_URL` -- NATS server URL
    /// - `DRAGONFLY_URL` -- `Dragonfly` URL (empty selects the memory store)
    /// - `LXBOT_COMMAND_PREFIX` -- command prefix
    /// - `SOCIALQUEST_SEED` -- damage seed (unsigned integer)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if `SOCIALQUEST_SEED` is not a number.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("NATS_URL") {
            self.nats_url = url;
        }
        if let Some(url) = lookup("DRAGONFLY_URL") {
            self.dragonfly_url = Some(url).filter(|u| !u.is_empty());
        }
        if let Some(prefix) = lookup("LXBOT_COMMAND_PREFIX") {
            self.game.command_prefix = prefix;
        }
        if let Some(seed) = lookup("SOCIALQUEST_SEED") {
            let seed = seed.trim().parse().map_err(|e| ConfigError::Env {
                variable: "SOCIALQUEST_SEED",
                reason: format!("{e}"),
            })?;
            self.game.seed = Some(seed);
        }
        Ok(())
    }
}
