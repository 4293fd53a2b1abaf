//! Tunable game parameters.
//!
//! [`GameConfig`] bundles every constant the engine uses so that callers
//! (the bot binary, tests) can override defaults. It deserializes from the
//! `game` section of `socialquest.yaml`; every field is optional.

use serde::Deserialize;

use crate::error::GameError;

/// Configuration for the game engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Maximum (and starting) hit points (default: 100).
    pub max_hp: u32,

    /// Damage ceiling per keyword match (default: 10).
    ///
    /// A message with `L` matches deals between 0 and `max_damage * L`.
    pub max_damage: u32,

    /// Hit points recovered per whole day of inactivity (default: 10).
    pub heal_per_day: u32,

    /// Substring that marks a message as a denial of fatigue (default: `ない`).
    /// Messages containing it never trigger an attack.
    pub negation_token: String,

    /// Command prefix placed before `社会` (default: empty).
    pub command_prefix: String,

    /// Seed for damage rolls. `None` seeds from the OS.
    pub seed: Option<u64>,

    /// Behavior switches for known quirks of the original game.
    pub rules: RulesConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_hp: 100,
            max_damage: 10,
            heal_per_day: 10,
            negation_token: "ない".to_owned(),
            command_prefix: String::new(),
            seed: None,
            rules: RulesConfig::default(),
        }
    }
}

impl GameConfig {
    /// Check that the values can drive a game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] if `max_hp` is zero or the
    /// negation token is empty (an empty token would suppress every attack).
    pub fn validate(&self) -> Result<(), GameError> {
        if self.max_hp == 0 {
            return Err(GameError::InvalidConfig {
                reason: "max_hp must be at least 1".to_owned(),
            });
        }
        if self.negation_token.is_empty() {
            return Err(GameError::InvalidConfig {
                reason: "negation_token must not be empty".to_owned(),
            });
        }
        Ok(())
    }

    /// `max_hp` widened to the hit point type.
    pub fn max_hp(&self) -> i64 {
        i64::from(self.max_hp)
    }
}

/// Switches for the two behaviors the original game is known for.
///
/// The defaults reproduce the original exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// When true, the hit points restored by resting become the baseline
    /// for the damage that follows. When false (default) the rest is only
    /// announced and damage is taken from the pre-rest value.
    pub apply_rest_heal: bool,

    /// When true (default) every death increments the rebirth counter, even
    /// when auto rebirth is off and the entity stays dead. When false only
    /// actual revivals count.
    pub count_rebirth_without_revival: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            apply_rest_heal: false,
            count_rebirth_without_revival: true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_original_game() {
        let config = GameConfig::default();
        assert_eq!(config.max_hp, 100);
        assert_eq!(config.max_damage, 10);
        assert_eq!(config.heal_per_day, 10);
        assert_eq!(config.negation_token, "ない");
        assert!(!config.rules.apply_rest_heal);
        assert!(config.rules.count_rebirth_without_revival);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = "max_hp: 50\nrules:\n  apply_rest_heal: true\n";
        let config: GameConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.max_hp, 50);
        assert_eq!(config.max_damage, 10);
        assert!(config.rules.apply_rest_heal);
        assert!(config.rules.count_rebirth_without_revival);
    }

    #[test]
    fn zero_max_hp_is_rejected() {
        let config = GameConfig {
            max_hp: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn empty_negation_token_is_rejected() {
        let config = GameConfig {
            negation_token: String::new(),
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
