//! The game state machine.
//!
//! Each entity moves between three phases:
//!
//! ```text
//!              register                       hp <= 0, auto rebirth
//! Unregistered --------> Alive --attack--> Dying ------------------> Alive
//!      ^                   |                 |
//!      +---- unregister ---+                 | hp <= 0, no auto rebirth
//!      +-------------------------------------+
//! ```
//!
//! Commands load the entity's state, apply one transition, save, and return
//! a single reply. Attacks are triggered by any chat text, commands
//! included, and may return several replies, in the order they must be
//! posted.
//!
//! State is read and written without any per-entity lock. Two events for
//! the same entity processed at the same time both start from the same
//! stored hit points, and the later save wins.

use std::sync::Arc;

use socialquest_store::{KvStore, StateRepository};
use socialquest_types::{EntityKey, EntityPhase, GameState, Sender};
use tracing::{debug, info};

use crate::calendar::{Clock, SystemClock, elapsed_days, rest_heal};
use crate::command::Command;
use crate::config::GameConfig;
use crate::damage::{AttackTier, DamageSource, SeededDamage};
use crate::error::GameError;
use crate::matcher::FatigueMatcher;
use crate::messages;

/// Drives registration, status queries, and attacks for every entity.
pub struct GameEngine<S, D = SeededDamage> {
    repo: StateRepository<S>,
    matcher: FatigueMatcher,
    damage: D,
    clock: Arc<dyn Clock>,
    config: GameConfig,
}

impl<S: KvStore> GameEngine<S, SeededDamage> {
    /// Build an engine on the system clock with damage seeded from
    /// `config.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if the configuration is invalid or the keyword
    /// pattern fails to compile.
    pub fn from_config(store: S, config: GameConfig) -> Result<Self, GameError> {
        let damage = SeededDamage::new(config.max_damage, config.seed);
        Self::new(store, damage, Arc::new(SystemClock), config)
    }
}

impl<S: KvStore, D: DamageSource> GameEngine<S, D> {
    /// Build an engine from explicit parts.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if the configuration is invalid or the keyword
    /// pattern fails to compile.
    pub fn new(
        store: S,
        damage: D,
        clock: Arc<dyn Clock>,
        config: GameConfig,
    ) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            repo: StateRepository::new(store, config.max_hp()),
            matcher: FatigueMatcher::new()?,
            damage,
            clock,
            config,
        })
    }

    /// The engine configuration.
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The state repository.
    pub const fn repository(&self) -> &StateRepository<S> {
        &self.repo
    }

    /// Current state of `entity` as stored.
    pub async fn state(&self, entity: &EntityKey) -> GameState {
        self.repo.load(entity, self.clock.today()).await
    }

    /// React to one inbound message.
    ///
    /// A command yields its reply first. Every message, command or not, is
    /// then checked as a potential attack, which adds zero or more replies.
    pub async fn handle(&self, sender: &Sender) -> Vec<String> {
        let mut replies = Vec::new();
        if let Some(command) = Command::parse(&sender.text, &self.config.command_prefix) {
            replies.push(self.execute(sender, command).await);
        }
        replies.extend(self.attack(sender).await);
        replies
    }

    /// Run a parsed command and return its reply.
    pub async fn execute(&self, sender: &Sender, command: Command) -> String {
        let prefix = &self.config.command_prefix;
        match command {
            Command::Register => self.register(sender).await,
            Command::Unregister => self.unregister(sender).await,
            Command::Status => self.status(sender).await,
            Command::SetAutoRebirth(enabled) => self.set_auto_rebirth(sender, enabled).await,
            Command::RebirthStatus => self.rebirth_status(sender).await,
            Command::RebirthUsage => messages::reincarnation_usage(prefix),
            Command::Usage => messages::usage(prefix),
        }
    }

    /// Join the game. Dead entities come back at full health; the rebirth
    /// counter and auto rebirth flag are kept.
    pub async fn register(&self, sender: &Sender) -> String {
        let today = self.clock.today();
        let max_hp = self.config.max_hp();
        let state = self.repo.load(&sender.key, today).await;

        if state.enabled {
            return messages::already_registered(
                &sender.name,
                state.hp,
                max_hp,
                state.rebirth_count,
            );
        }

        let next = GameState {
            enabled: true,
            hp: if state.hp <= 0 { max_hp } else { state.hp },
            last_activity: today.max(state.last_activity),
            ..state
        };
        self.repo.save(&sender.key, &next).await;

        info!(
            entity = %sender.key,
            hp = next.hp,
            rebirth_count = next.rebirth_count,
            "entity registered"
        );
        messages::registered(&sender.name, next.hp, max_hp, next.rebirth_count)
    }

    /// Leave the game. Hit points and history are kept for a later return.
    pub async fn unregister(&self, sender: &Sender) -> String {
        let state = self.repo.load(&sender.key, self.clock.today()).await;
        if !state.enabled {
            return messages::already_unregistered(&sender.name);
        }

        let next = GameState {
            enabled: false,
            ..state
        };
        self.repo.save(&sender.key, &next).await;

        info!(entity = %sender.key, hp = next.hp, "entity unregistered");
        messages::unregistered(&sender.name)
    }

    /// Report participation, hit points, and rebirth count.
    pub async fn status(&self, sender: &Sender) -> String {
        let state = self.repo.load(&sender.key, self.clock.today()).await;
        if state.enabled {
            messages::status_active(
                &sender.name,
                state.hp,
                self.config.max_hp(),
                state.rebirth_count,
            )
        } else {
            messages::status_inactive(&sender.name)
        }
    }

    /// Turn auto rebirth on or off. Setting the current value changes
    /// nothing.
    pub async fn set_auto_rebirth(&self, sender: &Sender, enabled: bool) -> String {
        let state = self.repo.load(&sender.key, self.clock.today()).await;
        if state.auto_rebirth == enabled {
            return messages::auto_rebirth_changed(&sender.name, enabled, false);
        }

        let next = GameState {
            auto_rebirth: enabled,
            ..state
        };
        self.repo.save(&sender.key, &next).await;

        info!(entity = %sender.key, auto_rebirth = enabled, "auto rebirth changed");
        messages::auto_rebirth_changed(&sender.name, enabled, true)
    }

    /// Report the auto rebirth flag.
    pub async fn rebirth_status(&self, sender: &Sender) -> String {
        let state = self.repo.load(&sender.key, self.clock.today()).await;
        messages::auto_rebirth_status(&sender.name, state.auto_rebirth)
    }

    /// Process chat text as an attack on its author.
    ///
    /// Nothing happens unless the author plays, the text does not contain
    /// the negation token, and at least one fatigue keyword matches.
    ///
    /// # Order of operations
    ///
    /// 1. Count keyword matches
    /// 2. Compute whole days since the last activity
    /// 3. Announce rest healing (capped at max hp)
    /// 4. Roll damage against the baseline hit points
    /// 5. Save the damaged state
    /// 6. Announce the attack result
    /// 7. Handle death: announce, revive if enabled, bump the rebirth count,
    ///    save again
    ///
    /// Unless `rules.apply_rest_heal` is set, the baseline in step 4 is the
    /// stored hit points from before the rest, so the healing in step 3 is
    /// announced but not kept.
    pub async fn attack(&self, sender: &Sender) -> Vec<String> {
        let today = self.clock.today();
        let max_hp = self.config.max_hp();
        let rules = self.config.rules;
        let state = self.repo.load(&sender.key, today).await;

        if !state.enabled || sender.text.contains(self.config.negation_token.as_str()) {
            return Vec::new();
        }

        // 1. Count keyword matches
        let match_count = self.matcher.count(&sender.text);
        if match_count == 0 {
            return Vec::new();
        }

        let mut replies = Vec::new();
        let mut baseline = state.hp;

        // 2-3. Rest healing for the days since the last activity
        let days = elapsed_days(state.last_activity, today);
        if days > 0 {
            let healed = rest_heal(state.hp, days, self.config.heal_per_day, max_hp);
            replies.push(messages::rested(days, state.hp, healed, max_hp));
            if rules.apply_rest_heal {
                baseline = healed;
            }
        }

        // 4. Damage
        let damage = self.damage.roll(match_count);
        let mut next = GameState {
            enabled: true,
            hp: baseline.saturating_sub(i64::from(damage)),
            last_activity: today.max(state.last_activity),
            ..state
        };

        // 5. Save
        self.repo.save(&sender.key, &next).await;

        // 6. Attack result
        let tier = AttackTier::from_match_count(match_count);
        replies.push(messages::attack(tier, &sender.name, damage, next.hp));
        debug!(
            entity = %sender.key,
            match_count = match_count,
            days_rested = days,
            damage = damage,
            hp = next.hp,
            "attack resolved"
        );

        // 7. Death
        if next.phase() == EntityPhase::Dying {
            replies.push(messages::defeated(&sender.name));

            let revived = state.auto_rebirth;
            let bumped = state.rebirth_count.saturating_add(1);
            if revived {
                next.hp = max_hp;
                replies.push(messages::revived(&sender.name, next.hp, max_hp, bumped));
            }
            if revived || rules.count_rebirth_without_revival {
                next.rebirth_count = bumped;
            }
            next.enabled = revived;
            self.repo.save(&sender.key, &next).await;

            info!(
                entity = %sender.key,
                revived = revived,
                rebirth_count = next.rebirth_count,
                "entity defeated"
            );
        }

        replies
    }
}
