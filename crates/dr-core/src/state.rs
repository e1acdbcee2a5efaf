//! The single mutable game aggregate.

use serde::{Deserialize, Serialize};

use crate::combat::ScaledMonster;
use crate::navigation::Place;
use crate::tables::{Difficulty, MonsterKind, WeaponKind};

/// Starting (and minimum) maximum health.
pub const STARTING_HEALTH: u32 = 100;
/// Starting maximum mana.
pub const STARTING_MANA: u32 = 50;
/// Starting gold.
pub const STARTING_GOLD: u32 = 50;

/// The state of one encounter. Exists only while the player is fighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    /// Which monster template is being fought.
    pub monster: MonsterKind,
    /// The difficulty-scaled copy of the template.
    pub scaled: ScaledMonster,
    /// Monster's remaining health.
    pub monster_health: u32,
    /// Whether a shield spell will soften the next monster hit.
    pub shield_active: bool,
    /// Set once the victory for this encounter has been paid out.
    pub monster_defeated: bool,
    /// Rounds until power strike can be used again.
    pub power_strike_cooldown: u32,
}

impl Encounter {
    /// Start a fresh encounter with a monster scaled to `difficulty`.
    pub fn new(monster: MonsterKind, difficulty: Difficulty) -> Self {
        let scaled = ScaledMonster::new(monster, difficulty);
        Self {
            monster,
            monster_health: scaled.health,
            scaled,
            shield_active: false,
            monster_defeated: false,
            power_strike_cooldown: 0,
        }
    }
}

/// Everything that describes a game in progress.
///
/// Owned by one [`GameSession`](crate::GameSession); every command mutates
/// it in place. Health and mana never exceed their maxima, and the
/// inventory is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Character level, starting at 1.
    pub level: u32,
    /// Experience collected toward the next level.
    pub total_xp: u32,
    /// Current health.
    pub health: u32,
    /// Maximum health.
    pub max_health: u32,
    /// Current mana.
    pub mana: u32,
    /// Maximum mana.
    pub max_mana: u32,
    /// Gold on hand.
    pub gold: u32,
    /// Index of the equipped weapon in `inventory`.
    pub current_weapon_index: usize,
    /// Owned weapons, oldest first. The last one is the newest.
    pub inventory: Vec<WeaponKind>,
    /// Difficulty applied to new encounters.
    pub difficulty: Difficulty,
    /// Current place.
    pub location: Place,
    /// The active encounter, present exactly while fighting.
    pub combat: Option<Encounter>,
    /// Whether spells can be cast.
    pub magic_unlocked: bool,
    /// Set while a combat round is being settled.
    pub action_locked: bool,
    /// Whether the final monster has been defeated at least once.
    pub dragon_slain: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            level: 1,
            total_xp: 0,
            health: STARTING_HEALTH,
            max_health: STARTING_HEALTH,
            mana: STARTING_MANA,
            max_mana: STARTING_MANA,
            gold: STARTING_GOLD,
            current_weapon_index: 0,
            inventory: vec![WeaponKind::Stick],
            difficulty: Difficulty::Normal,
            location: Place::Town,
            combat: None,
            magic_unlocked: false,
            action_locked: false,
            dragon_slain: false,
        }
    }
}

impl GameState {
    /// A fresh game at the given difficulty.
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// The equipped weapon.
    pub fn current_weapon(&self) -> WeaponKind {
        self.inventory
            .get(self.current_weapon_index)
            .or_else(|| self.inventory.last())
            .copied()
            .unwrap_or(WeaponKind::Stick)
    }

    /// Whether an encounter is in progress.
    pub fn in_combat(&self) -> bool {
        self.combat.is_some()
    }

    /// Whether health is below 20% of maximum.
    pub fn is_desperate(&self) -> bool {
        f64::from(self.health) < 0.2 * f64::from(self.max_health)
    }

    /// Reduce health, stopping at zero. Returns the damage actually taken.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.health);
        self.health -= taken;
        taken
    }

    /// Restore health up to the maximum. Returns the amount restored.
    pub fn restore_health(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_health.saturating_sub(self.health));
        self.health += restored;
        restored
    }

    /// Restore mana up to the maximum. Returns the amount restored.
    pub fn restore_mana(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_mana.saturating_sub(self.mana));
        self.mana += restored;
        restored
    }
}
