//! Structured events emitted by commands.
//!
//! Events are the only output of the core besides the state itself. A front
//! end renders them however it likes; the core never formats for display.

use serde::Serialize;

use crate::combat::Spell;
use crate::error::GameError;
use crate::navigation::Place;
use crate::tables::{Difficulty, MonsterKind, WeaponKind};

/// Who an attack came from or landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Combatant {
    /// The player character.
    Player,
    /// The monster in the current encounter.
    Monster,
}

/// A refillable player resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    /// Hit points.
    Health,
    /// Spell points.
    Mana,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Health => f.write_str("health"),
            Self::Mana => f.write_str("mana"),
        }
    }
}

/// What was bought in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Goods {
    /// Health restored.
    Health {
        /// Amount restored.
        amount: u32,
    },
    /// Mana restored.
    Mana {
        /// Amount restored.
        amount: u32,
    },
    /// A new weapon, now equipped.
    Weapon {
        /// The weapon bought.
        weapon: WeaponKind,
    },
}

/// Coarse event classification for presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Someone lost health.
    Damage,
    /// Health or mana was restored.
    Heal,
    /// An attack missed.
    Miss,
    /// A critical hit.
    Critical,
    /// The player gained a level.
    LevelUp,
    /// A weapon broke.
    ItemBreak,
    /// A command was rejected without changing state.
    Reject,
    /// A monster was defeated.
    Victory,
    /// The player was defeated.
    Defeat,
    /// Anything else worth telling the player.
    Notice,
}

impl EventKind {
    /// Lowercase tag, e.g. `"levelup"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Damage => "damage",
            Self::Heal => "heal",
            Self::Miss => "miss",
            Self::Critical => "critical",
            Self::LevelUp => "levelup",
            Self::ItemBreak => "itembreak",
            Self::Reject => "reject",
            Self::Victory => "victory",
            Self::Defeat => "defeat",
            Self::Notice => "notice",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that happened while processing a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// The player moved to a peaceful place.
    Travelled {
        /// Destination.
        to: Place,
    },
    /// A fight began.
    EncounterStarted {
        /// The monster.
        monster: MonsterKind,
        /// Its scaled starting health.
        health: u32,
        /// Difficulty it was scaled with.
        difficulty: Difficulty,
    },
    /// Damage was dealt.
    Damage {
        /// Who was hurt.
        target: Combatant,
        /// Damage rolled by the attack, before the target bottoms out at zero.
        amount: u32,
    },
    /// The player landed a critical hit on the monster.
    Critical {
        /// Doubled damage applied.
        amount: u32,
    },
    /// An attack missed.
    Miss {
        /// Who missed.
        attacker: Combatant,
    },
    /// The shield softened a monster hit and was used up.
    ShieldAbsorbed {
        /// Damage prevented.
        prevented: u32,
    },
    /// Health or mana was restored.
    Heal {
        /// Which resource.
        resource: Resource,
        /// Amount restored.
        amount: u32,
    },
    /// Power strike was used.
    PowerStrike {
        /// Mana paid.
        mana_spent: u32,
    },
    /// A spell was cast.
    SpellCast {
        /// The spell.
        spell: Spell,
        /// Mana paid.
        mana_spent: u32,
    },
    /// The equipped weapon broke and was removed.
    ItemBroken {
        /// The lost weapon.
        weapon: WeaponKind,
    },
    /// The player reached a new level.
    LevelUp {
        /// The new level.
        level: u32,
    },
    /// Spells became available.
    MagicUnlocked,
    /// The monster was defeated.
    Victory {
        /// The monster.
        monster: MonsterKind,
        /// Experience awarded.
        xp: u32,
        /// Gold awarded.
        gold: u32,
    },
    /// The player was defeated and carried back to town.
    Defeat {
        /// Health after recovery.
        restored_health: u32,
    },
    /// The final monster fell for the first time.
    Commendation {
        /// The monster.
        monster: MonsterKind,
    },
    /// The player got away.
    Escaped,
    /// The escape attempt failed.
    EscapeFailed,
    /// Something was bought.
    Purchased {
        /// What was bought.
        goods: Goods,
        /// Gold paid.
        price: u32,
    },
    /// A weapon purchase is waiting for confirmation.
    QuoteOffered {
        /// The weapon on offer.
        weapon: WeaponKind,
        /// Its price.
        price: u32,
    },
    /// A pending weapon purchase was dropped.
    QuoteCancelled {
        /// The weapon that was on offer.
        weapon: WeaponKind,
    },
    /// A weapon was sold.
    Sold {
        /// The weapon sold.
        weapon: WeaponKind,
        /// Gold received.
        price: u32,
    },
    /// Difficulty for future encounters changed.
    DifficultyChanged {
        /// New difficulty.
        difficulty: Difficulty,
    },
    /// The fortune teller drew numbers.
    Fortune {
        /// The player's number.
        guess: u32,
        /// The ten numbers drawn.
        draws: Vec<u32>,
        /// Whether the guess was among them.
        won: bool,
    },
    /// Gold was found.
    GoldFound {
        /// Amount found.
        amount: u32,
    },
    /// The game was reset.
    Restarted,
    /// A snapshot was loaded.
    Loaded {
        /// Fields that were unreadable and kept their defaults.
        fallbacks: Vec<String>,
    },
    /// A command was refused; nothing changed.
    Rejected {
        /// Why.
        reason: GameError,
    },
}

impl GameEvent {
    /// Coarse classification of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Damage { .. } => EventKind::Damage,
            Self::Heal { .. } => EventKind::Heal,
            Self::Miss { .. } => EventKind::Miss,
            Self::Critical { .. } => EventKind::Critical,
            Self::LevelUp { .. } => EventKind::LevelUp,
            Self::ItemBroken { .. } => EventKind::ItemBreak,
            Self::Rejected { .. } => EventKind::Reject,
            Self::Victory { .. } => EventKind::Victory,
            Self::Defeat { .. } => EventKind::Defeat,
            _ => EventKind::Notice,
        }
    }

    /// Shorthand for a rejection event.
    pub fn rejected(reason: GameError) -> Self {
        Self::Rejected { reason }
    }

    /// Whether this event is a rejection.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
