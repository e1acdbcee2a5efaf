//! Error types for the simulation core.
//!
//! No error is fatal to a session. Commands that fail validation leave the
//! [`GameState`](crate::GameState) untouched and surface the error as a
//! [`GameEvent::Rejected`](crate::GameEvent::Rejected).

use serde::Serialize;

use crate::event::Resource;
use crate::navigation::Place;
use crate::tables::WeaponKind;

/// Result type for core operations.
pub type GameResult<T> = Result<T, GameError>;

/// The three families every [`GameError`] falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Not enough gold or mana, or nothing left to buy.
    InsufficientResource,
    /// The command is not legal in the current state.
    InvalidTransition,
    /// A save snapshot could not be read or written.
    CorruptSaveData,
}

/// Errors that can occur while processing a command.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "error", content = "detail", rename_all = "snake_case")]
pub enum GameError {
    /// The player cannot afford the purchase.
    #[error("not enough gold: need {needed}, have {available}")]
    InsufficientGold {
        /// Price of the purchase.
        needed: u32,
        /// Gold the player holds.
        available: u32,
    },

    /// The player cannot pay the mana cost.
    #[error("not enough mana: need {needed}, have {available}")]
    InsufficientMana {
        /// Mana cost of the action.
        needed: u32,
        /// Mana the player holds.
        available: u32,
    },

    /// The resource is already at its maximum.
    #[error("your {0} is already full")]
    AlreadyFull(Resource),

    /// The current weapon is the last one in the weapon table.
    #[error("you already have the most powerful weapon")]
    NoBetterWeapon,

    /// Removing a weapon would leave the inventory empty.
    #[error("you cannot part with your only weapon")]
    LastWeapon,

    /// A weapon quote is waiting for confirm or cancel.
    #[error("a weapon purchase is awaiting confirmation")]
    PurchasePending,

    /// Confirm or cancel was issued without a pending quote.
    #[error("there is no weapon purchase to confirm")]
    NoPendingPurchase,

    /// The pending quote no longer matches what the store would sell.
    #[error("the {0} is no longer on offer")]
    QuoteExpired(WeaponKind),

    /// The current location does not offer this action.
    #[error("cannot {action} from the {place}")]
    WrongLocation {
        /// What the player tried to do.
        action: String,
        /// Where the player is.
        place: Place,
    },

    /// A monster index outside the monster table.
    #[error("no monster at index {0}")]
    UnknownMonster(usize),

    /// A combat action was issued outside a fight.
    #[error("you are not in a fight")]
    NotInCombat,

    /// The current encounter has already been resolved.
    #[error("the fight is already over")]
    CombatOver,

    /// The previous round has not settled yet.
    #[error("still settling the previous round")]
    ActionLocked,

    /// Spells were used before magic was unlocked.
    #[error("you have not learned any magic yet")]
    MagicLocked,

    /// Power strike is still cooling down.
    #[error("power strike is recovering ({0} rounds left)")]
    PowerStrikeCooldown(u32),

    /// A spell name that does not exist.
    #[error("unknown spell: {0}")]
    UnknownSpell(String),

    /// A difficulty name that does not exist.
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    /// A fortune teller guess outside 0-10.
    #[error("pick a number between 0 and 10, not {0}")]
    InvalidGuess(u32),

    /// Input that does not parse as a command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A snapshot could not be encoded or decoded.
    #[error("corrupt save data: {0}")]
    CorruptSave(String),
}

impl GameError {
    /// Which family this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InsufficientGold { .. }
            | Self::InsufficientMana { .. }
            | Self::AlreadyFull(_)
            | Self::NoBetterWeapon => ErrorCategory::InsufficientResource,
            Self::CorruptSave(_) => ErrorCategory::CorruptSaveData,
            _ => ErrorCategory::InvalidTransition,
        }
    }
}
