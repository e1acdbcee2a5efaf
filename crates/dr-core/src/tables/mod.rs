//! Static reference data: weapons, monsters, locations, difficulty.
//!
//! Tables are immutable and indexed by stable enum identifiers. Numeric
//! indices are only accepted at the boundary (`from_index`), so reordering
//! a table never silently changes what a saved game refers to.

pub mod locations;
pub mod monsters;
pub mod weapons;

pub use locations::{ActionTag, Location, LocationAction};
pub use monsters::{Monster, MonsterKind};
pub use weapons::{Weapon, WeaponKind};

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// How hard the monsters are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Weaker monsters, smaller rewards.
    Easy,
    /// Baseline.
    #[default]
    Normal,
    /// Stronger monsters, bigger rewards.
    Hard,
}

impl Difficulty {
    /// All difficulties, easiest first.
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Normal, Self::Hard];

    /// Scalar applied to monster health, xp, gold, and attack.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Easy => 0.8,
            Self::Normal => 1.0,
            Self::Hard => 1.5,
        }
    }

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "e" => Ok(Self::Easy),
            "normal" | "n" => Ok(Self::Normal),
            "hard" | "h" => Ok(Self::Hard),
            _ => Err(GameError::UnknownDifficulty(s.to_string())),
        }
    }
}
