//! Spells available once magic is unlocked.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// A castable spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spell {
    /// Restore `30 + 5 * level` health.
    Heal,
    /// Deal `40 + 10 * level` damage.
    Fireball,
    /// Deal `60 + 15 * level` damage.
    Lightning,
    /// Soften the next monster hit to 30%.
    Shield,
}

impl Spell {
    /// All spells, in menu order.
    pub const ALL: [Spell; 4] = [Self::Heal, Self::Fireball, Self::Lightning, Self::Shield];

    /// Mana cost.
    pub fn cost(self) -> u32 {
        match self {
            Self::Heal => 10,
            Self::Fireball => 15,
            Self::Lightning => 20,
            Self::Shield => 12,
        }
    }

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Heal => "heal",
            Self::Fireball => "fireball",
            Self::Lightning => "lightning",
            Self::Shield => "shield",
        }
    }

    /// Health restored by [`Spell::Heal`] at a given level, before capping.
    pub fn heal_amount(level: u32) -> u32 {
        level.saturating_mul(5).saturating_add(30)
    }

    /// Damage dealt at a given level, for offensive spells.
    pub fn damage(self, level: u32) -> Option<u32> {
        match self {
            Self::Fireball => Some(level.saturating_mul(10).saturating_add(40)),
            Self::Lightning => Some(level.saturating_mul(15).saturating_add(60)),
            Self::Heal | Self::Shield => None,
        }
    }
}

impl std::fmt::Display for Spell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Spell {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|spell| spell.name() == lower)
            .ok_or_else(|| GameError::UnknownSpell(s.to_string()))
    }
}
