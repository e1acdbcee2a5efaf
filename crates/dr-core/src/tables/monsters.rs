//! The monster table.

use serde::{Deserialize, Serialize};

/// A monster template. Never mutated; encounters work on a scaled copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monster {
    /// Display name.
    pub name: &'static str,
    /// Level, drives the monster's attack.
    pub level: u32,
    /// Health before difficulty scaling.
    pub base_health: u32,
    /// Experience reward before difficulty scaling.
    pub base_xp: u32,
    /// Gold reward before difficulty scaling.
    pub base_gold: u32,
}

/// Stable identifier for a monster template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    /// A weak cave dweller.
    #[serde(rename = "slime")]
    Slime,
    /// A dangerous cave predator.
    #[serde(rename = "fanged beast")]
    FangedBeast,
    /// The final monster.
    #[serde(rename = "dragon")]
    Dragon,
}

const MONSTERS: [Monster; 3] = [
    Monster {
        name: "slime",
        level: 1,
        base_health: 20,
        base_xp: 15,
        base_gold: 15,
    },
    Monster {
        name: "fanged beast",
        level: 8,
        base_health: 60,
        base_xp: 80,
        base_gold: 53,
    },
    Monster {
        name: "dragon",
        level: 20,
        base_health: 300,
        base_xp: 500,
        base_gold: 134,
    },
];

impl MonsterKind {
    /// All monsters, weakest first.
    pub const ALL: [MonsterKind; 3] = [Self::Slime, Self::FangedBeast, Self::Dragon];

    /// Position in the monster table.
    pub fn index(self) -> usize {
        match self {
            Self::Slime => 0,
            Self::FangedBeast => 1,
            Self::Dragon => 2,
        }
    }

    /// Look up a monster by table position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Look up a monster by name. Accepts "beast" for the fanged beast.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "beast" => Some(Self::FangedBeast),
            other => Self::ALL.into_iter().find(|m| m.stats().name == other),
        }
    }

    /// The template for this monster.
    pub fn stats(self) -> &'static Monster {
        &MONSTERS[self.index()]
    }

    /// Whether this is the final monster of the game.
    pub fn is_final(self) -> bool {
        self == Self::Dragon
    }
}

impl std::fmt::Display for MonsterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.stats().name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slime_template() {
        let slime = MonsterKind::Slime.stats();
        assert_eq!(slime.level, 1);
        assert_eq!(slime.base_health, 20);
        assert_eq!(slime.base_xp, 15);
        assert_eq!(slime.base_gold, 15);
    }

    #[test]
    fn index_round_trip() {
        for kind in MonsterKind::ALL {
            assert_eq!(MonsterKind::from_index(kind.index()), Some(kind));
        }
        assert_eq!(MonsterKind::from_index(3), None);
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(MonsterKind::from_name("beast"), Some(MonsterKind::FangedBeast));
        assert_eq!(MonsterKind::from_name("DRAGON"), Some(MonsterKind::Dragon));
        assert_eq!(MonsterKind::from_name("goblin"), None);
    }

    #[test]
    fn only_dragon_is_final() {
        let finals: Vec<_> = MonsterKind::ALL.into_iter().filter(|m| m.is_final()).collect();
        assert_eq!(finals, vec![MonsterKind::Dragon]);
    }
}
