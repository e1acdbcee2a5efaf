//! The weapon table. Table order is the upgrade path sold in the store.

use serde::{Deserialize, Serialize};

/// A weapon template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weapon {
    /// Display name.
    pub name: &'static str,
    /// Base damage added to every hit.
    pub power: u32,
    /// Nominal durability rating.
    pub durability: u32,
}

/// Stable identifier for a weapon template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// The starting weapon.
    #[serde(rename = "stick")]
    Stick,
    /// First upgrade.
    #[serde(rename = "dagger")]
    Dagger,
    /// Second upgrade.
    #[serde(rename = "claw hammer")]
    ClawHammer,
    /// The strongest weapon.
    #[serde(rename = "sword")]
    Sword,
}

const WEAPONS: [Weapon; 4] = [
    Weapon {
        name: "stick",
        power: 5,
        durability: 10,
    },
    Weapon {
        name: "dagger",
        power: 30,
        durability: 25,
    },
    Weapon {
        name: "claw hammer",
        power: 50,
        durability: 40,
    },
    Weapon {
        name: "sword",
        power: 100,
        durability: 60,
    },
];

impl WeaponKind {
    /// All weapons in upgrade order.
    pub const ALL: [WeaponKind; 4] = [Self::Stick, Self::Dagger, Self::ClawHammer, Self::Sword];

    /// Position in the weapon table.
    pub fn index(self) -> usize {
        match self {
            Self::Stick => 0,
            Self::Dagger => 1,
            Self::ClawHammer => 2,
            Self::Sword => 3,
        }
    }

    /// Look up a weapon by table position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Look up a weapon by (case-insensitive) name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|w| w.stats().name == name)
    }

    /// The template for this weapon.
    pub fn stats(self) -> &'static Weapon {
        &WEAPONS[self.index()]
    }

    /// Base damage.
    pub fn power(self) -> u32 {
        self.stats().power
    }

    /// The next weapon in the upgrade path, if any.
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }
}

impl std::fmt::Display for WeaponKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.stats().name)
    }
}
