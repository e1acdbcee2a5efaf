//! Location definitions.
//!
//! Each location lists the actions it offers. The navigation state machine
//! treats these lists as its edges: a command is legal only where a
//! location offers the matching [`ActionTag`].

use super::MonsterKind;
use crate::navigation::Place;

/// What a location action does when chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionTag {
    /// Travel to the town square.
    GoTown,
    /// Travel to the store.
    GoStore,
    /// Travel to the cave.
    GoCave,
    /// Travel to the forest.
    GoForest,
    /// Start a fight with a monster.
    Fight(MonsterKind),
    /// Buy health.
    BuyHealth,
    /// Buy the next weapon.
    BuyWeapon,
    /// Buy mana.
    BuyMana,
    /// Sell the current weapon.
    SellWeapon,
    /// Play the fortune teller's number game.
    PickNumber(u32),
    /// Attack the monster.
    Attack,
    /// Brace for the monster's blow.
    Defend,
    /// Try to run away.
    Flee,
    /// Use the power strike special attack.
    PowerStrike,
    /// Cast a spell.
    CastSpell,
}

/// A labelled action offered by a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationAction {
    /// Button label.
    pub label: &'static str,
    /// What the action does.
    pub tag: ActionTag,
}

/// A static location node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Which state this location represents.
    pub place: Place,
    /// Display name.
    pub name: &'static str,
    /// Actions available here, in display order.
    pub actions: &'static [LocationAction],
    /// Flavor text.
    pub text: &'static str,
}

const fn action(label: &'static str, tag: ActionTag) -> LocationAction {
    LocationAction { label, tag }
}

static TOWN: Location = Location {
    place: Place::Town,
    name: "Town square",
    actions: &[
        action("Go to store", ActionTag::GoStore),
        action("Go to cave", ActionTag::GoCave),
        action("Go to forest", ActionTag::GoForest),
        action("Fight dragon", ActionTag::Fight(MonsterKind::Dragon)),
    ],
    text: "The town square is quiet. The store is open, the cave mouth gapes to the north, and smoke rises from the dragon's mountain.",
};

static STORE: Location = Location {
    place: Place::Store,
    name: "Store",
    actions: &[
        action("Buy 10 health (10 gold)", ActionTag::BuyHealth),
        action("Buy weapon (30 gold)", ActionTag::BuyWeapon),
        action("Buy 10 mana (15 gold)", ActionTag::BuyMana),
        action("Sell weapon (15 gold)", ActionTag::SellWeapon),
        action("Go to town square", ActionTag::GoTown),
    ],
    text: "Shelves of potions and blades line the walls. The shopkeeper nods at you.",
};

static CAVE: Location = Location {
    place: Place::Cave,
    name: "Cave",
    actions: &[
        action("Fight slime", ActionTag::Fight(MonsterKind::Slime)),
        action("Fight fanged beast", ActionTag::Fight(MonsterKind::FangedBeast)),
        action("Go to town square", ActionTag::GoTown),
    ],
    text: "Water drips in the dark. Something moves deeper inside.",
};

static FOREST: Location = Location {
    place: Place::Forest,
    name: "Forest",
    actions: &[
        action("Pick 2", ActionTag::PickNumber(2)),
        action("Pick 8", ActionTag::PickNumber(8)),
        action("Go to town square", ActionTag::GoTown),
    ],
    text: "A fortune teller waits in a clearing. Pick a number; ten numbers from 0 to 10 are drawn. A match pays 20 gold, a miss costs 10 health.",
};

static FIGHTING: Location = Location {
    place: Place::Fighting,
    name: "Fight",
    actions: &[
        action("Attack", ActionTag::Attack),
        action("Defend", ActionTag::Defend),
        action("Flee", ActionTag::Flee),
        action("Power strike (5 mana)", ActionTag::PowerStrike),
        action("Cast spell", ActionTag::CastSpell),
    ],
    text: "You are fighting a monster.",
};

/// The static location for a place.
pub fn location(place: Place) -> &'static Location {
    match place {
        Place::Town => &TOWN,
        Place::Store => &STORE,
        Place::Cave => &CAVE,
        Place::Forest => &FOREST,
        Place::Fighting => &FIGHTING,
    }
}

impl Location {
    /// Whether this location offers an action with the given tag.
    pub fn offers(&self, tag: ActionTag) -> bool {
        self.actions.iter().any(|a| a.tag == tag)
    }

    /// Whether this location offers any action matching the predicate.
    pub fn offers_any(&self, pred: impl Fn(ActionTag) -> bool) -> bool {
        self.actions.iter().any(|a| pred(a.tag))
    }

    /// Multi-line description: name, text, then numbered actions.
    pub fn describe(&self) -> String {
        let mut out = format!("{}\n{}", self.name, self.text);
        for (i, a) in self.actions.iter().enumerate() {
            out.push_str(&format!("\n  [{}] {}", i + 1, a.label));
        }
        out
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}
