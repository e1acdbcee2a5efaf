//! Turning core events and state into terminal text.

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use dr_core::progression::xp_needed;
use dr_core::{Combatant, EventKind, GameEvent, GameState, Goods};

/// One line of text for an event.
pub fn event_line(event: &GameEvent) -> String {
    let text = describe(event);
    match event.kind() {
        EventKind::Damage => match event {
            GameEvent::Damage {
                target: Combatant::Player,
                ..
            } => text.red().to_string(),
            _ => text,
        },
        EventKind::Heal => text.green().to_string(),
        EventKind::Miss => text.dimmed().to_string(),
        EventKind::Critical => text.bright_red().bold().to_string(),
        EventKind::LevelUp => text.cyan().bold().to_string(),
        EventKind::ItemBreak => text.magenta().to_string(),
        EventKind::Reject => text.yellow().to_string(),
        EventKind::Victory => text.green().bold().to_string(),
        EventKind::Defeat => text.red().bold().to_string(),
        EventKind::Notice => text,
    }
}

fn describe(event: &GameEvent) -> String {
    match event {
        GameEvent::Travelled { to } => format!("You go to the {to}."),
        GameEvent::EncounterStarted {
            monster,
            health,
            difficulty,
        } => format!("A {monster} appears! ({health} health, {difficulty})"),
        GameEvent::Damage {
            target: Combatant::Player,
            amount,
        } => format!("The monster hits you for {amount}."),
        GameEvent::Damage {
            target: Combatant::Monster,
            amount,
        } => format!("You hit the monster for {amount}."),
        GameEvent::Critical { amount } => format!("Critical hit for {amount}!"),
        GameEvent::Miss {
            attacker: Combatant::Player,
        } => "You miss.".to_string(),
        GameEvent::Miss {
            attacker: Combatant::Monster,
        } => "The monster misses.".to_string(),
        GameEvent::ShieldAbsorbed { prevented } => {
            format!("Your shield absorbs {prevented} damage.")
        }
        GameEvent::Heal { resource, amount } => format!("+{amount} {resource}"),
        GameEvent::PowerStrike { mana_spent } => format!("Power strike! (-{mana_spent} mana)"),
        GameEvent::SpellCast { spell, mana_spent } => {
            format!("You cast {spell}. (-{mana_spent} mana)")
        }
        GameEvent::ItemBroken { weapon } => format!("Your {weapon} breaks."),
        GameEvent::LevelUp { level } => format!("Level up! You are now level {level}."),
        GameEvent::MagicUnlocked => "You can now cast spells.".to_string(),
        GameEvent::Victory { monster, xp, gold } => {
            format!("The {monster} is defeated! +{xp} xp, +{gold} gold")
        }
        GameEvent::Defeat { restored_health } => {
            format!("You are defeated and wake up in town with {restored_health} health.")
        }
        GameEvent::Commendation { monster } => {
            format!("You defeated the {monster}! You win the game!")
        }
        GameEvent::Escaped => "You escape.".to_string(),
        GameEvent::EscapeFailed => "You fail to escape!".to_string(),
        GameEvent::Purchased { goods, price } => match goods {
            Goods::Health { amount } => format!("Bought {amount} health for {price} gold."),
            Goods::Mana { amount } => format!("Bought {amount} mana for {price} gold."),
            Goods::Weapon { weapon } => format!("Bought a {weapon} for {price} gold."),
        },
        GameEvent::QuoteOffered { weapon, price } => {
            format!("A {weapon} costs {price} gold. Confirm or cancel?")
        }
        GameEvent::QuoteCancelled { weapon } => format!("You leave the {weapon} on the shelf."),
        GameEvent::Sold { weapon, price } => format!("Sold your {weapon} for {price} gold."),
        GameEvent::DifficultyChanged { difficulty } => format!("Difficulty set to {difficulty}."),
        GameEvent::Fortune { guess, draws, won } => {
            let drawn: Vec<String> = draws.iter().map(u32::to_string).collect();
            let verdict = if *won { "Right!" } else { "Wrong!" };
            format!("You picked {guess}. Drawn: {}. {verdict}", drawn.join(" "))
        }
        GameEvent::GoldFound { amount } => format!("You win {amount} gold!"),
        GameEvent::Restarted => "A new adventure begins.".to_string(),
        GameEvent::Loaded { fallbacks } if fallbacks.is_empty() => "Game loaded.".to_string(),
        GameEvent::Loaded { fallbacks } => {
            format!("Game loaded; reset unreadable fields: {}", fallbacks.join(", "))
        }
        GameEvent::Rejected { reason } => format!("Cannot do that: {reason}"),
    }
}

/// Print each event on its own indented line.
pub fn print_events(events: &[GameEvent]) {
    for event in events {
        println!("  {}", event_line(event));
    }
}

/// Player stats as a two-column table.
pub fn status_table(state: &GameState) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Stat", "Value"]);

    let inventory: Vec<String> = state.inventory.iter().map(ToString::to_string).collect();
    let rows = [
        ("Level", state.level.to_string()),
        ("XP", format!("{}/{}", state.total_xp, xp_needed(state.level))),
        ("Health", format!("{}/{}", state.health, state.max_health)),
        ("Mana", format!("{}/{}", state.mana, state.max_mana)),
        ("Gold", state.gold.to_string()),
        ("Weapon", state.current_weapon().to_string()),
        ("Inventory", inventory.join(", ")),
        ("Location", state.location.to_string()),
        ("Difficulty", state.difficulty.to_string()),
        ("Magic", if state.magic_unlocked { "yes" } else { "no" }.to_string()),
    ];
    for (stat, value) in rows {
        table.add_row(vec![stat.to_string(), value]);
    }

    if let Some(enc) = &state.combat {
        table.add_row(vec![
            "Monster".to_string(),
            format!("{} {}/{}", enc.monster, enc.monster_health, enc.scaled.health),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use dr_core::{GameError, MonsterKind, Place, Resource, WeaponKind};

    #[test]
    fn plain_descriptions() {
        assert_eq!(
            describe(&GameEvent::Travelled { to: Place::Cave }),
            "You go to the cave."
        );
        assert_eq!(
            describe(&GameEvent::Victory {
                monster: MonsterKind::Slime,
                xp: 15,
                gold: 15
            }),
            "The slime is defeated! +15 xp, +15 gold"
        );
        assert_eq!(
            describe(&GameEvent::Heal {
                resource: Resource::Mana,
                amount: 5
            }),
            "+5 mana"
        );
        assert_eq!(
            describe(&GameEvent::Purchased {
                goods: Goods::Weapon {
                    weapon: WeaponKind::ClawHammer
                },
                price: 30
            }),
            "Bought a claw hammer for 30 gold."
        );
        assert_eq!(
            describe(&GameEvent::rejected(GameError::NotInCombat)),
            format!("Cannot do that: {}", GameError::NotInCombat)
        );
    }

    #[test]
    fn fortune_lists_draws() {
        let line = describe(&GameEvent::Fortune {
            guess: 2,
            draws: vec![1, 2, 3],
            won: true,
        });
        assert_eq!(line, "You picked 2. Drawn: 1 2 3. Right!");
    }

    #[test]
    fn status_shows_encounter() {
        let mut state = GameState::default();
        let table = status_table(&state).to_string();
        assert!(table.contains("50/50"));
        assert!(!table.contains("Monster"));

        state.location = Place::Fighting;
        state.combat = Some(dr_core::Encounter::new(
            MonsterKind::Slime,
            dr_core::Difficulty::Normal,
        ));
        let table = status_table(&state).to_string();
        assert!(table.contains("slime 20/20"));
    }
}
