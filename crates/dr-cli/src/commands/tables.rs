use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use dr_core::economy::{
    HEALTH_AMOUNT, HEALTH_PRICE, MANA_AMOUNT, MANA_PRICE, WEAPON_PRICE, WEAPON_SELL_PRICE,
};
use dr_core::{Difficulty, MonsterKind, ScaledMonster, Spell, WeaponKind};

pub fn run(difficulty: Option<&str>) -> Result<(), String> {
    let difficulty: Difficulty = match difficulty {
        Some(name) => name.parse().map_err(|e| format!("{e}"))?,
        None => Difficulty::default(),
    };

    println!("  {}", "Weapons".bold().underline());
    println!("{}\n", weapon_table());

    println!(
        "  {} {}",
        "Monsters".bold().underline(),
        format!("({difficulty}, x{})", difficulty.multiplier()).dimmed()
    );
    println!("{}\n", monster_table(difficulty));

    println!("  {}", "Spells".bold().underline());
    println!("{}\n", spell_table());

    println!("  {}", "Store".bold().underline());
    println!("  {HEALTH_AMOUNT} health for {HEALTH_PRICE} gold");
    println!("  {MANA_AMOUNT} mana for {MANA_PRICE} gold");
    println!("  next weapon for {WEAPON_PRICE} gold, sells back for {WEAPON_SELL_PRICE}");
    Ok(())
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn weapon_table() -> Table {
    let mut table = new_table(vec!["Weapon", "Power", "Durability"]);
    for kind in WeaponKind::ALL {
        let weapon = kind.stats();
        table.add_row(vec![
            weapon.name.to_string(),
            weapon.power.to_string(),
            weapon.durability.to_string(),
        ]);
    }
    table
}

fn monster_table(difficulty: Difficulty) -> Table {
    let mut table = new_table(vec!["Monster", "Level", "Health", "XP", "Gold", "Attack"]);
    for kind in MonsterKind::ALL {
        let scaled = ScaledMonster::new(kind, difficulty);
        table.add_row(vec![
            kind.to_string(),
            scaled.level.to_string(),
            scaled.health.to_string(),
            scaled.xp.to_string(),
            scaled.gold.to_string(),
            scaled.attack_base().to_string(),
        ]);
    }
    table
}

fn spell_table() -> Table {
    let mut table = new_table(vec!["Spell", "Mana", "Effect"]);
    for spell in Spell::ALL {
        let effect = match spell {
            Spell::Heal => {
                let (at_one, at_two) = (Spell::heal_amount(1), Spell::heal_amount(2));
                format!("heal {at_one} at level 1, +{} per level", at_two - at_one)
            }
            Spell::Fireball | Spell::Lightning => {
                let (at_one, at_two) = (
                    spell.damage(1).unwrap_or_default(),
                    spell.damage(2).unwrap_or_default(),
                );
                format!("{at_one} damage at level 1, +{} per level", at_two - at_one)
            }
            Spell::Shield => "next monster hit deals 30%".to_string(),
        };
        table.add_row(vec![spell.to_string(), spell.cost().to_string(), effect]);
    }
    table
}
