//! Text commands for driving a session from a prompt or a script.

use crate::combat::Spell;
use crate::error::{GameError, GameResult};
use crate::tables::{Difficulty, MonsterKind};

/// A parsed player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Return to the town square.
    GoTown,
    /// Enter the store.
    GoStore,
    /// Enter the cave.
    GoCave,
    /// Enter the forest.
    GoForest,
    /// Fight a monster by table index.
    Fight {
        /// Index into the monster table.
        monster: usize,
    },
    /// Buy health.
    BuyHealth,
    /// Buy the next weapon in one step.
    BuyWeapon,
    /// Ask for a weapon quote to confirm or cancel later.
    QuoteWeapon,
    /// Accept the pending quote.
    ConfirmPurchase,
    /// Drop the pending quote.
    CancelPurchase,
    /// Buy mana.
    BuyMana,
    /// Sell the newest weapon.
    SellWeapon,
    /// Attack the monster.
    Attack,
    /// Defend this round.
    Defend,
    /// Try to run away.
    Flee,
    /// Use a power strike.
    PowerStrike,
    /// Cast a spell.
    CastSpell {
        /// The spell.
        spell: Spell,
    },
    /// Change difficulty for future fights.
    SetDifficulty {
        /// The new difficulty.
        difficulty: Difficulty,
    },
    /// Pick a number at the fortune teller.
    PickNumber {
        /// The guess.
        guess: u32,
    },
    /// Release the action lock after a round.
    Settle,
    /// Describe the current location.
    Look,
    /// Show the player's stats.
    Status,
    /// Start over.
    Restart,
}

impl Command {
    /// Whether this command only reads state.
    pub fn is_query(self) -> bool {
        matches!(self, Self::Look | Self::Status)
    }
}

const GO_VERBS: &[&str] = &["go", "goto", "travel", "walk"];
const FIGHT_VERBS: &[&str] = &["fight", "battle", "challenge"];
const BUY_VERBS: &[&str] = &["buy", "purchase"];
const ATTACK_VERBS: &[&str] = &["attack", "a", "hit"];
const DEFEND_VERBS: &[&str] = &["defend", "d", "block"];
const FLEE_VERBS: &[&str] = &["flee", "run", "escape"];
const STRIKE_VERBS: &[&str] = &["strike", "power", "ps"];
const CAST_VERBS: &[&str] = &["cast", "c"];
const LOOK_VERBS: &[&str] = &["look", "l", "where"];
const STATUS_VERBS: &[&str] = &["status", "stats", "s"];

/// Parse one line of player input.
///
/// Monsters are named or given by their table index (`fight 0` is the
/// slime). Blank input is a [`Command::Look`].
pub fn parse_command(input: &str) -> GameResult<Command> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Command::Look);
    }

    let lower = input.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    let verb = words[0];
    let rest = words.get(1..).unwrap_or(&[]);
    let unknown = || GameError::UnknownCommand(input.to_string());

    if let Some(place) = parse_place(verb) {
        return Ok(place);
    }
    if GO_VERBS.contains(&verb) {
        return rest
            .iter()
            .find(|w| !matches!(**w, "to" | "the"))
            .and_then(|w| parse_place(w))
            .ok_or_else(unknown);
    }
    if FIGHT_VERBS.contains(&verb) {
        return parse_fight(rest).ok_or_else(unknown);
    }
    if BUY_VERBS.contains(&verb) {
        return match rest {
            ["health" | "hp", ..] => Ok(Command::BuyHealth),
            ["mana" | "mp", ..] => Ok(Command::BuyMana),
            ["weapon", ..] => Ok(Command::BuyWeapon),
            _ => Err(unknown()),
        };
    }
    if ATTACK_VERBS.contains(&verb) {
        return Ok(Command::Attack);
    }
    if DEFEND_VERBS.contains(&verb) {
        return Ok(Command::Defend);
    }
    if FLEE_VERBS.contains(&verb) {
        return Ok(Command::Flee);
    }
    if STRIKE_VERBS.contains(&verb) {
        return Ok(Command::PowerStrike);
    }
    if CAST_VERBS.contains(&verb) {
        let name = rest.first().ok_or_else(unknown)?;
        return Ok(Command::CastSpell {
            spell: name.parse()?,
        });
    }
    if LOOK_VERBS.contains(&verb) {
        return Ok(Command::Look);
    }
    if STATUS_VERBS.contains(&verb) {
        return Ok(Command::Status);
    }

    match verb {
        "quote" => Ok(Command::QuoteWeapon),
        "confirm" | "yes" | "y" => Ok(Command::ConfirmPurchase),
        "cancel" | "no" | "n" => Ok(Command::CancelPurchase),
        "sell" => Ok(Command::SellWeapon),
        "settle" | "continue" => Ok(Command::Settle),
        "restart" => Ok(Command::Restart),
        "difficulty" => {
            let level = rest.first().ok_or_else(unknown)?;
            Ok(Command::SetDifficulty {
                difficulty: level.parse()?,
            })
        }
        "pick" => rest
            .first()
            .and_then(|n| n.parse().ok())
            .map(|guess| Command::PickNumber { guess })
            .ok_or_else(unknown),
        _ => Err(unknown()),
    }
}

fn parse_place(word: &str) -> Option<Command> {
    match word {
        "town" | "square" => Some(Command::GoTown),
        "store" | "shop" => Some(Command::GoStore),
        "cave" => Some(Command::GoCave),
        "forest" => Some(Command::GoForest),
        _ => None,
    }
}

fn parse_fight(rest: &[&str]) -> Option<Command> {
    if rest.is_empty() {
        return None;
    }
    let monster = match rest[0].parse::<usize>() {
        Ok(index) => index,
        Err(_) => MonsterKind::from_name(&rest.join(" "))?.index(),
    };
    Some(Command::Fight { monster })
}
