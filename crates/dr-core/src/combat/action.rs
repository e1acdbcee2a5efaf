//! Per-round resolution of the player's combat actions.

use tracing::{debug, info};

use super::{Spell, check_round_end, damage_monster, monster_strikes, player_hits};
use crate::config::SessionConfig;
use crate::economy;
use crate::error::{GameError, GameResult};
use crate::event::{Combatant, GameEvent, Resource};
use crate::navigation;
use crate::rng::RandomSource;
use crate::state::GameState;

/// Mana cost of a power strike.
pub const POWER_STRIKE_COST: u32 = 5;
/// Rounds a power strike stays on cooldown.
pub const POWER_STRIKE_COOLDOWN: u32 = 3;
/// Mana regained by defending.
pub const DEFEND_MANA: u32 = 5;

/// What the player does in one combat round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatAction {
    /// Trade blows with the monster.
    Attack,
    /// Take a fixed hit and regain some mana.
    Defend,
    /// Try to escape.
    Flee,
    /// A stronger attack on a cooldown.
    PowerStrike,
    /// Cast a spell; the monster does not answer this round.
    CastSpell(Spell),
}

impl std::fmt::Display for CombatAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attack => f.write_str("attack"),
            Self::Defend => f.write_str("defend"),
            Self::Flee => f.write_str("flee"),
            Self::PowerStrike => f.write_str("power strike"),
            Self::CastSpell(spell) => write!(f, "cast {spell}"),
        }
    }
}

/// Resolve one combat round.
///
/// Every precondition is checked before anything changes, so an `Err`
/// means the state is untouched and no random sample was drawn.
pub fn resolve_round<R: RandomSource + ?Sized>(
    state: &mut GameState,
    action: CombatAction,
    config: &SessionConfig,
    rng: &mut R,
) -> GameResult<Vec<GameEvent>> {
    validate(state, action)?;
    debug!(%action, "resolving round");

    let mut events = Vec::new();
    match action {
        CombatAction::Attack => {
            monster_strikes(state, rng, &mut events);
            player_attacks(state, rng, &mut events);
            tick_cooldown(state);
        }
        CombatAction::Defend => {
            defend(state, &mut events);
            tick_cooldown(state);
        }
        CombatAction::Flee => {
            if rng.chance(config.flee_failure_chance) {
                info!("escape failed");
                events.push(GameEvent::EscapeFailed);
                monster_strikes(state, rng, &mut events);
            } else {
                info!("escaped");
                navigation::return_to_town(state);
                events.push(GameEvent::Escaped);
                return Ok(events);
            }
        }
        CombatAction::PowerStrike => {
            power_strike(state, rng, &mut events);
            monster_strikes(state, rng, &mut events);
        }
        CombatAction::CastSpell(spell) => cast(state, spell, &mut events),
    }

    events.extend(check_round_end(state));
    Ok(events)
}

fn validate(state: &GameState, action: CombatAction) -> GameResult<()> {
    let enc = state.combat.as_ref().ok_or(GameError::NotInCombat)?;
    if enc.monster_defeated || enc.monster_health == 0 {
        return Err(GameError::CombatOver);
    }
    match action {
        CombatAction::PowerStrike => {
            if enc.power_strike_cooldown > 0 {
                return Err(GameError::PowerStrikeCooldown(enc.power_strike_cooldown));
            }
            require_mana(state, POWER_STRIKE_COST)
        }
        CombatAction::CastSpell(spell) => {
            if !state.magic_unlocked {
                return Err(GameError::MagicLocked);
            }
            require_mana(state, spell.cost())
        }
        CombatAction::Attack | CombatAction::Defend | CombatAction::Flee => Ok(()),
    }
}

fn require_mana(state: &GameState, needed: u32) -> GameResult<()> {
    if state.mana < needed {
        Err(GameError::InsufficientMana {
            needed,
            available: state.mana,
        })
    } else {
        Ok(())
    }
}

// Draws: hit, then damage and crit and wear only when the hit lands.
fn player_attacks<R: RandomSource + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    if !player_hits(state, rng) {
        events.push(GameEvent::Miss {
            attacker: Combatant::Player,
        });
        return;
    }

    let base = state
        .current_weapon()
        .power()
        .saturating_add(rng.below(state.level.max(1)))
        .saturating_add(1);
    if rng.chance(super::CRIT_CHANCE) {
        let amount = base.saturating_mul(2);
        damage_monster(state, amount);
        events.push(GameEvent::Critical { amount });
    } else {
        damage_monster(state, base);
        events.push(GameEvent::Damage {
            target: Combatant::Monster,
            amount: base,
        });
    }

    events.extend(economy::roll_weapon_break(state, rng));
}

fn defend(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let Some(damage) = state.combat.as_ref().map(|enc| enc.scaled.defend_damage()) else {
        return;
    };
    state.take_damage(damage);
    if damage > 0 {
        events.push(GameEvent::Damage {
            target: Combatant::Player,
            amount: damage,
        });
    }
    let restored = state.restore_mana(DEFEND_MANA);
    if restored > 0 {
        events.push(GameEvent::Heal {
            resource: Resource::Mana,
            amount: restored,
        });
    }
}

fn power_strike<R: RandomSource + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    state.mana -= POWER_STRIKE_COST;
    if let Some(enc) = state.combat.as_mut() {
        enc.power_strike_cooldown = POWER_STRIKE_COOLDOWN;
    }
    events.push(GameEvent::PowerStrike {
        mana_spent: POWER_STRIKE_COST,
    });

    let amount = state
        .current_weapon()
        .power()
        .saturating_mul(2)
        .saturating_add(rng.below(state.level.max(1)));
    damage_monster(state, amount);
    events.push(GameEvent::Damage {
        target: Combatant::Monster,
        amount,
    });
}

fn cast(state: &mut GameState, spell: Spell, events: &mut Vec<GameEvent>) {
    let cost = spell.cost();
    state.mana -= cost;
    events.push(GameEvent::SpellCast {
        spell,
        mana_spent: cost,
    });
    info!(%spell, mana = state.mana, "spell cast");

    match spell {
        Spell::Heal => {
            let amount = state.restore_health(Spell::heal_amount(state.level));
            events.push(GameEvent::Heal {
                resource: Resource::Health,
                amount,
            });
        }
        Spell::Fireball | Spell::Lightning => {
            let amount = spell.damage(state.level).unwrap_or_default();
            damage_monster(state, amount);
            events.push(GameEvent::Damage {
                target: Combatant::Monster,
                amount,
            });
        }
        Spell::Shield => {
            if let Some(enc) = state.combat.as_mut() {
                enc.shield_active = true;
            }
        }
    }
}

fn tick_cooldown(state: &mut GameState) {
    if let Some(enc) = state.combat.as_mut() {
        enc.power_strike_cooldown = enc.power_strike_cooldown.saturating_sub(1);
    }
}
