//! Encounters, attack formulas, and the end-of-round check.
//!
//! An encounter works on a [`ScaledMonster`], a per-fight copy of the
//! monster template with the difficulty multiplier applied. The template
//! itself is never touched.

pub mod action;
pub mod spell;

pub use action::{CombatAction, resolve_round};
pub use spell::Spell;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{GameError, GameResult};
use crate::event::{Combatant, GameEvent};
use crate::navigation::{self, Place};
use crate::progression;
use crate::rng::RandomSource;
use crate::state::{Encounter, GameState};
use crate::tables::{ActionTag, Difficulty, MonsterKind};

/// Base chance for a player attack to land.
pub const HIT_CHANCE: f64 = 0.8;
/// Hit chance while below 20% health.
pub const DESPERATE_HIT_CHANCE: f64 = 0.95;
/// Chance that a landed hit is a critical.
pub const CRIT_CHANCE: f64 = 0.15;
/// Fraction of monster damage that gets through a shield.
pub const SHIELD_FACTOR: f64 = 0.3;
/// Fraction of maximum health restored after a defeat.
pub const DEFEAT_RECOVERY: f64 = 0.5;

/// A monster template scaled for one encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaledMonster {
    /// Template level (unscaled).
    pub level: u32,
    /// Scaled starting health, at least 1.
    pub health: u32,
    /// Scaled experience reward, at least 1.
    pub xp: u32,
    /// Scaled gold reward.
    pub gold: u32,
    /// Difficulty the copy was scaled with.
    pub difficulty: Difficulty,
}

fn scale(value: u32, multiplier: f64) -> u32 {
    (f64::from(value) * multiplier).floor() as u32
}

impl ScaledMonster {
    /// Scale a monster template to a difficulty.
    pub fn new(kind: MonsterKind, difficulty: Difficulty) -> Self {
        let template = kind.stats();
        let m = difficulty.multiplier();
        Self {
            level: template.level,
            health: scale(template.base_health, m).max(1),
            xp: scale(template.base_xp, m).max(1),
            gold: scale(template.base_gold, m),
            difficulty,
        }
    }

    /// Damage of an unmitigated attack: `floor(level * 5 * multiplier)`.
    pub fn attack_base(&self) -> u32 {
        scale(self.level.saturating_mul(5), self.difficulty.multiplier())
    }

    /// Flat damage taken while defending: `floor(level * 1.5)`.
    pub fn defend_damage(&self) -> u32 {
        scale(self.level, 1.5)
    }
}

/// Start a fight with the monster at `index` in the monster table.
///
/// Only legal where the current location offers that fight. Any previous
/// encounter is replaced by a fresh one.
pub fn start_encounter(state: &mut GameState, index: usize) -> GameResult<GameEvent> {
    let monster = MonsterKind::from_index(index).ok_or(GameError::UnknownMonster(index))?;
    navigation::require_action(
        state,
        ActionTag::Fight(monster),
        &format!("fight the {monster}"),
    )?;

    let encounter = Encounter::new(monster, state.difficulty);
    let health = encounter.monster_health;
    info!(%monster, health, difficulty = %state.difficulty, "encounter started");
    state.combat = Some(encounter);
    state.location = Place::Fighting;
    Ok(GameEvent::EncounterStarted {
        monster,
        health,
        difficulty: state.difficulty,
    })
}

/// The current chance for a player attack to land.
pub fn hit_chance(state: &GameState) -> f64 {
    if state.is_desperate() {
        DESPERATE_HIT_CHANCE
    } else {
        HIT_CHANCE
    }
}

/// Roll whether a player attack lands (one draw).
pub fn player_hits<R: RandomSource + ?Sized>(state: &GameState, rng: &mut R) -> bool {
    rng.chance(hit_chance(state))
}

/// The monster attacks the player once (one draw).
///
/// An active shield cuts the damage to [`SHIELD_FACTOR`] and is used up,
/// however small the hit.
pub(crate) fn monster_strikes<R: RandomSource + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    let (base, shielded) = match state.combat.as_mut() {
        Some(enc) => {
            let shielded = enc.shield_active;
            enc.shield_active = false;
            (enc.scaled.attack_base(), shielded)
        }
        None => return,
    };

    let reduction = rng.below(state.level.max(1));
    let mut damage = base.saturating_sub(reduction);
    if shielded {
        let softened = (f64::from(damage) * SHIELD_FACTOR).floor() as u32;
        events.push(GameEvent::ShieldAbsorbed {
            prevented: damage - softened,
        });
        damage = softened;
    }

    let taken = state.take_damage(damage);
    debug!(base, reduction, shielded, taken, "monster attack");
    if damage > 0 {
        events.push(GameEvent::Damage {
            target: Combatant::Player,
            amount: damage,
        });
    } else {
        events.push(GameEvent::Miss {
            attacker: Combatant::Monster,
        });
    }
}

/// Subtract damage from the monster, stopping at zero.
pub(crate) fn damage_monster(state: &mut GameState, amount: u32) -> u32 {
    match state.combat.as_mut() {
        Some(enc) => {
            let dealt = amount.min(enc.monster_health);
            enc.monster_health -= dealt;
            dealt
        }
        None => 0,
    }
}

/// Carry a beaten player back to town at half health.
pub fn recover_from_defeat(state: &mut GameState) -> GameEvent {
    state.health = (f64::from(state.max_health) * DEFEAT_RECOVERY).floor() as u32;
    navigation::return_to_town(state);
    info!(health = state.health, "player defeated");
    GameEvent::Defeat {
        restored_health: state.health,
    }
}

/// Resolve the end of a round: defeat first, then victory.
///
/// Victory pays out at most once per encounter; the encounter is marked
/// defeated before rewards are granted.
pub fn check_round_end(state: &mut GameState) -> Vec<GameEvent> {
    let Some(enc) = state.combat.as_mut() else {
        return Vec::new();
    };

    if state.health == 0 {
        return vec![recover_from_defeat(state)];
    }
    if enc.monster_health > 0 || enc.monster_defeated {
        return Vec::new();
    }

    enc.monster_defeated = true;
    let monster = enc.monster;
    let xp = enc.scaled.xp;
    let gold = enc.scaled.gold;

    state.gold = state.gold.saturating_add(gold);
    info!(%monster, xp, gold, "monster defeated");
    let mut events = vec![GameEvent::Victory { monster, xp, gold }];
    events.extend(progression::gain_xp(state, xp));

    if monster.is_final() && !state.dragon_slain {
        state.dragon_slain = true;
        events.push(GameEvent::Commendation { monster });
    }

    navigation::return_to_town(state);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{SeededRng, SequenceRng};

    fn fighting(monster: MonsterKind, difficulty: Difficulty) -> GameState {
        GameState {
            location: Place::Fighting,
            combat: Some(Encounter::new(monster, difficulty)),
            difficulty,
            ..GameState::default()
        }
    }

    #[test]
    fn scaling_values() {
        let easy = ScaledMonster::new(MonsterKind::Slime, Difficulty::Easy);
        assert_eq!((easy.health, easy.xp, easy.gold), (16, 12, 12));
        let normal = ScaledMonster::new(MonsterKind::Slime, Difficulty::Normal);
        assert_eq!((normal.health, normal.xp, normal.gold), (20, 15, 15));
        let hard = ScaledMonster::new(MonsterKind::Slime, Difficulty::Hard);
        assert_eq!((hard.health, hard.xp, hard.gold), (30, 22, 22));
    }

    #[test]
    fn scaling_leaves_template_alone() {
        let _ = ScaledMonster::new(MonsterKind::Dragon, Difficulty::Hard);
        assert_eq!(MonsterKind::Dragon.stats().base_health, 300);
    }

    #[test]
    fn attack_base_by_difficulty() {
        let slime = |d| ScaledMonster::new(MonsterKind::Slime, d).attack_base();
        assert_eq!(slime(Difficulty::Easy), 4);
        assert_eq!(slime(Difficulty::Normal), 5);
        assert_eq!(slime(Difficulty::Hard), 7);
        let dragon = ScaledMonster::new(MonsterKind::Dragon, Difficulty::Hard);
        assert_eq!(dragon.attack_base(), 150);
        assert_eq!(dragon.defend_damage(), 30);
    }

    #[test]
    fn start_encounter_in_cave() {
        let mut state = GameState {
            location: Place::Cave,
            ..GameState::default()
        };
        let event = start_encounter(&mut state, 0).unwrap();
        assert_eq!(
            event,
            GameEvent::EncounterStarted {
                monster: MonsterKind::Slime,
                health: 20,
                difficulty: Difficulty::Normal
            }
        );
        assert_eq!(state.location, Place::Fighting);
        let enc = state.combat.as_ref().unwrap();
        assert_eq!(enc.monster_health, 20);
        assert!(!enc.shield_active);
        assert_eq!(enc.power_strike_cooldown, 0);
    }

    #[test]
    fn start_encounter_rejects_bad_index() {
        let mut state = GameState::default();
        assert_eq!(
            start_encounter(&mut state, 7),
            Err(GameError::UnknownMonster(7))
        );
        assert!(state.combat.is_none());
    }

    #[test]
    fn slime_is_not_in_town() {
        let mut state = GameState::default();
        assert!(matches!(
            start_encounter(&mut state, 0),
            Err(GameError::WrongLocation { .. })
        ));
        assert!(start_encounter(&mut state, 2).is_ok());
    }

    #[test]
    fn monster_attack_reduced_by_level() {
        let mut state = fighting(MonsterKind::Slime, Difficulty::Normal);
        state.level = 4;
        let mut events = Vec::new();
        // reduction = floor(0.5 * 4) = 2, damage = 5 - 2
        monster_strikes(&mut state, &mut SequenceRng::constant(0.5), &mut events);
        assert_eq!(state.health, 97);
        assert_eq!(
            events,
            vec![GameEvent::Damage {
                target: Combatant::Player,
                amount: 3
            }]
        );
    }

    #[test]
    fn monster_attack_can_whiff() {
        let mut state = fighting(MonsterKind::Slime, Difficulty::Easy);
        state.level = 10;
        let mut events = Vec::new();
        // reduction = floor(0.9 * 10) = 9 > base 4
        monster_strikes(&mut state, &mut SequenceRng::constant(0.9), &mut events);
        assert_eq!(state.health, 100);
        assert_eq!(
            events,
            vec![GameEvent::Miss {
                attacker: Combatant::Monster
            }]
        );
    }

    #[test]
    fn shield_softens_one_hit() {
        let mut state = fighting(MonsterKind::FangedBeast, Difficulty::Normal);
        state.combat.as_mut().unwrap().shield_active = true;
        let mut rng = SequenceRng::constant(0.0);
        let mut events = Vec::new();
        // base 40 -> floor(40 * 0.3) = 12
        monster_strikes(&mut state, &mut rng, &mut events);
        assert_eq!(state.health, 88);
        assert_eq!(events[0], GameEvent::ShieldAbsorbed { prevented: 28 });
        assert!(!state.combat.as_ref().unwrap().shield_active);

        events.clear();
        monster_strikes(&mut state, &mut rng, &mut events);
        assert_eq!(state.health, 48);
    }

    #[test]
    fn desperation_raises_hit_chance() {
        let mut state = GameState::default();
        assert!((hit_chance(&state) - 0.8).abs() < f64::EPSILON);
        state.health = 15;
        assert!((hit_chance(&state) - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn desperation_hit_rate_sampled() {
        let mut state = GameState {
            health: 15,
            ..GameState::default()
        };
        let mut rng = SeededRng::new(2024);
        let trials = 20_000;
        let hits = (0..trials).filter(|_| player_hits(&state, &mut rng)).count();
        let rate = hits as f64 / trials as f64;
        assert!((rate - 0.95).abs() < 0.01, "rate was {rate}");

        state.health = 100;
        let hits = (0..trials).filter(|_| player_hits(&state, &mut rng)).count();
        let rate = hits as f64 / trials as f64;
        assert!((rate - 0.8).abs() < 0.015, "rate was {rate}");
    }

    #[test]
    fn defeat_takes_priority_over_victory() {
        let mut state = fighting(MonsterKind::Slime, Difficulty::Normal);
        state.health = 0;
        state.combat.as_mut().unwrap().monster_health = 0;
        let events = check_round_end(&mut state);
        assert_eq!(events, vec![GameEvent::Defeat { restored_health: 50 }]);
        assert_eq!(state.health, 50);
        assert_eq!(state.gold, 50);
        assert_eq!(state.location, Place::Town);
        assert!(state.combat.is_none());
    }

    #[test]
    fn defeat_keeps_xp() {
        let mut state = fighting(MonsterKind::FangedBeast, Difficulty::Normal);
        state.total_xp = 77;
        state.max_health = 140;
        state.health = 0;
        check_round_end(&mut state);
        assert_eq!(state.total_xp, 77);
        assert_eq!(state.health, 70);
    }

    #[test]
    fn victory_pays_once() {
        let mut state = fighting(MonsterKind::Slime, Difficulty::Normal);
        state.combat.as_mut().unwrap().monster_health = 0;
        let events = check_round_end(&mut state);
        assert_eq!(
            events,
            vec![GameEvent::Victory {
                monster: MonsterKind::Slime,
                xp: 15,
                gold: 15
            }]
        );
        assert_eq!(state.gold, 65);
        assert_eq!(state.total_xp, 15);
        assert!(check_round_end(&mut state).is_empty());
        assert_eq!(state.gold, 65);
    }

    #[test]
    fn already_defeated_monster_is_not_paid_again() {
        let mut state = fighting(MonsterKind::Slime, Difficulty::Normal);
        let enc = state.combat.as_mut().unwrap();
        enc.monster_health = 0;
        enc.monster_defeated = true;
        assert!(check_round_end(&mut state).is_empty());
        assert_eq!(state.gold, 50);
    }

    #[test]
    fn dragon_commendation_once() {
        let mut state = fighting(MonsterKind::Dragon, Difficulty::Normal);
        state.combat.as_mut().unwrap().monster_health = 0;
        let events = check_round_end(&mut state);
        assert!(events.contains(&GameEvent::Commendation {
            monster: MonsterKind::Dragon
        }));
        assert!(state.dragon_slain);

        state.location = Place::Fighting;
        state.combat = Some(Encounter::new(MonsterKind::Dragon, Difficulty::Normal));
        state.combat.as_mut().unwrap().monster_health = 0;
        let events = check_round_end(&mut state);
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::Commendation { .. })));
    }

    #[test]
    fn dragon_reward_cascades_levels() {
        let mut state = fighting(MonsterKind::Dragon, Difficulty::Normal);
        state.combat.as_mut().unwrap().monster_health = 0;
        let events = check_round_end(&mut state);
        // 500 xp: 100 + 200 to reach level 3, 200 left over
        assert_eq!(state.level, 3);
        assert_eq!(state.total_xp, 200);
        assert!(state.magic_unlocked);
        assert!(events.contains(&GameEvent::MagicUnlocked));
    }
}
