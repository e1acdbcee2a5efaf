//! Gold, store purchases, and weapon wear.
//!
//! Every operation validates completely before touching the state, so a
//! rejected purchase never debits gold or grants anything.

pub mod purchase;

pub use purchase::{PurchaseFlow, WeaponQuote};

use tracing::{debug, info};

use crate::error::{GameError, GameResult};
use crate::event::{GameEvent, Goods, Resource};
use crate::navigation::require_action;
use crate::rng::RandomSource;
use crate::state::GameState;
use crate::tables::{ActionTag, WeaponKind};

/// Gold per health purchase.
pub const HEALTH_PRICE: u32 = 10;
/// Health restored per purchase.
pub const HEALTH_AMOUNT: u32 = 10;
/// Gold per mana purchase.
pub const MANA_PRICE: u32 = 15;
/// Mana restored per purchase.
pub const MANA_AMOUNT: u32 = 10;
/// Gold per weapon upgrade.
pub const WEAPON_PRICE: u32 = 30;
/// Gold paid when selling a weapon.
pub const WEAPON_SELL_PRICE: u32 = 15;
/// Chance that a landed hit breaks the equipped weapon.
pub const BREAK_CHANCE: f64 = 0.1;

fn require_gold(state: &GameState, price: u32) -> GameResult<()> {
    if state.gold < price {
        return Err(GameError::InsufficientGold {
            needed: price,
            available: state.gold,
        });
    }
    Ok(())
}

/// Buy health: up to [`HEALTH_AMOUNT`], never past the maximum.
pub fn buy_health(state: &mut GameState) -> GameResult<GameEvent> {
    require_action(state, ActionTag::BuyHealth, "buy health")?;
    require_gold(state, HEALTH_PRICE)?;
    let amount = HEALTH_AMOUNT.min(state.max_health.saturating_sub(state.health));
    if amount == 0 {
        return Err(GameError::AlreadyFull(Resource::Health));
    }

    state.gold -= HEALTH_PRICE;
    state.health += amount;
    debug!(amount, gold = state.gold, "bought health");
    Ok(GameEvent::Purchased {
        goods: Goods::Health { amount },
        price: HEALTH_PRICE,
    })
}

/// Buy mana: up to [`MANA_AMOUNT`], never past the maximum.
pub fn buy_mana(state: &mut GameState) -> GameResult<GameEvent> {
    require_action(state, ActionTag::BuyMana, "buy mana")?;
    require_gold(state, MANA_PRICE)?;
    let amount = MANA_AMOUNT.min(state.max_mana.saturating_sub(state.mana));
    if amount == 0 {
        return Err(GameError::AlreadyFull(Resource::Mana));
    }

    state.gold -= MANA_PRICE;
    state.mana += amount;
    debug!(amount, gold = state.gold, "bought mana");
    Ok(GameEvent::Purchased {
        goods: Goods::Mana { amount },
        price: MANA_PRICE,
    })
}

/// Price the next weapon in the upgrade path without buying it.
pub fn weapon_quote(state: &GameState) -> GameResult<WeaponQuote> {
    require_action(state, ActionTag::BuyWeapon, "buy a weapon")?;
    let weapon = state
        .current_weapon()
        .next()
        .ok_or(GameError::NoBetterWeapon)?;
    require_gold(state, WEAPON_PRICE)?;
    Ok(WeaponQuote {
        weapon,
        price: WEAPON_PRICE,
    })
}

/// Pay for a validated quote and equip the weapon.
pub(crate) fn apply_weapon_purchase(state: &mut GameState, quote: WeaponQuote) -> GameEvent {
    state.gold -= quote.price;
    state.inventory.push(quote.weapon);
    state.current_weapon_index = state.inventory.len() - 1;
    info!(weapon = %quote.weapon, "bought weapon");
    GameEvent::Purchased {
        goods: Goods::Weapon {
            weapon: quote.weapon,
        },
        price: quote.price,
    }
}

/// Buy the next weapon in one step.
pub fn buy_weapon(state: &mut GameState) -> GameResult<GameEvent> {
    let quote = weapon_quote(state)?;
    Ok(apply_weapon_purchase(state, quote))
}

/// Sell the equipped (newest) weapon. The last weapon cannot be sold.
pub fn sell_weapon(state: &mut GameState) -> GameResult<GameEvent> {
    require_action(state, ActionTag::SellWeapon, "sell a weapon")?;
    let weapon = remove_newest_weapon(state).ok_or(GameError::LastWeapon)?;
    state.gold = state.gold.saturating_add(WEAPON_SELL_PRICE);
    info!(%weapon, "sold weapon");
    Ok(GameEvent::Sold {
        weapon,
        price: WEAPON_SELL_PRICE,
    })
}

/// Break the equipped weapon unless it is the only one left.
pub fn break_weapon(state: &mut GameState) -> Option<GameEvent> {
    let weapon = remove_newest_weapon(state)?;
    info!(%weapon, "weapon broke");
    Some(GameEvent::ItemBroken { weapon })
}

/// Roll for wear after a landed hit (one draw).
pub fn roll_weapon_break<R: RandomSource + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
) -> Option<GameEvent> {
    if rng.next_f64() <= BREAK_CHANCE {
        break_weapon(state)
    } else {
        None
    }
}

fn remove_newest_weapon(state: &mut GameState) -> Option<WeaponKind> {
    if state.inventory.len() <= 1 {
        return None;
    }
    let weapon = state.inventory.pop()?;
    state.current_weapon_index = state
        .current_weapon_index
        .saturating_sub(1)
        .min(state.inventory.len() - 1);
    Some(weapon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Place;
    use crate::rng::SequenceRng;

    fn in_store() -> GameState {
        GameState {
            location: Place::Store,
            ..GameState::default()
        }
    }

    #[test]
    fn buy_health_charges_and_heals() {
        let mut s = in_store();
        s.health = 50;
        let event = buy_health(&mut s).unwrap();
        assert_eq!(
            event,
            GameEvent::Purchased {
                goods: Goods::Health { amount: 10 },
                price: 10
            }
        );
        assert_eq!(s.health, 60);
        assert_eq!(s.gold, 40);
    }

    #[test]
    fn buy_health_partial_fill() {
        let mut s = in_store();
        s.health = 96;
        buy_health(&mut s).unwrap();
        assert_eq!(s.health, 100);
        assert_eq!(s.gold, 40);
    }

    #[test]
    fn buy_health_when_full_is_free_rejection() {
        let mut s = in_store();
        let before = s.clone();
        assert_eq!(
            buy_health(&mut s),
            Err(GameError::AlreadyFull(Resource::Health))
        );
        assert_eq!(s, before);
    }

    #[test]
    fn buy_health_without_gold() {
        let mut s = in_store();
        s.gold = 9;
        s.health = 10;
        let before = s.clone();
        assert_eq!(
            buy_health(&mut s),
            Err(GameError::InsufficientGold {
                needed: 10,
                available: 9
            })
        );
        assert_eq!(s, before);
    }

    #[test]
    fn buy_mana_caps_at_max() {
        let mut s = in_store();
        s.mana = 45;
        buy_mana(&mut s).unwrap();
        assert_eq!(s.mana, 50);
        assert_eq!(s.gold, 35);
        assert_eq!(buy_mana(&mut s), Err(GameError::AlreadyFull(Resource::Mana)));
        assert_eq!(s.gold, 35);
    }

    #[test]
    fn purchases_need_the_store() {
        let mut s = GameState::default();
        s.health = 10;
        assert!(matches!(
            buy_health(&mut s),
            Err(GameError::WrongLocation { place: Place::Town, .. })
        ));
        assert_eq!(s.gold, 50);
    }

    #[test]
    fn buy_weapon_upgrades() {
        let mut s = in_store();
        buy_weapon(&mut s).unwrap();
        assert_eq!(s.inventory, vec![WeaponKind::Stick, WeaponKind::Dagger]);
        assert_eq!(s.current_weapon_index, 1);
        assert_eq!(s.current_weapon(), WeaponKind::Dagger);
        assert_eq!(s.gold, 20);
    }

    #[test]
    fn buy_weapon_at_top_of_table() {
        let mut s = in_store();
        s.inventory = WeaponKind::ALL.to_vec();
        s.current_weapon_index = 3;
        assert_eq!(buy_weapon(&mut s), Err(GameError::NoBetterWeapon));
        assert_eq!(s.gold, 50);
    }

    #[test]
    fn buy_weapon_without_gold() {
        let mut s = in_store();
        s.gold = 29;
        let before = s.clone();
        assert!(matches!(
            buy_weapon(&mut s),
            Err(GameError::InsufficientGold { needed: 30, .. })
        ));
        assert_eq!(s, before);
    }

    #[test]
    fn sell_weapon_pays_and_reverts() {
        let mut s = in_store();
        s.inventory = vec![WeaponKind::Stick, WeaponKind::Dagger];
        s.current_weapon_index = 1;
        let event = sell_weapon(&mut s).unwrap();
        assert_eq!(
            event,
            GameEvent::Sold {
                weapon: WeaponKind::Dagger,
                price: 15
            }
        );
        assert_eq!(s.inventory, vec![WeaponKind::Stick]);
        assert_eq!(s.current_weapon_index, 0);
        assert_eq!(s.gold, 65);
    }

    #[test]
    fn cannot_sell_only_weapon() {
        let mut s = in_store();
        assert_eq!(sell_weapon(&mut s), Err(GameError::LastWeapon));
        assert_eq!(s.gold, 50);
        assert_eq!(s.inventory.len(), 1);
    }

    #[test]
    fn forced_break_then_guarded() {
        let mut s = GameState::default();
        s.inventory = vec![WeaponKind::Stick, WeaponKind::Dagger];
        s.current_weapon_index = 1;
        assert_eq!(
            break_weapon(&mut s),
            Some(GameEvent::ItemBroken {
                weapon: WeaponKind::Dagger
            })
        );
        assert_eq!(s.inventory, vec![WeaponKind::Stick]);
        assert_eq!(s.current_weapon_index, 0);
        assert_eq!(break_weapon(&mut s), None);
        assert_eq!(s.inventory, vec![WeaponKind::Stick]);
    }

    #[test]
    fn break_roll_boundary() {
        let mut s = GameState::default();
        s.inventory = vec![WeaponKind::Stick, WeaponKind::Dagger, WeaponKind::ClawHammer];
        s.current_weapon_index = 2;
        let mut rng = SequenceRng::new(vec![0.11, 0.1]);
        assert!(roll_weapon_break(&mut s, &mut rng).is_none());
        assert!(roll_weapon_break(&mut s, &mut rng).is_some());
        assert_eq!(s.inventory.len(), 2);
        assert_eq!(rng.drawn(), 2);
    }

    #[test]
    fn break_roll_still_draws_with_one_weapon() {
        let mut s = GameState::default();
        let mut rng = SequenceRng::constant(0.0);
        assert!(roll_weapon_break(&mut s, &mut rng).is_none());
        assert_eq!(rng.drawn(), 1);
        assert_eq!(s.inventory.len(), 1);
    }
}
