//! Experience, levels, and the magic unlock.

use tracing::info;

use crate::event::GameEvent;
use crate::state::GameState;

/// Maximum health gained per level.
pub const HEALTH_PER_LEVEL: u32 = 20;
/// Maximum mana gained per level.
pub const MANA_PER_LEVEL: u32 = 10;
/// Level at which spells become available.
pub const MAGIC_UNLOCK_LEVEL: u32 = 3;

/// Experience needed to advance from `level` to the next.
pub fn xp_needed(level: u32) -> u32 {
    100u32.saturating_mul(level.max(1))
}

/// Add experience and apply every level-up it pays for, in order.
///
/// Each level-up spends its threshold, raises both maxima, refills health
/// and mana, and emits [`GameEvent::LevelUp`]. The first time the player
/// reaches [`MAGIC_UNLOCK_LEVEL`], [`GameEvent::MagicUnlocked`] follows.
pub fn gain_xp(state: &mut GameState, amount: u32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.total_xp = state.total_xp.saturating_add(amount);

    while state.total_xp >= xp_needed(state.level) {
        state.total_xp -= xp_needed(state.level);
        state.level = state.level.saturating_add(1);
        state.max_health = state.max_health.saturating_add(HEALTH_PER_LEVEL);
        state.max_mana = state.max_mana.saturating_add(MANA_PER_LEVEL);
        state.health = state.max_health;
        state.mana = state.max_mana;
        info!(level = state.level, "level up");
        events.push(GameEvent::LevelUp { level: state.level });

        if state.level >= MAGIC_UNLOCK_LEVEL && !state.magic_unlocked {
            state.magic_unlocked = true;
            events.push(GameEvent::MagicUnlocked);
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(xp_needed(1), 100);
        assert_eq!(xp_needed(4), 400);
        assert_eq!(xp_needed(0), 100);
    }

    #[test]
    fn below_threshold_no_level() {
        let mut s = GameState::default();
        let events = gain_xp(&mut s, 15);
        assert!(events.is_empty());
        assert_eq!(s.total_xp, 15);
        assert_eq!(s.level, 1);
    }

    #[test]
    fn exact_threshold_levels_once() {
        let mut s = GameState::default();
        let events = gain_xp(&mut s, 100);
        assert_eq!(events, vec![GameEvent::LevelUp { level: 2 }]);
        assert_eq!(s.level, 2);
        assert_eq!(s.total_xp, 0);
    }

    #[test]
    fn level_up_raises_and_refills() {
        let mut s = GameState::default();
        s.health = 12;
        s.mana = 1;
        gain_xp(&mut s, 120);
        assert_eq!(s.max_health, 120);
        assert_eq!(s.max_mana, 60);
        assert_eq!(s.health, 120);
        assert_eq!(s.mana, 60);
        assert_eq!(s.total_xp, 20);
    }

    #[test]
    fn large_gain_cascades() {
        let mut s = GameState::default();
        // 100 (1->2) + 200 (2->3) + 300 (3->4) = 600, 50 left over
        let events = gain_xp(&mut s, 650);
        assert_eq!(s.level, 4);
        assert_eq!(s.total_xp, 50);
        assert_eq!(s.max_health, 160);
        assert_eq!(s.max_mana, 80);
        assert_eq!(
            events,
            vec![
                GameEvent::LevelUp { level: 2 },
                GameEvent::LevelUp { level: 3 },
                GameEvent::MagicUnlocked,
                GameEvent::LevelUp { level: 4 },
            ]
        );
    }

    #[test]
    fn magic_unlock_is_idempotent() {
        let mut s = GameState::default();
        s.level = 3;
        s.magic_unlocked = true;
        let events = gain_xp(&mut s, 300);
        assert_eq!(events, vec![GameEvent::LevelUp { level: 4 }]);
        assert!(s.magic_unlocked);
    }

    #[test]
    fn level_stops_at_the_top() {
        let mut s = GameState {
            level: u32::MAX,
            ..GameState::default()
        };
        let events = gain_xp(&mut s, u32::MAX);
        assert_eq!(events.first(), Some(&GameEvent::LevelUp { level: u32::MAX }));
        assert_eq!(s.level, u32::MAX);
        assert_eq!(s.total_xp, 0);
    }
}
