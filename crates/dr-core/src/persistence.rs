//! Snapshot save and lenient load.
//!
//! A save is the JSON encoding of [`GameState`]. Loading never fails: each
//! field is decoded on its own, unreadable fields keep their default, and
//! the merged state is repaired so the usual invariants hold again.

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::combat::ScaledMonster;
use crate::error::{GameError, GameResult};
use crate::navigation::Place;
use crate::progression::MAGIC_UNLOCK_LEVEL;
use crate::state::GameState;
use crate::tables::WeaponKind;

/// Name recorded in the fallbacks when the blob is not a JSON object at all.
pub const WHOLE_SNAPSHOT: &str = "snapshot";

/// Result of a lenient load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedState {
    /// The merged and repaired state.
    pub state: GameState,
    /// Fields that were present but unreadable, in declaration order.
    pub fallbacks: Vec<String>,
}

impl LoadedState {
    /// Whether every present field decoded cleanly.
    pub fn is_clean(&self) -> bool {
        self.fallbacks.is_empty()
    }
}

/// Encode a snapshot.
pub fn save(state: &GameState) -> GameResult<String> {
    let blob =
        serde_json::to_string_pretty(state).map_err(|e| GameError::CorruptSave(e.to_string()))?;
    info!(bytes = blob.len(), "state saved");
    Ok(blob)
}

macro_rules! merge_fields {
    ($map:expr, $state:expr, $fallbacks:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $map.get(stringify!($field)) {
                match serde_json::from_value(value.clone()) {
                    Ok(decoded) => $state.$field = decoded,
                    Err(err) => {
                        warn!(field = stringify!($field), %err, "unreadable field, keeping default");
                        $fallbacks.push(stringify!($field).to_string());
                    }
                }
            }
        )+
    };
}

/// Decode a snapshot leniently.
pub fn load(blob: &str) -> LoadedState {
    let map = match serde_json::from_str::<Value>(blob) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            warn!("snapshot is not an object, starting fresh");
            return fresh();
        }
        Err(err) => {
            warn!(%err, "snapshot is not valid JSON, starting fresh");
            return fresh();
        }
    };

    let (mut state, fallbacks) = merge(&map);
    repair(&mut state);
    info!(fallbacks = fallbacks.len(), "state loaded");
    LoadedState { state, fallbacks }
}

fn fresh() -> LoadedState {
    LoadedState {
        state: GameState::default(),
        fallbacks: vec![WHOLE_SNAPSHOT.to_string()],
    }
}

fn merge(map: &Map<String, Value>) -> (GameState, Vec<String>) {
    let mut state = GameState::default();
    let mut fallbacks = Vec::new();
    merge_fields!(map, state, fallbacks;
        level,
        total_xp,
        health,
        max_health,
        mana,
        max_mana,
        gold,
        current_weapon_index,
        inventory,
        difficulty,
        location,
        combat,
        magic_unlocked,
        action_locked,
        dragon_slain,
    );
    (state, fallbacks)
}

/// Restore the invariants a hand-edited or partial snapshot may break.
pub fn repair(state: &mut GameState) {
    state.level = state.level.max(1);
    state.max_health = state.max_health.max(1);
    state.health = state.health.min(state.max_health);
    state.mana = state.mana.min(state.max_mana);

    if state.inventory.is_empty() {
        state.inventory.push(WeaponKind::Stick);
    }
    state.current_weapon_index = state.current_weapon_index.min(state.inventory.len() - 1);

    if state.level >= MAGIC_UNLOCK_LEVEL {
        state.magic_unlocked = true;
    }

    // Scaling always follows from the monster and difficulty.
    if let Some(enc) = state.combat.as_mut() {
        enc.scaled = ScaledMonster::new(enc.monster, enc.scaled.difficulty);
        enc.monster_health = enc.monster_health.min(enc.scaled.health);
    }
    let settled = state
        .combat
        .as_ref()
        .is_none_or(|enc| enc.monster_defeated || enc.monster_health == 0);
    if state.location != Place::Fighting || settled {
        if state.location == Place::Fighting {
            state.location = Place::Town;
        }
        state.combat = None;
    }

    state.action_locked = false;
}
