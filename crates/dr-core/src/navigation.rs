//! The location state machine.
//!
//! Five states: four peaceful places and `Fighting`. Peaceful travel
//! follows the actions each [`Location`](crate::tables::Location) offers;
//! `Fighting` is only entered through a fight action and only left by
//! victory, defeat, or a successful escape, all of which land in `Town`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GameError, GameResult};
use crate::event::GameEvent;
use crate::state::GameState;
use crate::tables::locations::{self, ActionTag, Location};

/// Where the player is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Place {
    /// The town square, hub of the map.
    #[default]
    Town,
    /// The store.
    Store,
    /// The cave, home of the slime and the fanged beast.
    Cave,
    /// The forest, where the fortune teller lives.
    Forest,
    /// Inside an encounter.
    Fighting,
}

impl Place {
    /// All places.
    pub const ALL: [Place; 5] = [
        Self::Town,
        Self::Store,
        Self::Cave,
        Self::Forest,
        Self::Fighting,
    ];

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Town => "town",
            Self::Store => "store",
            Self::Cave => "cave",
            Self::Forest => "forest",
            Self::Fighting => "fight",
        }
    }

    /// The static location data for this place.
    pub fn location(self) -> &'static Location {
        locations::location(self)
    }

    /// The action that travels here, for peaceful places.
    fn travel_tag(self) -> Option<ActionTag> {
        match self {
            Self::Town => Some(ActionTag::GoTown),
            Self::Store => Some(ActionTag::GoStore),
            Self::Cave => Some(ActionTag::GoCave),
            Self::Forest => Some(ActionTag::GoForest),
            Self::Fighting => None,
        }
    }
}

impl std::fmt::Display for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fail with [`GameError::WrongLocation`] unless the current place offers `tag`.
pub fn require_action(state: &GameState, tag: ActionTag, action: &str) -> GameResult<()> {
    if state.location.location().offers(tag) {
        Ok(())
    } else {
        Err(wrong_location(state, action))
    }
}

/// Build a [`GameError::WrongLocation`] for the current place.
pub fn wrong_location(state: &GameState, action: &str) -> GameError {
    GameError::WrongLocation {
        action: action.to_string(),
        place: state.location,
    }
}

/// Travel to a peaceful place.
///
/// The town is reachable from every peaceful place; other destinations need
/// a matching action at the current location. Entering a peaceful place
/// always clears leftover combat state.
pub fn travel(state: &mut GameState, to: Place) -> GameResult<GameEvent> {
    let action = format!("go to the {to}");
    let tag = to.travel_tag().ok_or_else(|| wrong_location(state, &action))?;
    if state.location == Place::Fighting {
        return Err(wrong_location(state, &action));
    }
    if to != Place::Town {
        require_action(state, tag, &action)?;
    }

    debug!(from = %state.location, %to, "travel");
    enter_peaceful(state, to);
    Ok(GameEvent::Travelled { to })
}

/// Leave any fight and return to the town square.
pub fn return_to_town(state: &mut GameState) {
    enter_peaceful(state, Place::Town);
}

fn enter_peaceful(state: &mut GameState, to: Place) {
    state.location = to;
    state.combat = None;
}
