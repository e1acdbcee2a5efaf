//! Simulation core for Dragon Repeller.
//!
//! A small turn-based role-playing game: the player travels between a
//! handful of locations, buys supplies, fights monsters, and levels up.
//! Every command is a synchronous state transition on a single
//! [`GameState`] owned by a [`GameSession`], and produces a list of
//! [`GameEvent`]s for a front end to render. Randomness comes from an
//! injected [`RandomSource`], so a seed fully determines a playthrough.

pub mod combat;
pub mod command;
pub mod config;
pub mod economy;
pub mod error;
pub mod event;
pub mod fortune;
pub mod navigation;
pub mod persistence;
pub mod progression;
pub mod rng;
pub mod session;
pub mod state;
pub mod tables;

pub use combat::{CombatAction, ScaledMonster, Spell};
pub use command::{Command, parse_command};
pub use config::SessionConfig;
pub use error::{ErrorCategory, GameError, GameResult};
pub use event::{Combatant, EventKind, GameEvent, Goods, Resource};
pub use navigation::Place;
pub use persistence::LoadedState;
pub use rng::{RandomSource, SeededRng, SequenceRng};
pub use session::GameSession;
pub use state::{Encounter, GameState};
pub use tables::{Difficulty, Location, MonsterKind, WeaponKind};
