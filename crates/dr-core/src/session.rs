//! The game session: one state, one RNG, one command at a time.
//!
//! `GameSession` is the only entry point a front end needs. Each command
//! returns the events it produced. A refused command returns a single
//! [`GameEvent::Rejected`] and leaves the game state as it was.

use tracing::{debug, info};

use crate::combat::{self, CombatAction, Spell};
use crate::command::{Command, parse_command};
use crate::config::SessionConfig;
use crate::economy::{self, PurchaseFlow, WeaponQuote};
use crate::error::{GameError, GameResult};
use crate::event::GameEvent;
use crate::fortune;
use crate::navigation::{self, Place};
use crate::persistence::{self, LoadedState};
use crate::rng::{RandomSource, SeededRng};
use crate::state::GameState;
use crate::tables::Difficulty;

/// An interactive game.
pub struct GameSession<R: RandomSource = SeededRng> {
    state: GameState,
    config: SessionConfig,
    purchase: PurchaseFlow,
    rng: R,
}

impl GameSession<SeededRng> {
    /// Start a fresh game seeded from the configuration.
    pub fn new(config: SessionConfig) -> Self {
        let rng = SeededRng::new(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: RandomSource> GameSession<R> {
    /// Start a fresh game drawing from the given random source.
    pub fn with_rng(config: SessionConfig, rng: R) -> Self {
        let state = GameState::with_difficulty(config.difficulty);
        info!(seed = config.seed, difficulty = %config.difficulty, "session started");
        Self {
            state,
            config,
            purchase: PurchaseFlow::default(),
            rng,
        }
    }

    /// Resume from an existing state. The action lock is released.
    pub fn from_state(mut state: GameState, config: SessionConfig, rng: R) -> Self {
        state.action_locked = false;
        Self {
            state,
            config,
            purchase: PurchaseFlow::default(),
            rng,
        }
    }

    /// Get the game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Get the configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The weapon quote awaiting confirmation, if any.
    pub fn pending_quote(&self) -> Option<WeaponQuote> {
        self.purchase.pending()
    }

    /// Describe the current location and its actions.
    pub fn describe_location(&self) -> String {
        self.state.location.location().describe()
    }

    // -- navigation ------------------------------------------------------

    /// Go to the town square. Leaving the store drops a pending quote.
    pub fn go_town(&mut self) -> Vec<GameEvent> {
        self.go(Place::Town)
    }

    /// Go to the store.
    pub fn go_store(&mut self) -> Vec<GameEvent> {
        self.go(Place::Store)
    }

    /// Go to the cave.
    pub fn go_cave(&mut self) -> Vec<GameEvent> {
        self.go(Place::Cave)
    }

    /// Go to the forest.
    pub fn go_forest(&mut self) -> Vec<GameEvent> {
        self.go(Place::Forest)
    }

    fn go(&mut self, to: Place) -> Vec<GameEvent> {
        self.run(|s| {
            let travelled = navigation::travel(&mut s.state, to)?;
            let mut events = Vec::new();
            if s.purchase.is_pending() {
                events.push(s.purchase.cancel()?);
            }
            events.push(travelled);
            Ok(events)
        })
    }

    /// Fight the monster at `index` in the monster table.
    pub fn fight_monster(&mut self, index: usize) -> Vec<GameEvent> {
        self.run(|s| Ok(vec![combat::start_encounter(&mut s.state, index)?]))
    }

    // -- store -----------------------------------------------------------

    /// Buy health.
    pub fn buy_health(&mut self) -> Vec<GameEvent> {
        self.run(|s| Ok(vec![economy::buy_health(&mut s.state)?]))
    }

    /// Buy mana.
    pub fn buy_mana(&mut self) -> Vec<GameEvent> {
        self.run(|s| Ok(vec![economy::buy_mana(&mut s.state)?]))
    }

    /// Buy the next weapon straight away.
    pub fn buy_weapon(&mut self) -> Vec<GameEvent> {
        self.run(|s| {
            s.ensure_no_quote()?;
            Ok(vec![economy::buy_weapon(&mut s.state)?])
        })
    }

    /// Ask for a quote on the next weapon.
    pub fn quote_weapon_purchase(&mut self) -> Vec<GameEvent> {
        self.run(|s| Ok(vec![s.purchase.begin(&s.state)?]))
    }

    /// Accept the pending quote.
    pub fn confirm_weapon_purchase(&mut self) -> Vec<GameEvent> {
        self.run(|s| Ok(vec![s.purchase.confirm(&mut s.state)?]))
    }

    /// Drop the pending quote.
    pub fn cancel_weapon_purchase(&mut self) -> Vec<GameEvent> {
        self.run(|s| Ok(vec![s.purchase.cancel()?]))
    }

    /// Sell the newest weapon.
    pub fn sell_weapon(&mut self) -> Vec<GameEvent> {
        self.run(|s| {
            s.ensure_no_quote()?;
            Ok(vec![economy::sell_weapon(&mut s.state)?])
        })
    }

    fn ensure_no_quote(&self) -> GameResult<()> {
        if self.purchase.is_pending() {
            Err(GameError::PurchasePending)
        } else {
            Ok(())
        }
    }

    // -- combat ----------------------------------------------------------

    /// Attack the monster.
    pub fn attack(&mut self) -> Vec<GameEvent> {
        self.combat_round(CombatAction::Attack)
    }

    /// Defend this round.
    pub fn defend(&mut self) -> Vec<GameEvent> {
        self.combat_round(CombatAction::Defend)
    }

    /// Try to run away.
    pub fn flee(&mut self) -> Vec<GameEvent> {
        self.combat_round(CombatAction::Flee)
    }

    /// Use a power strike.
    pub fn power_strike(&mut self) -> Vec<GameEvent> {
        self.combat_round(CombatAction::PowerStrike)
    }

    /// Cast a spell.
    pub fn cast_spell(&mut self, spell: Spell) -> Vec<GameEvent> {
        self.combat_round(CombatAction::CastSpell(spell))
    }

    fn combat_round(&mut self, action: CombatAction) -> Vec<GameEvent> {
        self.run(|s| {
            s.state.action_locked = true;
            match combat::resolve_round(&mut s.state, action, &s.config, &mut s.rng) {
                Ok(events) => {
                    if !s.config.manual_settle {
                        s.state.action_locked = false;
                    }
                    Ok(events)
                }
                Err(reason) => {
                    s.state.action_locked = false;
                    Err(reason)
                }
            }
        })
    }

    /// Release the action lock held since the last combat round.
    pub fn settle(&mut self) -> Vec<GameEvent> {
        if self.state.action_locked {
            debug!("round settled");
            self.state.action_locked = false;
        }
        Vec::new()
    }

    // -- everything else -------------------------------------------------

    /// Change the difficulty used for future encounters.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Vec<GameEvent> {
        self.run(|s| {
            if s.state.in_combat() {
                return Err(navigation::wrong_location(&s.state, "change difficulty"));
            }
            s.state.difficulty = difficulty;
            info!(%difficulty, "difficulty changed");
            Ok(vec![GameEvent::DifficultyChanged { difficulty }])
        })
    }

    /// Pick a number at the fortune teller.
    pub fn pick_number(&mut self, guess: u32) -> Vec<GameEvent> {
        self.run(|s| fortune::consult(&mut s.state, guess, &mut s.rng))
    }

    /// Throw the current game away and start over.
    pub fn restart(&mut self) -> Vec<GameEvent> {
        self.run(|s| {
            s.state = GameState::with_difficulty(s.config.difficulty);
            s.purchase = PurchaseFlow::default();
            info!("game restarted");
            Ok(vec![GameEvent::Restarted])
        })
    }

    /// Encode the current state.
    pub fn save(&self) -> GameResult<String> {
        persistence::save(&self.state)
    }

    /// Replace the current state with a decoded snapshot.
    pub fn load(&mut self, blob: &str) -> Vec<GameEvent> {
        self.run(|s| {
            let LoadedState { state, fallbacks } = persistence::load(blob);
            s.state = state;
            s.purchase = PurchaseFlow::default();
            Ok(vec![GameEvent::Loaded { fallbacks }])
        })
    }

    /// Run a parsed command. Queries produce no events.
    pub fn execute(&mut self, command: Command) -> Vec<GameEvent> {
        match command {
            Command::GoTown => self.go_town(),
            Command::GoStore => self.go_store(),
            Command::GoCave => self.go_cave(),
            Command::GoForest => self.go_forest(),
            Command::Fight { monster } => self.fight_monster(monster),
            Command::BuyHealth => self.buy_health(),
            Command::BuyWeapon => self.buy_weapon(),
            Command::QuoteWeapon => self.quote_weapon_purchase(),
            Command::ConfirmPurchase => self.confirm_weapon_purchase(),
            Command::CancelPurchase => self.cancel_weapon_purchase(),
            Command::BuyMana => self.buy_mana(),
            Command::SellWeapon => self.sell_weapon(),
            Command::Attack => self.attack(),
            Command::Defend => self.defend(),
            Command::Flee => self.flee(),
            Command::PowerStrike => self.power_strike(),
            Command::CastSpell { spell } => self.cast_spell(spell),
            Command::SetDifficulty { difficulty } => self.set_difficulty(difficulty),
            Command::PickNumber { guess } => self.pick_number(guess),
            Command::Settle => self.settle(),
            Command::Restart => self.restart(),
            Command::Look | Command::Status => Vec::new(),
        }
    }

    /// Parse and run one line of input.
    pub fn process(&mut self, input: &str) -> Vec<GameEvent> {
        match parse_command(input) {
            Ok(command) => self.execute(command),
            Err(reason) => vec![GameEvent::rejected(reason)],
        }
    }

    fn run(
        &mut self,
        command: impl FnOnce(&mut Self) -> GameResult<Vec<GameEvent>>,
    ) -> Vec<GameEvent> {
        if self.state.action_locked {
            return vec![GameEvent::rejected(GameError::ActionLocked)];
        }
        match command(self) {
            Ok(events) => events,
            Err(reason) => {
                debug!(%reason, "command rejected");
                vec![GameEvent::rejected(reason)]
            }
        }
    }
}
