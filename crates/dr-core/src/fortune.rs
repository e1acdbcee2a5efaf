//! The fortune teller in the forest: guess a number, win or lose a little.

use tracing::info;

use crate::combat::recover_from_defeat;
use crate::error::{GameError, GameResult};
use crate::event::{Combatant, GameEvent};
use crate::navigation;
use crate::rng::RandomSource;
use crate::state::GameState;
use crate::tables::ActionTag;

/// How many numbers are drawn per reading.
pub const DRAWS: usize = 10;
/// Numbers are drawn from `0..=MAX_NUMBER`.
pub const MAX_NUMBER: u32 = 10;
/// Gold won on a match.
pub const PRIZE: u32 = 20;
/// Health lost on a miss.
pub const PENALTY: u32 = 10;

/// Ask the fortune teller whether `guess` comes up.
///
/// Only possible where a pick is offered. Draws [`DRAWS`] samples whatever
/// the outcome. A losing pick that empties health is treated as a defeat.
pub fn consult<R: RandomSource + ?Sized>(
    state: &mut GameState,
    guess: u32,
    rng: &mut R,
) -> GameResult<Vec<GameEvent>> {
    if !state
        .location
        .location()
        .offers_any(|tag| matches!(tag, ActionTag::PickNumber(_)))
    {
        return Err(navigation::wrong_location(state, "consult the fortune teller"));
    }
    if guess > MAX_NUMBER {
        return Err(GameError::InvalidGuess(guess));
    }

    let draws: Vec<u32> = (0..DRAWS).map(|_| rng.below(MAX_NUMBER + 1)).collect();
    let won = draws.contains(&guess);
    info!(guess, ?draws, won, "fortune told");

    let mut events = vec![GameEvent::Fortune { guess, draws, won }];
    if won {
        state.gold = state.gold.saturating_add(PRIZE);
        events.push(GameEvent::GoldFound { amount: PRIZE });
    } else {
        state.take_damage(PENALTY);
        events.push(GameEvent::Damage {
            target: Combatant::Player,
            amount: PENALTY,
        });
        if state.health == 0 {
            events.push(recover_from_defeat(state));
        }
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Place;
    use crate::rng::SequenceRng;

    fn in_forest() -> GameState {
        GameState {
            location: Place::Forest,
            ..GameState::default()
        }
    }

    #[test]
    fn matching_guess_pays() {
        let mut state = in_forest();
        // floor(0.2 * 11) = 2 on the first draw
        let mut rng = SequenceRng::new(vec![0.2, 0.99]);
        let events = consult(&mut state, 2, &mut rng).unwrap();
        assert_eq!(rng.drawn(), 10);
        assert_eq!(state.gold, 70);
        assert_eq!(events[1], GameEvent::GoldFound { amount: 20 });
        let GameEvent::Fortune { draws, won, .. } = &events[0] else {
            panic!("expected a fortune, got {:?}", events[0]);
        };
        assert!(*won);
        assert_eq!(draws, &vec![2, 10, 2, 10, 2, 10, 2, 10, 2, 10]);
    }

    #[test]
    fn missing_guess_hurts() {
        let mut state = in_forest();
        let events = consult(&mut state, 8, &mut SequenceRng::constant(0.0)).unwrap();
        assert_eq!(state.health, 90);
        assert_eq!(state.gold, 50);
        assert_eq!(
            events[1],
            GameEvent::Damage {
                target: Combatant::Player,
                amount: 10
            }
        );
    }

    #[test]
    fn losing_at_low_health_is_a_defeat() {
        let mut state = in_forest();
        state.health = 10;
        let events = consult(&mut state, 8, &mut SequenceRng::constant(0.0)).unwrap();
        assert_eq!(
            events.last(),
            Some(&GameEvent::Defeat {
                restored_health: 50
            })
        );
        assert_eq!(state.location, Place::Town);
    }

    #[test]
    fn only_in_the_forest() {
        let mut state = GameState::default();
        let err = consult(&mut state, 2, &mut SequenceRng::constant(0.0)).unwrap_err();
        assert!(matches!(err, GameError::WrongLocation { .. }));
        assert_eq!(state.health, 100);
    }

    #[test]
    fn out_of_range_guess_is_rejected() {
        let mut state = in_forest();
        let mut rng = SequenceRng::constant(0.0);
        assert_eq!(
            consult(&mut state, 11, &mut rng),
            Err(GameError::InvalidGuess(11))
        );
        assert_eq!(rng.drawn(), 0);
    }
}
