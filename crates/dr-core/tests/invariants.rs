//! Properties that hold across arbitrary command sequences.

use dr_core::{
    Command, Difficulty, GameEvent, GameSession, MonsterKind, Place, ScaledMonster,
    SessionConfig, Spell,
};
use proptest::prelude::*;

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::GoTown),
        Just(Command::GoStore),
        Just(Command::GoCave),
        Just(Command::GoForest),
        (0usize..4).prop_map(|monster| Command::Fight { monster }),
        Just(Command::BuyHealth),
        Just(Command::BuyWeapon),
        Just(Command::QuoteWeapon),
        Just(Command::ConfirmPurchase),
        Just(Command::CancelPurchase),
        Just(Command::BuyMana),
        Just(Command::SellWeapon),
        Just(Command::Attack),
        Just(Command::Attack),
        Just(Command::Defend),
        Just(Command::Flee),
        Just(Command::PowerStrike),
        proptest::sample::select(Spell::ALL.to_vec())
            .prop_map(|spell| Command::CastSpell { spell }),
        proptest::sample::select(Difficulty::ALL.to_vec())
            .prop_map(|difficulty| Command::SetDifficulty { difficulty }),
        (0u32..12).prop_map(|guess| Command::PickNumber { guess }),
        Just(Command::Restart),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_survive_any_script(
        seed in any::<u64>(),
        script in proptest::collection::vec(command(), 1..120),
    ) {
        let mut session = GameSession::new(SessionConfig::default().with_seed(seed));
        for command in script {
            let before = session.state().clone();
            let events = session.execute(command);

            let state = session.state();
            prop_assert!(state.health <= state.max_health);
            prop_assert!(state.mana <= state.max_mana);
            prop_assert!(!state.inventory.is_empty());
            prop_assert!(state.current_weapon_index < state.inventory.len());
            prop_assert!(state.level >= 1);
            prop_assert_eq!(state.combat.is_some(), state.location == Place::Fighting);
            prop_assert!(!state.action_locked);
            if state.level >= 3 {
                prop_assert!(state.magic_unlocked);
            }

            if events.iter().any(GameEvent::is_rejection) {
                prop_assert_eq!(events.len(), 1);
                prop_assert_eq!(state, &before);
            }
        }
    }

    #[test]
    fn harder_never_pays_less(index in 0usize..3) {
        let kind = MonsterKind::ALL[index];
        let scaled: Vec<ScaledMonster> = Difficulty::ALL
            .iter()
            .map(|&d| ScaledMonster::new(kind, d))
            .collect();
        for pair in scaled.windows(2) {
            prop_assert!(pair[0].health <= pair[1].health);
            prop_assert!(pair[0].xp <= pair[1].xp);
            prop_assert!(pair[0].gold <= pair[1].gold);
            prop_assert!(pair[0].attack_base() <= pair[1].attack_base());
        }
    }

    #[test]
    fn flee_outcome_is_all_or_nothing(seed in any::<u64>()) {
        let mut session = GameSession::new(SessionConfig::default().with_seed(seed));
        session.go_cave();
        session.fight_monster(1);
        let events = session.flee();
        let state = session.state();
        if events.contains(&GameEvent::Escaped) {
            prop_assert_eq!(state.location, Place::Town);
            prop_assert_eq!(state.health, 100);
        } else {
            prop_assert_eq!(&events[0], &GameEvent::EscapeFailed);
            prop_assert!(state.health < 100 || state.location == Place::Town);
        }
    }
}
