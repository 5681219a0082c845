// Property-based tests over random intent sequences
use proptest::prelude::*;

use super::*;
use crate::config::{EconomyMode, OverlapMode};
use crate::economy::Intent;
use crate::merge::{count_by_rank, three_star_keys};
use crate::pool::held_copies;
use crate::state::{BENCH_SIZE, BOARD_SLOTS, GOLD_CAP, SHOP_SIZE};

fn slot_ref() -> impl Strategy<Value = SlotRef> {
    prop_oneof![
        (0..BOARD_SLOTS).prop_map(SlotRef::board),
        (0..BENCH_SIZE).prop_map(SlotRef::bench),
    ]
}

fn intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        2 => Just(Intent::Reroll),
        1 => Just(Intent::BuyXp),
        6 => (0..SHOP_SIZE as u32).prop_map(|slot| Intent::Buy { slot }),
        2 => slot_ref().prop_map(|at| Intent::Sell { at }),
        2 => (0..BENCH_SIZE as u32).prop_map(|index| Intent::PlaceFromBench { index }),
        1 => (0..10u32).prop_map(|index| Intent::ReturnToBench { index }),
        2 => (slot_ref(), slot_ref()).prop_map(|(from, to)| Intent::MoveUnit { from, to }),
        1 => Just(Intent::ToggleLock),
    ]
}

fn practice_config() -> SessionConfig {
    SessionConfig::chasing(["Garen", "Lux", "Ahri"]).with_mode(EconomyMode::TimeAttack)
}

fn contested_config() -> SessionConfig {
    SessionConfig::chasing(["Garen", "Kayle", "Lux", "Ahri"]).with_overlap(OverlapMode::With)
}

/// Every pool entry is either still drawable or recorded on a held unit
fn check_pool_ledger(catalog: &Catalog, state: &GameState) -> Result<(), TestCaseError> {
    let mut outstanding: std::collections::BTreeMap<&str, u32> = Default::default();
    for unit in state.board.iter().chain(state.bench.iter()).flatten() {
        for key in &unit.removed_identities {
            *outstanding.entry(key.as_str()).or_insert(0) += 1;
        }
    }
    for template in catalog.templates() {
        let key = template.key.as_str();
        prop_assert_eq!(
            state.pool.remaining(key) + outstanding.get(key).copied().unwrap_or(0),
            catalog.allocation(key),
            "{}", key
        );
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn proptest_invariants_hold_over_intent_sequences(
        seed in any::<u64>(),
        script in prop::collection::vec(intent(), 0..120)
    ) {
        let catalog = catalog();
        let mut r = rng(seed);
        let mut state = GameState::new(&catalog, practice_config(), &mut r);

        for intent in &script {
            let before = state.clone();
            match state.apply(&catalog, intent, &mut r) {
                Ok(_) => {
                    if *intent == Intent::Reroll {
                        let maxed = three_star_keys(&state.board, &state.bench);
                        for offer in state.shop.iter().flatten() {
                            prop_assert!(state.pool.remaining(&offer.key) > 0);
                            prop_assert!(!maxed.contains(&offer.key));
                        }
                    }
                }
                Err(_) => prop_assert_eq!(&state, &before),
            }

            // pool conservation
            for template in catalog.templates() {
                let key = template.key.as_str();
                prop_assert_eq!(
                    state.pool.remaining(key) + held_copies(key, &state.board, &state.bench),
                    catalog.allocation(key),
                    "{}", key
                );
            }

            // merge closure
            for template in catalog.templates() {
                let counts = count_by_rank(&template.key, &state.board, &state.bench);
                prop_assert!(counts.one < 3 && counts.two < 3, "{} {:?}", template.key, counts);
            }

            // capacity
            prop_assert!(state.board_unit_count() <= state.board_capacity());
            prop_assert_eq!(state.bench.len(), BENCH_SIZE);
            prop_assert_eq!(state.board.len(), BOARD_SLOTS);
            prop_assert_eq!(state.shop.len(), SHOP_SIZE);
        }
    }

    #[test]
    fn proptest_contested_standard_sequences_are_atomic(
        seed in any::<u64>(),
        script in prop::collection::vec(intent(), 0..160)
    ) {
        let catalog = catalog();
        let mut r = rng(seed);
        let mut state = GameState::new(&catalog, contested_config(), &mut r);

        for intent in &script {
            let before = state.clone();
            let gold_before = state.gold;
            match state.apply(&catalog, intent, &mut r) {
                Ok(_) => {
                    prop_assert!(state.gold <= GOLD_CAP);
                    prop_assert!(state.spent >= before.spent);
                    prop_assert_eq!(
                        state.spent - before.spent + state.gold,
                        gold_before + state.refunded - before.refunded
                    );
                }
                Err(_) => prop_assert_eq!(&state, &before),
            }

            check_pool_ledger(&catalog, &state)?;
            prop_assert!(state.board_unit_count() <= state.board_capacity());
            for template in catalog.templates() {
                let counts = count_by_rank(&template.key, &state.board, &state.bench);
                prop_assert!(counts.one < 3 && counts.two < 3, "{} {:?}", template.key, counts);
            }
        }
    }

    #[test]
    fn proptest_contested_buy_then_sell_restores_pool(seed in any::<u64>(), slot in 0..SHOP_SIZE) {
        let catalog = catalog();
        let mut r = rng(seed);
        let probe = GameState::new(&catalog, SessionConfig::default(), &mut r);
        let Some(target) = probe.shop[slot].as_ref().map(|u| u.key.clone()) else {
            return Ok(());
        };

        let config = SessionConfig::chasing([target])
            .with_mode(EconomyMode::TimeAttack)
            .with_overlap(OverlapMode::With);
        let mut state = GameState::empty(&catalog, config);
        state.shop = probe.shop.clone();
        let before = state.pool.clone();

        state.buy_from_shop(&catalog, slot, &mut r).expect("buy");
        state.sell_unit(&catalog, SlotRef::bench(0)).expect("sell");

        prop_assert_eq!(state.pool, before);
    }
}
