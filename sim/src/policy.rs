//! Scripted player used to drive sessions without a UI

use std::collections::BTreeSet;

use rerollbar_core::merge::max_rank;
use rerollbar_core::{Intent, Session, ShopRng, SlotRef, REROLL_COST, XP_COST};

/// Buys only target units, keeps the board filled, levels up to a fixed
/// level and otherwise rerolls.
#[derive(Debug, Clone, Copy)]
pub struct GreedyPolicy {
    /// Buy XP until this level is reached
    pub level_to: u8,
    /// Hard stop for a single run
    pub max_actions: u32,
}

/// How a scripted run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub completed: bool,
    pub actions: u32,
    pub rejected: u32,
}

impl Default for GreedyPolicy {
    fn default() -> Self {
        Self {
            level_to: 7,
            max_actions: 5_000,
        }
    }
}

impl GreedyPolicy {
    pub fn play<R: ShopRng>(&self, session: &mut Session<R>) -> Outcome {
        let mut outcome = Outcome {
            completed: session.is_complete(),
            actions: 0,
            rejected: 0,
        };
        // Shop slots that were refused since the last reroll
        let mut refused: BTreeSet<u32> = BTreeSet::new();

        while !outcome.completed && outcome.actions < self.max_actions {
            let Some(intent) = self.next_intent(session, &refused) else {
                break;
            };
            outcome.actions += 1;
            match session.apply(&intent) {
                Ok(report) => {
                    if report.shop_refreshed {
                        refused.clear();
                    }
                }
                Err(_) => {
                    outcome.rejected += 1;
                    match intent {
                        Intent::Buy { slot } => {
                            refused.insert(slot);
                        }
                        _ => break,
                    }
                }
            }
            outcome.completed = session.is_complete();
        }
        outcome
    }

    fn next_intent<R: ShopRng>(&self, session: &Session<R>, refused: &BTreeSet<u32>) -> Option<Intent> {
        let state = session.state();
        let targets = &state.config.targets;
        let short_of_target =
            |key: &str| match (targets.get(key), max_rank(key, &state.board, &state.bench)) {
                (Some(&want), Some(have)) => have < want,
                (Some(_), None) => true,
                (None, _) => false,
            };

        for (i, slot) in state.shop.iter().enumerate() {
            let i = i as u32;
            if let Some(offer) = slot {
                if !refused.contains(&i)
                    && short_of_target(&offer.key)
                    && state.can_afford(offer.cost as u32)
                {
                    return Some(Intent::Buy { slot: i });
                }
            }
        }

        if state.is_bench_full() {
            let junk = state
                .bench
                .iter()
                .position(|s| s.as_ref().is_some_and(|u| !short_of_target(&u.key)));
            if let Some(index) = junk {
                return Some(Intent::Sell {
                    at: SlotRef::bench(index),
                });
            }
        }

        if state.board_unit_count() < state.board_capacity() {
            if let Some(index) = state.bench.iter().position(Option::is_some) {
                return Some(Intent::PlaceFromBench {
                    index: index as u32,
                });
            }
        }

        if state.level < self.level_to && state.can_afford(XP_COST) {
            return Some(Intent::BuyXp);
        }

        if state.locked {
            return Some(Intent::ToggleLock);
        }
        state.can_afford(REROLL_COST).then_some(Intent::Reroll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rerollbar_core::{Catalog, EconomyMode, SessionConfig, XorShiftRng};

    fn session(seed: u64, wanted: &[&str]) -> Session<XorShiftRng> {
        let config = SessionConfig::chasing(wanted.iter().copied()).with_mode(EconomyMode::TimeAttack);
        Session::new(Catalog::standard(), config, XorShiftRng::seed_from_u64(seed))
    }

    #[test]
    fn test_greedy_reaches_single_cheap_target() {
        let mut session = session(7, &["Garen"]);
        let outcome = GreedyPolicy::default().play(&mut session);

        assert!(outcome.completed, "{outcome:?}");
        assert!(outcome.actions > 0);
        assert!(session.is_complete());
    }

    #[test]
    fn test_greedy_respects_action_cap() {
        let mut session = session(3, &["Gwen", "Jinx"]);
        let policy = GreedyPolicy {
            level_to: 3,
            max_actions: 10,
        };
        let outcome = policy.play(&mut session);

        assert!(outcome.actions <= 10);
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let a = GreedyPolicy::default().play(&mut session(99, &["Garen", "Lux"]));
        let b = GreedyPolicy::default().play(&mut session(99, &["Garen", "Lux"]));
        assert_eq!(a, b);
    }
}
