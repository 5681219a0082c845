mod properties;
mod session;
mod view;

use crate::catalog::Catalog;
use crate::config::SessionConfig;
use crate::rng::XorShiftRng;
use crate::state::GameState;
use crate::types::*;

// ==========================================
// HELPER FUNCTIONS (Boilerplate Reduction)
// ==========================================

/// Ten distinct cost-1 units, none of them Garen
const FILLER: [&str; 10] = [
    "Syndra", "Rell", "Gnar", "Sivir", "Kennen", "Malphite", "Aatrox", "Ezreal", "Kayle", "Naafiri",
];

fn catalog() -> Catalog {
    Catalog::standard()
}

fn rng(seed: u64) -> XorShiftRng {
    XorShiftRng::seed_from_u64(seed)
}

/// A unit at a rank with no pool debt
fn unit(key: &str, rank: Rank) -> UnitInstance {
    let catalog = catalog();
    let template = catalog.get(key).expect("unit in roster");
    UnitInstance::from_template(template).with_rank(rank)
}

fn r1(key: &str) -> Option<UnitInstance> {
    Some(unit(key, Rank::One))
}

fn empty_slots(len: usize) -> Vec<Slot> {
    vec![None; len]
}

/// A standard state with an empty shop
fn fresh_state(config: SessionConfig) -> GameState {
    GameState::empty(&catalog(), config)
}

/// Put a rank-1 offer of `key` in a shop slot
fn offer(state: &mut GameState, slot: usize, key: &str) {
    state.shop[slot] = r1(key);
}

fn fill_bench(state: &mut GameState) {
    for (i, key) in FILLER.iter().enumerate() {
        state.bench[i] = r1(key);
    }
}

fn keys(slots: &[Slot]) -> Vec<Option<(&str, Rank)>> {
    slots
        .iter()
        .map(|s| s.as_ref().map(|u| (u.key.as_str(), u.rank)))
        .collect()
}
