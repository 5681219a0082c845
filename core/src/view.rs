//! View types for UI serialization
//!
//! Snapshots and derived queries a frontend renders from. Everything here is
//! computed from the state on demand; nothing is cached.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

use crate::catalog::{shop_odds, Catalog};
use crate::merge::count_by_rank;
use crate::pool::{derived_remaining, held_copies};
use crate::state::GameState;
use crate::types::*;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

/// A shop offer with ownership annotations
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct ShopOfferView {
    pub key: UnitKey,
    pub name: String,
    pub cost: CostTier,
    pub traits: Vec<String>,
    /// Any copy held on board or bench
    pub owned: bool,
    pub on_board: bool,
    pub wanted: bool,
    pub affordable: bool,
    /// See [`promo_hint`]
    pub promo_hint: u8,
}

/// Units on the board carrying one trait
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct TraitCount {
    pub name: String,
    pub count: u32,
}

/// One row of the pool tracker
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct PoolEntry {
    pub key: UnitKey,
    pub name: String,
    pub cost: CostTier,
    /// Drawable copies left in the pool
    pub remaining: u32,
    pub allocation: u32,
    /// Copy weight held across board and bench
    pub held: u32,
    /// Allocation minus held copies, ignoring anything burned by other players
    pub unheld: u32,
    pub wanted: bool,
}

/// The complete game view sent to a frontend
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct GameView {
    pub gold: u32,
    pub level: u8,
    pub xp: u32,
    pub xp_required: u32,
    /// Shop odds (percent per cost tier) at the current level
    pub odds: Vec<u32>,
    pub board: Vec<Slot>,
    pub bench: Vec<Slot>,
    pub shop: Vec<Option<ShopOfferView>>,
    pub locked: bool,
    pub spent: u32,
    pub reroll_count: u32,
    pub board_count: u32,
    pub board_capacity: u32,
    pub traits: Vec<TraitCount>,
    pub three_star_count: u32,
}

impl GameView {
    pub fn from_state(state: &GameState) -> Self {
        let shop = state
            .shop
            .iter()
            .map(|slot| slot.as_ref().map(|unit| offer_view(state, unit)))
            .collect();

        Self {
            gold: state.gold,
            level: state.level,
            xp: state.xp,
            xp_required: state.xp_required(),
            odds: shop_odds(state.level).to_vec(),
            board: state.board.clone(),
            bench: state.bench.clone(),
            shop,
            locked: state.locked,
            spent: state.spent,
            reroll_count: state.reroll_count,
            board_count: state.board_unit_count() as u32,
            board_capacity: state.board_capacity() as u32,
            traits: trait_counts(&state.board),
            three_star_count: three_star_count(&state.board),
        }
    }
}

fn offer_view(state: &GameState, unit: &UnitInstance) -> ShopOfferView {
    let held = |slots: &[Slot]| slots.iter().flatten().any(|u| u.key == unit.key);
    ShopOfferView {
        key: unit.key.clone(),
        name: unit.name.clone(),
        cost: unit.cost,
        traits: unit.traits.clone(),
        owned: held(&state.board) || held(&state.bench),
        on_board: held(&state.board),
        wanted: state.config.is_wanted(&unit.key),
        affordable: state.can_afford(unit.cost as u32),
        promo_hint: promo_hint(&unit.key, &state.board, &state.bench),
    }
}

/// Per trait, the number of distinct units on the board carrying it.
/// Sorted by count descending, then name.
pub fn trait_counts(board: &[Slot]) -> Vec<TraitCount> {
    let mut seen: BTreeMap<&str, &UnitInstance> = BTreeMap::new();
    for unit in board.iter().flatten() {
        seen.entry(unit.key.as_str()).or_insert(unit);
    }

    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for unit in seen.values() {
        for name in &unit.traits {
            *counts.entry(name.as_str()).or_insert(0) += 1;
        }
    }

    let mut out: Vec<TraitCount> = counts
        .into_iter()
        .map(|(name, count)| TraitCount {
            name: name.into(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    out
}

/// Rank-3 units on the board
pub fn three_star_count(board: &[Slot]) -> u32 {
    board
        .iter()
        .flatten()
        .filter(|u| u.rank == Rank::Three)
        .count() as u32
}

/// Rank one more purchase of `key` is heading towards.
///
/// 3 when two rank-2 and two rank-1 copies are held, 2 when two rank-1
/// copies are held, otherwise 0. Always 0 once a rank-3 copy exists.
pub fn promo_hint(key: &str, board: &[Slot], bench: &[Slot]) -> u8 {
    let counts = count_by_rank(key, board, bench);
    if counts.three > 0 {
        0
    } else if counts.two >= 2 && counts.one >= 2 {
        3
    } else if counts.one >= 2 {
        2
    } else {
        0
    }
}

/// Remaining copies per unit, wanted units first, then fewest remaining.
///
/// `tier` restricts to one cost tier; `wanted_only` drops everything not chased.
pub fn pool_tracker(
    catalog: &Catalog,
    state: &GameState,
    tier: Option<CostTier>,
    wanted_only: bool,
) -> Vec<PoolEntry> {
    let config = &state.config;
    let mut rows: Vec<PoolEntry> = catalog
        .templates()
        .iter()
        .filter(|t| tier.map_or(true, |c| t.cost == c))
        .filter(|t| !wanted_only || config.is_wanted(&t.key))
        .map(|t| PoolEntry {
            key: t.key.clone(),
            name: t.name.clone(),
            cost: t.cost,
            remaining: state.pool.remaining(&t.key),
            allocation: catalog.allocation(&t.key),
            held: held_copies(&t.key, &state.board, &state.bench),
            unheld: derived_remaining(catalog, &t.key, &state.board, &state.bench),
            wanted: config.is_wanted(&t.key),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.wanted
            .cmp(&a.wanted)
            .then(a.remaining.cmp(&b.remaining))
            .then_with(|| a.key.cmp(&b.key))
    });
    rows
}
