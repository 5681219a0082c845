//! Shop generation
//!
//! Each slot is rolled independently: a cost tier from the level's odds,
//! then a unit of that tier weighted by how many copies are left. Given the
//! same random sequence the output is always the same.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::catalog::{shop_odds, Catalog, COST_TIERS};
use crate::merge::three_star_keys;
use crate::pool::Pool;
use crate::rng::ShopRng;
use crate::state::SHOP_SIZE;
use crate::types::{CostTier, Slot, UnitInstance, UnitKey, UnitTemplate};

/// Roll a full shop row
pub fn generate_shop<R: ShopRng>(
    catalog: &Catalog,
    level: u8,
    board: &[Slot],
    bench: &[Slot],
    pool: &Pool,
    rng: &mut R,
) -> Vec<Slot> {
    let odds = shop_odds(level);
    let maxed = three_star_keys(board, bench);
    (0..SHOP_SIZE)
        .map(|_| roll_slot(catalog, odds, &maxed, pool, rng))
        .collect()
}

/// Roll a single offer. `None` when the drawn tier has nothing left to offer.
pub fn roll_slot<R: ShopRng>(
    catalog: &Catalog,
    odds: &[u32; COST_TIERS],
    maxed: &BTreeSet<UnitKey>,
    pool: &Pool,
    rng: &mut R,
) -> Slot {
    let tier = roll_tier(odds, rng)?;
    let candidates = candidates(catalog, tier, maxed, pool);
    pick_weighted(&candidates, rng).map(UnitInstance::from_template)
}

/// Cumulative-weight draw of a cost tier. Zero-weight tiers never come up.
pub fn roll_tier<R: ShopRng>(odds: &[u32; COST_TIERS], rng: &mut R) -> Option<CostTier> {
    rng.pick_weighted(odds).map(|i| i as CostTier + 1)
}

/// Units of a tier that may be offered, paired with their remaining count
pub fn candidates<'a>(
    catalog: &'a Catalog,
    tier: CostTier,
    maxed: &BTreeSet<UnitKey>,
    pool: &Pool,
) -> Vec<(&'a UnitTemplate, u32)> {
    catalog
        .tier(tier)
        .filter(|t| !maxed.contains(&t.key))
        .map(|t| (t, pool.remaining(&t.key)))
        .filter(|&(_, left)| left > 0)
        .collect()
}

fn pick_weighted<'a, R: ShopRng>(
    candidates: &[(&'a UnitTemplate, u32)],
    rng: &mut R,
) -> Option<&'a UnitTemplate> {
    let weights: Vec<u32> = candidates.iter().map(|&(_, w)| w).collect();
    rng.pick_weighted(&weights).map(|i| candidates[i].0)
}
