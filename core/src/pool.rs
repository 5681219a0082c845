//! Shared unit pool
//!
//! The pool is independent ground truth for how many copies of each unit
//! can still be drawn. It shrinks on purchase and grows on sale, driven by
//! the provenance recorded on each instance. It is never re-derived from
//! the containers; [`derived_remaining`] exists for display only.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::config::OverlapMode;
use crate::error::{GameError, GameResult};
use crate::rng::ShopRng;
use crate::types::{Slot, UnitKey};

/// Own copies burned per purchased copy of a wanted unit when contested
pub const CONTESTED_OWN_COPIES: u32 = 2;

/// Same-cost side copies burned per purchased copy of a wanted unit when contested
pub const CONTESTED_SIDE_BURNS: usize = 6;

/// Remaining drawable copies per unit
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Encode, Decode, TypeInfo, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Pool {
    counts: BTreeMap<UnitKey, u32>,
}

/// What a purchase of a unit may burn besides the unit itself
#[derive(Debug, Clone, Copy)]
pub struct BurnRules<'a> {
    pub overlap: OverlapMode,
    pub wanted: &'a BTreeSet<UnitKey>,
    /// Units never picked as side-burn victims (held at rank 3)
    pub excluded: &'a BTreeSet<UnitKey>,
}

impl Pool {
    /// Full allocation for every unit in the catalog
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let counts = catalog
            .templates()
            .iter()
            .map(|t| (t.key.clone(), catalog.allocation(&t.key)))
            .collect();
        Self { counts }
    }

    pub fn from_counts(counts: BTreeMap<UnitKey, u32>) -> Self {
        Self { counts }
    }

    /// Stored drawable copies of a unit (0 if unknown)
    pub fn remaining(&self, key: &str) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &BTreeMap<UnitKey, u32> {
        &self.counts
    }

    /// Full allocation minus the pool entries recorded on held units.
    ///
    /// Rebuilds a pool for records that never stored one, so selling a
    /// loaded unit returns exactly what it took.
    pub fn outstanding(catalog: &Catalog, board: &[Slot], bench: &[Slot]) -> Self {
        let mut pool = Self::from_catalog(catalog);
        for unit in board.iter().chain(bench.iter()).flatten() {
            for key in &unit.removed_identities {
                if let Some(count) = pool.counts.get_mut(key) {
                    *count = count.saturating_sub(1);
                }
            }
        }
        pool
    }

    /// Return copies of a discarded unit, clamped at each allocation
    pub fn reclaim(&mut self, catalog: &Catalog, removed: &[UnitKey]) {
        for key in removed {
            let cap = catalog.allocation(key);
            if let Some(count) = self.counts.get_mut(key) {
                *count = (*count + 1).min(cap);
            }
        }
    }

    /// Fill in units missing from a loaded pool and clamp counts to their allocation
    pub fn normalize(&mut self, catalog: &Catalog) {
        self.counts.retain(|key, _| catalog.contains(key));
        for template in catalog.templates() {
            let cap = catalog.allocation(&template.key);
            let entry = self.counts.entry(template.key.clone()).or_insert(cap);
            *entry = (*entry).min(cap);
        }
    }

    /// Remove `quantity` copies of a unit
    pub fn consume(&mut self, key: &str, quantity: u32) -> GameResult<()> {
        let have = self.remaining(key);
        debug_assert!(have >= quantity, "pool underflow for {key}");
        let Some(left) = have.checked_sub(quantity) else {
            return Err(GameError::PoolUnderflow { key: key.into() });
        };
        self.counts.insert(key.into(), left);
        Ok(())
    }

    /// Return one copy per entry of `removed` to the pool.
    ///
    /// Validated against the allocation ceiling before anything is written,
    /// so a rejected restore leaves the pool untouched.
    pub fn restore(&mut self, catalog: &Catalog, removed: &[UnitKey]) -> GameResult<()> {
        let mut returned: BTreeMap<&str, u32> = BTreeMap::new();
        for key in removed {
            *returned.entry(key.as_str()).or_insert(0) += 1;
        }
        for (&key, &qty) in &returned {
            let cap = catalog.allocation(key);
            let next = self.remaining(key).saturating_add(qty);
            debug_assert!(next <= cap, "pool overflow for {key}");
            if next > cap {
                return Err(GameError::PoolOverflow { key: key.into() });
            }
        }
        for (key, qty) in returned {
            *self.counts.entry(key.into()).or_insert(0) += qty;
        }
        Ok(())
    }

    /// Burn the pool entries for `copies` purchased copies of `key`.
    ///
    /// Returns the provenance of each copy: the list of pool entries that
    /// must come back when that copy is sold. Fails without touching the
    /// pool if fewer than `copies` copies remain.
    pub fn draw_purchase<R: ShopRng>(
        &mut self,
        catalog: &Catalog,
        key: &str,
        copies: u32,
        rules: &BurnRules<'_>,
        rng: &mut R,
    ) -> GameResult<Vec<Vec<UnitKey>>> {
        let template = catalog.template(key)?;
        if self.remaining(key) < copies {
            return Err(GameError::PoolExhausted { key: key.into() });
        }

        let contested = rules.overlap == OverlapMode::With && rules.wanted.contains(key);
        let mut provenance = Vec::with_capacity(copies as usize);
        for drawn in 1..=copies {
            let mut removed = Vec::new();
            self.consume(key, 1)?;
            removed.push(UnitKey::from(key));
            if contested {
                // The contesting player's copy only goes if one is left
                // beyond the copies this purchase still owes.
                let owed = copies - drawn;
                for _ in 1..CONTESTED_OWN_COPIES {
                    if self.remaining(key) > owed {
                        self.consume(key, 1)?;
                        removed.push(UnitKey::from(key));
                    }
                }
                for _ in 0..CONTESTED_SIDE_BURNS {
                    let victims: Vec<&UnitKey> = catalog
                        .tier(template.cost)
                        .map(|t| &t.key)
                        .filter(|k| k.as_str() != key)
                        .filter(|k| !rules.wanted.contains(*k) && !rules.excluded.contains(*k))
                        .filter(|k| self.remaining(k) > 0)
                        .collect();
                    if victims.is_empty() {
                        break;
                    }
                    let victim = victims[rng.gen_range(victims.len())].clone();
                    self.consume(&victim, 1)?;
                    removed.push(victim);
                }
            }
            provenance.push(removed);
        }
        Ok(provenance)
    }
}

/// Copy weight of every instance of `key` across both containers
pub fn held_copies(key: &str, board: &[Slot], bench: &[Slot]) -> u32 {
    board
        .iter()
        .chain(bench.iter())
        .flatten()
        .filter(|u| u.key == key)
        .map(|u| u.copy_weight())
        .sum()
}

/// Allocation minus held copies, clamped at zero. Display only.
pub fn derived_remaining(catalog: &Catalog, key: &str, board: &[Slot], bench: &[Slot]) -> u32 {
    catalog
        .allocation(key)
        .saturating_sub(held_copies(key, board, bench))
}
