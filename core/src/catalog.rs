//! Static reference data: roster, pool sizes, shop odds and XP table.
//!
//! The roster is compiled from /cards/roster.json by build.rs. The numeric
//! tables are plain constants.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::cards::roster_templates;
use crate::error::{GameError, GameResult};
use crate::types::{CostTier, UnitTemplate};

/// Number of cost tiers
pub const COST_TIERS: usize = 5;

/// Lowest player level
pub const MIN_LEVEL: u8 = 1;

/// Highest player level
pub const MAX_LEVEL: u8 = 10;

/// Copies of each unit in the shared pool, indexed by cost tier - 1
pub const POOL_SIZE_BY_TIER: [u32; COST_TIERS] = [30, 25, 18, 10, 9];

/// Shop odds in percent per cost tier, indexed by level - 1
pub const SHOP_ODDS: [[u32; COST_TIERS]; MAX_LEVEL as usize] = [
    [100, 0, 0, 0, 0],
    [100, 0, 0, 0, 0],
    [75, 25, 0, 0, 0],
    [55, 30, 15, 0, 0],
    [45, 33, 20, 2, 0],
    [30, 40, 25, 5, 0],
    [19, 30, 40, 10, 1],
    [17, 24, 32, 24, 3],
    [15, 18, 25, 30, 12],
    [5, 10, 20, 40, 25],
];

/// XP needed to advance from a level, indexed by level - 1. Level 10 is terminal.
pub const XP_TO_NEXT: [u32; MAX_LEVEL as usize] = [2, 2, 6, 10, 20, 36, 48, 76, 84, 0];

/// Shop odds row for a level (clamped into 1..=10)
pub fn shop_odds(level: u8) -> &'static [u32; COST_TIERS] {
    let idx = level.clamp(MIN_LEVEL, MAX_LEVEL) as usize - 1;
    &SHOP_ODDS[idx]
}

/// XP required to leave `level`; 0 at the terminal level
pub fn xp_to_next(level: u8) -> u32 {
    let idx = level.clamp(MIN_LEVEL, MAX_LEVEL) as usize - 1;
    XP_TO_NEXT[idx]
}

/// Pool allocation for one unit of the given cost tier
pub fn pool_size(cost: CostTier) -> u32 {
    match cost {
        1..=5 => POOL_SIZE_BY_TIER[cost as usize - 1],
        _ => 0,
    }
}

/// The unit roster, read-only for the whole process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    templates: Vec<UnitTemplate>,
    by_key: BTreeMap<alloc::string::String, usize>,
}

impl Catalog {
    /// Build a catalog from an explicit template list
    pub fn new(templates: Vec<UnitTemplate>) -> Self {
        let by_key = templates
            .iter()
            .enumerate()
            .map(|(i, t)| (t.key.clone(), i))
            .collect();
        Self { templates, by_key }
    }

    /// The built-in roster
    pub fn standard() -> Self {
        Self::new(roster_templates())
    }

    pub fn templates(&self) -> &[UnitTemplate] {
        &self.templates
    }

    pub fn get(&self, key: &str) -> Option<&UnitTemplate> {
        self.by_key.get(key).map(|&i| &self.templates[i])
    }

    pub fn template(&self, key: &str) -> GameResult<&UnitTemplate> {
        self.get(key).ok_or_else(|| GameError::UnknownUnit { key: key.into() })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Templates of one cost tier, in roster order
    pub fn tier(&self, cost: CostTier) -> impl Iterator<Item = &UnitTemplate> {
        self.templates.iter().filter(move |t| t.cost == cost)
    }

    /// Pool allocation for the unit with this key (0 if unknown)
    pub fn allocation(&self, key: &str) -> u32 {
        self.get(key).map(|t| pool_size(t.cost)).unwrap_or(0)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
