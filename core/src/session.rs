//! Persistence and result payloads
//!
//! `SavedSession` is the flat record a storage collaborator keeps between
//! visits. Loading normalizes it once so the rest of the crate never sees a
//! missing field or a container of the wrong length.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::catalog::{xp_to_next, Catalog, MAX_LEVEL, MIN_LEVEL};
use crate::config::{OverlapMode, SessionConfig, STARTING_GOLD, STARTING_LEVEL};
use crate::log;
use crate::merge::{max_rank, merge_in_place};
use crate::pool::Pool;
use crate::rng::ShopRng;
use crate::state::{GameState, BENCH_SIZE, BOARD_SLOTS, GOLD_CAP, SHOP_SIZE};
use crate::types::{Rank, Slot, UnitInstance, UnitKey};

/// Payload submitted to a leaderboard when a run completes
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub deck: String,
    pub spent: u32,
    pub reroll_count: u32,
    pub time_sec: u32,
    /// Caller-supplied timestamp (RFC 3339)
    pub date: String,
    pub targets: BTreeMap<UnitKey, Rank>,
    #[serde(default)]
    pub overlap_mode: OverlapMode,
}

/// Whether every target is held at (at least) its rank. No targets means never.
pub fn targets_reached(targets: &BTreeMap<UnitKey, Rank>, board: &[Slot], bench: &[Slot]) -> bool {
    !targets.is_empty()
        && targets
            .iter()
            .all(|(key, &want)| max_rank(key, board, bench).is_some_and(|have| have >= want))
}

fn default_gold() -> u32 {
    STARTING_GOLD
}

fn default_level() -> u8 {
    STARTING_LEVEL
}

/// Persisted form of a session
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSession {
    #[serde(default = "default_gold")]
    pub gold: u32,
    #[serde(default = "default_level")]
    pub level: u8,
    #[serde(default)]
    pub xp: u32,
    /// Absent shops are rolled again on load
    #[serde(default)]
    pub shop: Option<Vec<Slot>>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub bench: Vec<Slot>,
    #[serde(default)]
    pub board: Vec<Slot>,
    /// Absent pools start from the full allocation
    #[serde(default)]
    pub pool: Option<Pool>,
    #[serde(default)]
    pub spent: u32,
    #[serde(default)]
    pub refunded: u32,
    #[serde(default)]
    pub reroll_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<SessionConfig>,
}

impl SavedSession {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            gold: state.gold,
            level: state.level,
            xp: state.xp,
            shop: Some(state.shop.clone()),
            locked: state.locked,
            bench: state.bench.clone(),
            board: state.board.clone(),
            pool: Some(state.pool.clone()),
            spent: state.spent,
            refunded: state.refunded,
            reroll_count: state.reroll_count,
            config: Some(state.config.clone()),
        }
    }

    /// Rebuild a live state.
    ///
    /// `fallback` is used when the record carries no config. Units unknown to
    /// the catalog are dropped and the rest get fresh catalog metadata.
    pub fn into_state<R: ShopRng>(
        self,
        catalog: &Catalog,
        fallback: SessionConfig,
        rng: &mut R,
    ) -> GameState {
        let config = self.config.unwrap_or(fallback).normalized();
        let level = self.level.clamp(MIN_LEVEL, MAX_LEVEL);
        let xp = match xp_to_next(level) {
            0 => 0,
            need => self.xp.min(need - 1),
        };

        let mut state = GameState {
            gold: self.gold.min(GOLD_CAP),
            level,
            xp,
            shop: Vec::new(),
            locked: self.locked,
            bench: fit_slots(catalog, self.bench, BENCH_SIZE),
            board: fit_slots(catalog, self.board, BOARD_SLOTS),
            pool: Pool::default(),
            spent: self.spent,
            refunded: self.refunded,
            reroll_count: self.reroll_count,
            config,
        };
        let dropped = fit_board(&mut state);
        merge_in_place(&mut state.board, &mut state.bench);

        state.pool = match self.pool {
            Some(mut pool) => {
                pool.normalize(catalog);
                for unit in &dropped {
                    pool.reclaim(catalog, &unit.removed_identities);
                }
                pool
            }
            None => Pool::outstanding(catalog, &state.board, &state.bench),
        };
        match self.shop {
            Some(shop) => {
                state.shop = fit_slots(catalog, shop, SHOP_SIZE)
                    .into_iter()
                    .map(|slot| slot.map(|u| u.with_rank(Rank::One).with_removed(Vec::new())))
                    .collect();
            }
            None => state.refresh_shop(catalog, rng),
        }
        state
    }
}

/// Move board units past the level's capacity onto free bench slots.
/// Returns the units that fit nowhere.
fn fit_board(state: &mut GameState) -> Vec<UnitInstance> {
    let extra: Vec<usize> = state
        .board
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.is_some())
        .map(|(i, _)| i)
        .skip(state.board_capacity())
        .collect();

    let mut dropped = Vec::new();
    for index in extra {
        let Some(unit) = state.board[index].take() else {
            continue;
        };
        match state.find_empty_bench_slot() {
            Some(slot) => state.bench[slot] = Some(unit),
            None => {
                log::warn(&format!("saved board over capacity, dropping {}", unit.key));
                dropped.push(unit);
            }
        }
    }
    dropped
}

fn fit_slots(catalog: &Catalog, slots: Vec<Slot>, len: usize) -> Vec<Slot> {
    let mut slots: Vec<Slot> = slots
        .into_iter()
        .map(|slot| slot.and_then(|unit| refresh_unit(catalog, unit)))
        .collect();
    slots.resize(len, None);
    slots
}

fn refresh_unit(catalog: &Catalog, unit: UnitInstance) -> Option<UnitInstance> {
    let template = catalog.get(&unit.key)?;
    Some(
        UnitInstance::from_template(template)
            .with_rank(unit.rank)
            .with_removed(unit.removed_identities),
    )
}

/// Key-value persistence for one saved session
pub trait SessionStore {
    type Error;

    fn load(&self) -> Result<Option<SavedSession>, Self::Error>;
    fn save(&mut self, session: &SavedSession) -> Result<(), Self::Error>;
    fn clear(&mut self) -> Result<(), Self::Error>;
}

/// Holds the session as a SCALE-encoded blob in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of the stored snapshot in bytes
    pub fn stored_len(&self) -> usize {
        self.blob.as_ref().map_or(0, Vec::len)
    }
}

impl SessionStore for MemoryStore {
    type Error = parity_scale_codec::Error;

    fn load(&self) -> Result<Option<SavedSession>, Self::Error> {
        self.blob
            .as_deref()
            .map(|mut bytes| SavedSession::decode(&mut bytes))
            .transpose()
    }

    fn save(&mut self, session: &SavedSession) -> Result<(), Self::Error> {
        self.blob = Some(session.encode());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.blob = None;
        Ok(())
    }
}

/// Serialize a saved session to JSON
#[cfg(feature = "std")]
pub fn session_to_json(session: &SavedSession) -> serde_json::Result<String> {
    serde_json::to_string(session)
}

/// Parse a saved session from JSON. Missing fields take their defaults.
#[cfg(feature = "std")]
pub fn session_from_json(json: &str) -> serde_json::Result<SavedSession> {
    serde_json::from_str(json)
}

/// Serialize a run result to JSON
#[cfg(feature = "std")]
pub fn result_to_json(result: &RunResult) -> serde_json::Result<String> {
    serde_json::to_string(result)
}
