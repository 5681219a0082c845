//! Session driver
//!
//! Owns the catalog, the state and the injected RNG, and is what a frontend
//! or the simulator talks to.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::config::SessionConfig;
use crate::economy::{ActionReport, Intent};
use crate::error::GameResult;
use crate::log;
use crate::merge::max_rank;
use crate::rng::ShopRng;
use crate::session::{targets_reached, RunResult, SavedSession};
use crate::state::GameState;
use crate::types::{Rank, UnitKey};
use crate::view::GameView;

/// Progress towards one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetProgress {
    pub key: UnitKey,
    pub target: Rank,
    pub held: Option<Rank>,
}

impl TargetProgress {
    pub fn reached(&self) -> bool {
        self.held.is_some_and(|r| r >= self.target)
    }
}

pub struct Session<R: ShopRng> {
    catalog: Catalog,
    state: GameState,
    rng: R,
}

impl<R: ShopRng> Session<R> {
    /// Start a fresh session with a rolled shop
    pub fn new(catalog: Catalog, config: SessionConfig, mut rng: R) -> Self {
        log::info(&format!(
            "=== SESSION START deck={} overlap={} ===",
            config.deck_name,
            config.overlap.as_str()
        ));
        let state = GameState::new(&catalog, config, &mut rng);
        Self {
            catalog,
            state,
            rng,
        }
    }

    /// Resume from a saved record
    pub fn resume(catalog: Catalog, saved: SavedSession, fallback: SessionConfig, mut rng: R) -> Self {
        let state = saved.into_state(&catalog, fallback, &mut rng);
        log::info(&format!("=== SESSION RESUMED level={} gold={} ===", state.level, state.gold));
        Self {
            catalog,
            state,
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn view(&self) -> GameView {
        GameView::from_state(&self.state)
    }

    /// Apply one intent
    pub fn apply(&mut self, intent: &Intent) -> GameResult<ActionReport> {
        let report = self.state.apply(&self.catalog, intent, &mut self.rng)?;
        for promo in &report.promotions {
            log::debug("merge", &format!("{} -> {}*", promo.key, promo.rank.as_u8()));
        }
        if self.is_complete() {
            log::info("=== TARGETS REACHED ===");
        }
        Ok(report)
    }

    /// Whether every target is held at its rank
    pub fn is_complete(&self) -> bool {
        targets_reached(&self.state.config.targets, &self.state.board, &self.state.bench)
    }

    pub fn progress(&self) -> Vec<TargetProgress> {
        self.state
            .config
            .targets
            .iter()
            .map(|(key, &target)| TargetProgress {
                key: key.clone(),
                target,
                held: max_rank(key, &self.state.board, &self.state.bench),
            })
            .collect()
    }

    /// Result payload for a leaderboard
    pub fn result(&self, time_sec: u32, date: String) -> RunResult {
        RunResult {
            deck: self.state.config.deck_name.clone(),
            spent: self.state.reported_spent(),
            reroll_count: self.state.reroll_count,
            time_sec,
            date,
            targets: self.state.config.targets.clone(),
            overlap_mode: self.state.config.overlap,
        }
    }

    pub fn save(&self) -> SavedSession {
        SavedSession::from_state(&self.state)
    }

    pub fn into_state(self) -> GameState {
        self.state
    }
}
