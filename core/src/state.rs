use alloc::vec;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::catalog::{xp_to_next, Catalog, MAX_LEVEL};
use crate::config::SessionConfig;
use crate::error::{GameError, GameResult};
use crate::pool::Pool;
use crate::rng::ShopRng;
use crate::shop::generate_shop;
use crate::types::{Container, Slot, SlotRef, UnitInstance};

/// Number of shop slots
pub const SHOP_SIZE: usize = 5;
/// Number of bench slots
pub const BENCH_SIZE: usize = 10;
/// Board rows
pub const BOARD_ROWS: usize = 4;
/// Board columns
pub const BOARD_COLS: usize = 7;
/// Physical board slots; occupancy is capped by level
pub const BOARD_SLOTS: usize = BOARD_ROWS * BOARD_COLS;
/// Upper bound on the gold balance
pub const GOLD_CAP: u32 = 10_000;
/// Cost of a shop reroll
pub const REROLL_COST: u32 = 2;
/// Cost of one XP purchase
pub const XP_COST: u32 = 4;
/// XP granted per purchase
pub const XP_PER_PURCHASE: u32 = 4;

/// The complete economy state of one session
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub config: SessionConfig,
    /// Gold balance (ignored for affordability in time attack)
    pub gold: u32,
    /// Player level (1-10), also the board capacity
    pub level: u8,
    /// XP towards the next level
    pub xp: u32,
    /// Shop offers (5 slots, `None` once bought or when nothing could be drawn)
    pub shop: Vec<Slot>,
    /// When set, rerolls are rejected
    pub locked: bool,
    pub bench: Vec<Slot>,
    pub board: Vec<Slot>,
    pub pool: Pool,
    /// Gold spent on units, rerolls and XP. Never decreases.
    pub spent: u32,
    /// Gold credited back by sales
    pub refunded: u32,
    pub reroll_count: u32,
}

impl GameState {
    /// A fresh state with an empty shop
    pub fn empty(catalog: &Catalog, config: SessionConfig) -> Self {
        let config = config.normalized();
        Self {
            gold: config.starting_gold.min(GOLD_CAP),
            level: config.starting_level,
            xp: 0,
            shop: vec![None; SHOP_SIZE],
            locked: false,
            bench: vec![None; BENCH_SIZE],
            board: vec![None; BOARD_SLOTS],
            pool: Pool::from_catalog(catalog),
            spent: 0,
            refunded: 0,
            reroll_count: 0,
            config,
        }
    }

    /// A fresh state with a rolled shop
    pub fn new<R: ShopRng>(catalog: &Catalog, config: SessionConfig, rng: &mut R) -> Self {
        let mut state = Self::empty(catalog, config);
        state.refresh_shop(catalog, rng);
        state
    }

    /// Replace the whole shop row
    pub fn refresh_shop<R: ShopRng>(&mut self, catalog: &Catalog, rng: &mut R) {
        self.shop = generate_shop(
            catalog,
            self.level,
            &self.board,
            &self.bench,
            &self.pool,
            rng,
        );
    }

    /// XP needed to leave the current level
    pub fn xp_required(&self) -> u32 {
        xp_to_next(self.level)
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= MAX_LEVEL
    }

    /// Units allowed on the board at the current level
    pub fn board_capacity(&self) -> usize {
        (self.level as usize).min(BOARD_SLOTS)
    }

    /// Check if player can afford a cost
    pub fn can_afford(&self, cost: u32) -> bool {
        self.config.is_time_attack() || self.gold >= cost
    }

    /// Charge gold and record the spend
    pub fn charge(&mut self, cost: u32) -> GameResult<()> {
        if !self.can_afford(cost) {
            return Err(GameError::NotEnoughGold {
                have: self.gold,
                need: cost,
            });
        }
        if !self.config.is_time_attack() {
            self.gold -= cost;
        }
        self.spent = self.spent.saturating_add(cost);
        Ok(())
    }

    /// Credit gold from a sale
    pub fn credit(&mut self, amount: u32) {
        if !self.config.is_time_attack() {
            self.gold = self.gold.saturating_add(amount).min(GOLD_CAP);
        }
        self.refunded = self.refunded.saturating_add(amount);
    }

    /// Spend as reported in results: net of refunds in time attack
    pub fn reported_spent(&self) -> u32 {
        if self.config.is_time_attack() {
            self.spent.saturating_sub(self.refunded)
        } else {
            self.spent
        }
    }

    /// Find an empty bench slot
    pub fn find_empty_bench_slot(&self) -> Option<usize> {
        self.bench.iter().position(|slot| slot.is_none())
    }

    /// Find an empty board slot
    pub fn find_empty_board_slot(&self) -> Option<usize> {
        self.board.iter().position(|slot| slot.is_none())
    }

    /// Count units on the board
    pub fn board_unit_count(&self) -> usize {
        self.board.iter().filter(|slot| slot.is_some()).count()
    }

    /// Count units on the bench
    pub fn bench_unit_count(&self) -> usize {
        self.bench.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_bench_full(&self) -> bool {
        self.find_empty_bench_slot().is_none()
    }

    /// Unit at a container position, if the position is valid and occupied
    pub fn unit_at(&self, at: SlotRef) -> Option<&UnitInstance> {
        self.container(at.container).get(at.idx())?.as_ref()
    }

    pub fn container(&self, which: Container) -> &[Slot] {
        match which {
            Container::Board => &self.board,
            Container::Bench => &self.bench,
        }
    }

    /// Validate a position and return its slot
    pub(crate) fn slot_mut(&mut self, at: SlotRef) -> GameResult<&mut Slot> {
        match at.container {
            Container::Board => self
                .board
                .get_mut(at.idx())
                .ok_or(GameError::InvalidBoardSlot { index: at.index }),
            Container::Bench => self
                .bench
                .get_mut(at.idx())
                .ok_or(GameError::InvalidBenchSlot { index: at.index }),
        }
    }

    pub(crate) fn check_slot(&self, at: SlotRef) -> GameResult<()> {
        let len = self.container(at.container).len();
        if at.idx() < len {
            return Ok(());
        }
        Err(match at.container {
            Container::Board => GameError::InvalidBoardSlot { index: at.index },
            Container::Bench => GameError::InvalidBenchSlot { index: at.index },
        })
    }
}
