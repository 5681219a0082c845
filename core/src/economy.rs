//! Economy transitions
//!
//! Every operation validates against the current state before writing
//! anything, so a rejected intent leaves the state exactly as it was and
//! draws nothing from the RNG.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, MAX_LEVEL, MIN_LEVEL};
use crate::error::{GameError, GameResult};
use crate::log;
use crate::merge::{merge_in_place, simulate_purchase, simulate_with_copies, three_star_keys};
use crate::pool::BurnRules;
use crate::rng::ShopRng;
use crate::state::{GameState, GOLD_CAP, REROLL_COST, XP_COST, XP_PER_PURCHASE};
use crate::types::{Container, Promotion, SlotRef, UnitTemplate};

/// A player intent
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Intent {
    Reroll,
    BuyXp,
    Buy { slot: u32 },
    Sell { at: SlotRef },
    PlaceFromBench { index: u32 },
    ReturnToBench { index: u32 },
    MoveUnit { from: SlotRef, to: SlotRef },
    ToggleLock,
    AddGold { amount: i32 },
    NudgeLevel { delta: i8 },
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Reroll => "reroll",
            Intent::BuyXp => "buy_xp",
            Intent::Buy { .. } => "buy",
            Intent::Sell { .. } => "sell",
            Intent::PlaceFromBench { .. } => "place_from_bench",
            Intent::ReturnToBench { .. } => "return_to_bench",
            Intent::MoveUnit { .. } => "move_unit",
            Intent::ToggleLock => "toggle_lock",
            Intent::AddGold { .. } => "add_gold",
            Intent::NudgeLevel { .. } => "nudge_level",
        }
    }
}

/// What a committed intent did, for presentation
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Encode, Decode, TypeInfo, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct ActionReport {
    /// Merges triggered, in resolution order
    pub promotions: Vec<Promotion>,
    /// Levels gained through XP
    pub levels_gained: u8,
    /// Whether the shop row was regenerated
    pub shop_refreshed: bool,
    /// Gold credited by a sale
    pub sold_for: u32,
}

impl ActionReport {
    fn promoted(promotions: Vec<Promotion>) -> Self {
        Self {
            promotions,
            ..Self::default()
        }
    }
}

/// Pure form of [`GameState::apply`]: returns the next state, leaving the input alone
pub fn reduce<R: ShopRng>(
    state: &GameState,
    catalog: &Catalog,
    intent: &Intent,
    rng: &mut R,
) -> GameResult<(GameState, ActionReport)> {
    let mut next = state.clone();
    let report = next.apply(catalog, intent, rng)?;
    Ok((next, report))
}

impl GameState {
    /// Dispatch an intent
    pub fn apply<R: ShopRng>(
        &mut self,
        catalog: &Catalog,
        intent: &Intent,
        rng: &mut R,
    ) -> GameResult<ActionReport> {
        log::action(intent.name(), &format!("{intent:?}"));
        let outcome = match *intent {
            Intent::Reroll => self.reroll(catalog, rng),
            Intent::BuyXp => self.buy_xp(catalog, rng),
            Intent::Buy { slot } => self.buy_from_shop(catalog, slot as usize, rng),
            Intent::Sell { at } => self.sell_unit(catalog, at),
            Intent::PlaceFromBench { index } => self.place_from_bench(index as usize),
            Intent::ReturnToBench { index } => self.return_to_bench(index as usize),
            Intent::MoveUnit { from, to } => self.move_unit(from, to),
            Intent::ToggleLock => Ok(self.toggle_lock()),
            Intent::AddGold { amount } => Ok(self.add_gold(amount)),
            Intent::NudgeLevel { delta } => self.nudge_level(delta),
        };
        match &outcome {
            Ok(report) => {
                log::result(true, &format!("{} promotion(s)", report.promotions.len()));
                log::state_summary(
                    self.gold,
                    self.level,
                    self.xp,
                    self.xp_required(),
                    self.bench_unit_count(),
                    self.board_unit_count(),
                    self.spent,
                    self.reroll_count,
                );
            }
            Err(e) => log::result(false, &format!("{e}")),
        }
        outcome
    }

    /// Pay for a fresh shop row
    pub fn reroll<R: ShopRng>(&mut self, catalog: &Catalog, rng: &mut R) -> GameResult<ActionReport> {
        if self.locked {
            return Err(GameError::ShopLocked);
        }
        self.charge(REROLL_COST)?;
        self.reroll_count = self.reroll_count.saturating_add(1);
        self.refresh_shop(catalog, rng);
        Ok(ActionReport {
            shop_refreshed: true,
            ..ActionReport::default()
        })
    }

    /// Pay for XP, levelling up as many times as it covers
    pub fn buy_xp<R: ShopRng>(&mut self, catalog: &Catalog, rng: &mut R) -> GameResult<ActionReport> {
        if self.is_max_level() {
            return Err(GameError::MaxLevel);
        }
        self.charge(XP_COST)?;
        self.xp = self.xp.saturating_add(XP_PER_PURCHASE);
        let levels_gained = self.apply_level_ups();

        let shop_refreshed =
            levels_gained > 0 && self.config.refresh_shop_on_level_up && !self.locked;
        if shop_refreshed {
            self.refresh_shop(catalog, rng);
        }
        Ok(ActionReport {
            levels_gained,
            shop_refreshed,
            ..ActionReport::default()
        })
    }

    /// Convert banked XP into levels. Returns the number of levels gained.
    pub fn apply_level_ups(&mut self) -> u8 {
        let mut gained = 0;
        while !self.is_max_level() && self.xp >= self.xp_required() {
            self.xp -= self.xp_required();
            self.level += 1;
            gained += 1;
        }
        if self.is_max_level() {
            self.xp = 0;
        }
        gained
    }

    /// Buy the offer in a shop slot.
    ///
    /// With room on the bench the copy lands in the first empty slot and a
    /// merge pass runs. With a full bench the purchase must promote
    /// something: first one copy is tried, then a pair together with another
    /// slot offering the same unit.
    pub fn buy_from_shop<R: ShopRng>(
        &mut self,
        catalog: &Catalog,
        index: usize,
        rng: &mut R,
    ) -> GameResult<ActionReport> {
        let offer = self
            .shop
            .get(index)
            .ok_or(GameError::InvalidShopSlot {
                index: index as u32,
            })?
            .as_ref()
            .ok_or(GameError::EmptySlot)?;
        let template = catalog.template(&offer.key)?.clone();
        let cost = template.cost as u32;
        if !self.can_afford(cost) {
            return Err(GameError::NotEnoughGold {
                have: self.gold,
                need: cost,
            });
        }
        if self.pool.remaining(&template.key) == 0 {
            return Err(GameError::PoolExhausted {
                key: template.key.clone(),
            });
        }

        if let Some(bench_slot) = self.find_empty_bench_slot() {
            let mut provenance = self.charge_and_draw(catalog, &template.key, 1, rng)?;
            let removed = provenance.pop().unwrap_or_default();
            self.bench[bench_slot] = self.shop[index].take().map(|u| u.with_removed(removed));
            let promotions = merge_in_place(&mut self.board, &mut self.bench);
            return Ok(ActionReport::promoted(promotions));
        }

        let single = simulate_purchase(&template, &self.board, &self.bench, 1);
        if single.promotes(&template.key) && !single.overflow {
            return self.commit_full_bench(catalog, &template, &[index], rng);
        }

        let partner = (0..self.shop.len()).find(|&i| {
            i != index && self.shop[i].as_ref().is_some_and(|u| u.key == template.key)
        });
        let Some(partner) = partner else {
            return Err(GameError::NoMergePossible);
        };
        let double = simulate_purchase(&template, &self.board, &self.bench, 2);
        if !double.promotes(&template.key) || double.overflow {
            return Err(GameError::NoMergePossible);
        }
        if !self.can_afford(cost * 2) {
            return Err(GameError::NotEnoughGold {
                have: self.gold,
                need: cost * 2,
            });
        }
        if self.pool.remaining(&template.key) < 2 {
            return Err(GameError::PoolExhausted {
                key: template.key.clone(),
            });
        }
        self.commit_full_bench(catalog, &template, &[index, partner], rng)
    }

    /// Commit a full-bench purchase already shown to promote
    fn commit_full_bench<R: ShopRng>(
        &mut self,
        catalog: &Catalog,
        template: &UnitTemplate,
        slots: &[usize],
        rng: &mut R,
    ) -> GameResult<ActionReport> {
        let provenance = self.charge_and_draw(catalog, &template.key, slots.len() as u32, rng)?;
        let copies = slots
            .iter()
            .zip(provenance)
            .filter_map(|(&s, removed)| self.shop[s].take().map(|u| u.with_removed(removed)))
            .collect();
        let sim = simulate_with_copies(&self.board, &self.bench, copies);
        debug_assert!(!sim.overflow);
        self.board = sim.board;
        self.bench = sim.bench;
        Ok(ActionReport::promoted(sim.promotions))
    }

    /// Draw `copies` of `key` from a scratch pool and charge for them. The
    /// pool and gold only change once both steps have succeeded.
    fn charge_and_draw<R: ShopRng>(
        &mut self,
        catalog: &Catalog,
        key: &str,
        copies: u32,
        rng: &mut R,
    ) -> GameResult<Vec<Vec<String>>> {
        let cost = catalog.template(key)?.cost as u32 * copies;
        let excluded = three_star_keys(&self.board, &self.bench);
        let rules = BurnRules {
            overlap: self.config.overlap,
            wanted: &self.config.wanted,
            excluded: &excluded,
        };
        let mut pool = self.pool.clone();
        let provenance = pool.draw_purchase(catalog, key, copies, &rules, rng)?;
        self.charge(cost)?;
        self.pool = pool;
        Ok(provenance)
    }

    /// Sell the unit at a position, returning its pool entries
    pub fn sell_unit(&mut self, catalog: &Catalog, at: SlotRef) -> GameResult<ActionReport> {
        self.check_slot(at)?;
        let unit = self.unit_at(at).ok_or(GameError::EmptySlot)?;
        let value = unit.sell_value();
        let removed = unit.removed_identities.clone();
        self.pool.restore(catalog, &removed)?;
        self.slot_mut(at)?.take();
        self.credit(value);
        Ok(ActionReport {
            sold_for: value,
            ..ActionReport::default()
        })
    }

    /// Move a bench unit to the first empty board slot
    pub fn place_from_bench(&mut self, index: usize) -> GameResult<ActionReport> {
        let to = self
            .find_empty_board_slot()
            .ok_or(GameError::BoardFull)?;
        self.move_unit(SlotRef::bench(index), SlotRef::board(to))
    }

    /// Move a board unit to the first empty bench slot
    pub fn return_to_bench(&mut self, index: usize) -> GameResult<ActionReport> {
        self.check_slot(SlotRef::board(index))?;
        if self.board[index].is_none() {
            return Err(GameError::EmptySlot);
        }
        let to = self.find_empty_bench_slot().ok_or(GameError::BenchFull)?;
        self.move_unit(SlotRef::board(index), SlotRef::bench(to))
    }

    /// Drag a unit onto a slot.
    ///
    /// Onto an occupied slot the two units swap and nothing merges. Into an
    /// empty slot the unit moves and a merge pass runs.
    pub fn move_unit(&mut self, from: SlotRef, to: SlotRef) -> GameResult<ActionReport> {
        self.check_slot(from)?;
        self.check_slot(to)?;
        if self.unit_at(from).is_none() {
            return Err(GameError::EmptySlot);
        }
        if from == to {
            return Ok(ActionReport::default());
        }

        if self.unit_at(to).is_some() {
            let a = self.slot_mut(from)?.take();
            let b = core::mem::replace(self.slot_mut(to)?, a);
            *self.slot_mut(from)? = b;
            return Ok(ActionReport::default());
        }

        let entering_board = to.container == Container::Board && from.container != Container::Board;
        if entering_board && self.board_unit_count() >= self.board_capacity() {
            return Err(GameError::BoardFull);
        }
        let unit = self.slot_mut(from)?.take();
        *self.slot_mut(to)? = unit;
        let promotions = merge_in_place(&mut self.board, &mut self.bench);
        Ok(ActionReport::promoted(promotions))
    }

    /// Flip the shop lock
    pub fn toggle_lock(&mut self) -> ActionReport {
        self.locked = !self.locked;
        ActionReport::default()
    }

    /// Adjust gold, clamped into [0, GOLD_CAP]
    pub fn add_gold(&mut self, amount: i32) -> ActionReport {
        let next = (self.gold as i64 + amount as i64).clamp(0, GOLD_CAP as i64);
        self.gold = next as u32;
        ActionReport::default()
    }

    /// Shift the level directly, resetting XP. Rejected if the board would
    /// hold more units than the new level allows.
    pub fn nudge_level(&mut self, delta: i8) -> GameResult<ActionReport> {
        let next = (self.level as i16 + delta as i16).clamp(MIN_LEVEL as i16, MAX_LEVEL as i16) as u8;
        if next == self.level {
            return Ok(ActionReport::default());
        }
        let occupied = self.board_unit_count();
        if occupied > next as usize {
            return Err(GameError::BoardOverCapacity {
                occupied: occupied as u32,
                capacity: next as u32,
            });
        }
        self.level = next;
        self.xp = 0;
        Ok(ActionReport::default())
    }
}
