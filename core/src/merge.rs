//! Merge resolution
//!
//! Three instances of one unit at one rank become a single instance of the
//! next rank. Rank 1 is fully resolved before rank 2, so a fresh rank-2 can
//! merge again in the same pass.
//!
//! Tie-break: the survivor is the lowest-index board slot holding the unit,
//! falling back to the lowest-index bench slot. The two casualties come from
//! the bench first, then the board, lowest index first.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::types::{Container, Promotion, Rank, Slot, SlotRef, UnitInstance, UnitKey, UnitTemplate};

/// Board and bench after merges were resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub board: Vec<Slot>,
    pub bench: Vec<Slot>,
    pub promotions: Vec<Promotion>,
}

/// Result of a what-if purchase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation {
    pub board: Vec<Slot>,
    /// Re-packed to the bench's real capacity unless `overflow` is set
    pub bench: Vec<Slot>,
    pub promotions: Vec<Promotion>,
    /// More units remain than the bench can hold
    pub overflow: bool,
}

impl Simulation {
    /// Whether any instance of `key` was promoted
    pub fn promotes(&self, key: &str) -> bool {
        self.promotions.iter().any(|p| p.key == key)
    }
}

/// Instance counts of one unit per rank
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Encode, Decode, TypeInfo, Serialize, Deserialize,
)]
pub struct RankCounts {
    pub one: u32,
    pub two: u32,
    pub three: u32,
}

impl RankCounts {
    pub fn at(&self, rank: Rank) -> u32 {
        match rank {
            Rank::One => self.one,
            Rank::Two => self.two,
            Rank::Three => self.three,
        }
    }
}

/// Resolve every outstanding triplet. Inputs are left untouched.
pub fn resolve_merges(board: &[Slot], bench: &[Slot]) -> MergeOutcome {
    let mut board = board.to_vec();
    let mut bench = bench.to_vec();
    let promotions = merge_in_place(&mut board, &mut bench);
    MergeOutcome {
        board,
        bench,
        promotions,
    }
}

/// In-place form of [`resolve_merges`]
pub fn merge_in_place(board: &mut [Slot], bench: &mut [Slot]) -> Vec<Promotion> {
    let mut promotions = Vec::new();
    for rank in [Rank::One, Rank::Two] {
        let keys: BTreeSet<UnitKey> = board
            .iter()
            .chain(bench.iter())
            .flatten()
            .filter(|u| u.rank == rank)
            .map(|u| u.key.clone())
            .collect();
        for key in keys {
            while let Some(promotion) = merge_once(board, bench, &key, rank) {
                promotions.push(promotion);
            }
        }
    }
    promotions
}

fn positions(slots: &[Slot], key: &str, rank: Rank) -> Vec<usize> {
    slots
        .iter()
        .enumerate()
        .filter_map(|(i, s)| s.as_ref().map(|u| (i, u)))
        .filter(|(_, u)| u.key == key && u.rank == rank)
        .map(|(i, _)| i)
        .collect()
}

fn slot_mut<'a>(board: &'a mut [Slot], bench: &'a mut [Slot], at: SlotRef) -> &'a mut Slot {
    match at.container {
        Container::Board => &mut board[at.idx()],
        Container::Bench => &mut bench[at.idx()],
    }
}

fn merge_once(board: &mut [Slot], bench: &mut [Slot], key: &str, rank: Rank) -> Option<Promotion> {
    let next = rank.next()?;
    let on_board = positions(board, key, rank);
    let on_bench = positions(bench, key, rank);
    if on_board.len() + on_bench.len() < 3 {
        return None;
    }

    let target = on_board
        .first()
        .map(|&i| SlotRef::board(i))
        .or_else(|| on_bench.first().map(|&i| SlotRef::bench(i)))?;
    let casualties: Vec<SlotRef> = on_bench
        .iter()
        .map(|&i| SlotRef::bench(i))
        .chain(on_board.iter().map(|&i| SlotRef::board(i)))
        .filter(|&s| s != target)
        .take(2)
        .collect();

    let mut debt = Vec::new();
    for at in casualties {
        if let Some(unit) = slot_mut(board, bench, at).take() {
            debt.extend(unit.removed_identities);
        }
    }
    let survivor = slot_mut(board, bench, target).as_mut()?;
    survivor.rank = next;
    survivor.removed_identities.extend(debt);

    Some(Promotion {
        key: key.into(),
        rank: next,
        slot: target,
    })
}

/// What-if: buy `copies` fresh rank-1 copies of `template` and merge
pub fn simulate_purchase(
    template: &UnitTemplate,
    board: &[Slot],
    bench: &[Slot],
    copies: u32,
) -> Simulation {
    let fresh = (0..copies)
        .map(|_| UnitInstance::from_template(template))
        .collect();
    simulate_with_copies(board, bench, fresh)
}

/// Place the given instances on the bench, spilling into virtual slots past
/// its end when it is full, merge, then re-pack the bench.
pub fn simulate_with_copies(board: &[Slot], bench: &[Slot], copies: Vec<UnitInstance>) -> Simulation {
    let capacity = bench.len();
    let mut board = board.to_vec();
    let mut bench = bench.to_vec();
    for copy in copies {
        match bench.iter().position(Option::is_none) {
            Some(i) => bench[i] = Some(copy),
            None => bench.push(Some(copy)),
        }
    }

    let promotions = merge_in_place(&mut board, &mut bench);

    let mut packed: Vec<Slot> = bench.into_iter().filter(Option::is_some).collect();
    let overflow = packed.len() > capacity;
    if !overflow {
        packed.resize(capacity, None);
    }
    Simulation {
        board,
        bench: packed,
        promotions,
        overflow,
    }
}

/// Counts of `key` per rank across both containers
pub fn count_by_rank(key: &str, board: &[Slot], bench: &[Slot]) -> RankCounts {
    let mut counts = RankCounts::default();
    for unit in board.iter().chain(bench.iter()).flatten() {
        if unit.key == key {
            match unit.rank {
                Rank::One => counts.one += 1,
                Rank::Two => counts.two += 1,
                Rank::Three => counts.three += 1,
            }
        }
    }
    counts
}

/// Highest rank held of `key`, if any copy is held
pub fn max_rank(key: &str, board: &[Slot], bench: &[Slot]) -> Option<Rank> {
    board
        .iter()
        .chain(bench.iter())
        .flatten()
        .filter(|u| u.key == key)
        .map(|u| u.rank)
        .max()
}

/// Units already held at rank 3
pub fn three_star_keys(board: &[Slot], bench: &[Slot]) -> BTreeSet<UnitKey> {
    board
        .iter()
        .chain(bench.iter())
        .flatten()
        .filter(|u| u.rank == Rank::Three)
        .map(|u| u.key.clone())
        .collect()
}
