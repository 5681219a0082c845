//! Error types for economy operations
//!
//! Every rejected intent maps to one variant. The state is never modified
//! when an operation returns an error.

use alloc::string::String;
use core::fmt;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

/// Reasons an intent can be rejected
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(tag = "type", rename_all = "camelCase"))]
pub enum GameError {
    /// Not enough gold to perform action
    NotEnoughGold { have: u32, need: u32 },
    /// Shop is locked, rerolling is disabled
    ShopLocked,
    /// Already at the maximum level
    MaxLevel,
    /// Invalid shop slot index
    InvalidShopSlot { index: u32 },
    /// Invalid board slot index
    InvalidBoardSlot { index: u32 },
    /// Invalid bench slot index
    InvalidBenchSlot { index: u32 },
    /// Attempted to interact with an empty slot
    EmptySlot,
    /// Board already holds as many units as the level allows
    BoardFull,
    /// Bench has no empty slot
    BenchFull,
    /// Bench is full and buying would not promote anything
    NoMergePossible,
    /// No drawable copies of this unit remain in the pool
    PoolExhausted { key: String },
    /// Pool would go negative (provenance bookkeeping bug)
    PoolUnderflow { key: String },
    /// Pool would exceed its allocation (double restore)
    PoolOverflow { key: String },
    /// Unit key not present in the catalog
    UnknownUnit { key: String },
    /// Level change would leave more units on the board than allowed
    BoardOverCapacity { occupied: u32, capacity: u32 },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NotEnoughGold { have, need } => {
                write!(f, "not enough gold: have {have}, need {need}")
            }
            GameError::ShopLocked => write!(f, "shop is locked"),
            GameError::MaxLevel => write!(f, "already at max level"),
            GameError::InvalidShopSlot { index } => write!(f, "invalid shop slot {index}"),
            GameError::InvalidBoardSlot { index } => write!(f, "invalid board slot {index}"),
            GameError::InvalidBenchSlot { index } => write!(f, "invalid bench slot {index}"),
            GameError::EmptySlot => write!(f, "slot is empty"),
            GameError::BoardFull => write!(f, "board is full"),
            GameError::BenchFull => write!(f, "bench is full"),
            GameError::NoMergePossible => write!(f, "bench is full and purchase would not merge"),
            GameError::PoolExhausted { key } => write!(f, "no copies of {key} left in pool"),
            GameError::PoolUnderflow { key } => write!(f, "pool underflow for {key}"),
            GameError::PoolOverflow { key } => write!(f, "pool overflow for {key}"),
            GameError::UnknownUnit { key } => write!(f, "unknown unit {key}"),
            GameError::BoardOverCapacity { occupied, capacity } => {
                write!(f, "board holds {occupied} units but capacity is {capacity}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
