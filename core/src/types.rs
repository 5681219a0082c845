use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Unique identity of a unit template, independent of rank
pub type UnitKey = String;

/// Cost tier of a unit (1-5)
pub type CostTier = u8;

/// A possibly empty container or shop slot
pub type Slot = Option<UnitInstance>;

/// Star level of an owned unit.
///
/// Three instances of the same identity at one rank merge into a single
/// instance of the next rank.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, TypeInfo,
    Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum Rank {
    One,
    Two,
    Three,
}

impl Rank {
    /// Pool copies represented by one instance at this rank
    pub fn copy_weight(self) -> u32 {
        match self {
            Rank::One => 1,
            Rank::Two => 3,
            Rank::Three => 9,
        }
    }

    /// The rank a merge at this rank produces, if any
    pub fn next(self) -> Option<Rank> {
        match self {
            Rank::One => Some(Rank::Two),
            Rank::Two => Some(Rank::Three),
            Rank::Three => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Rank::One => 1,
            Rank::Two => 2,
            Rank::Three => 3,
        }
    }
}

impl Default for Rank {
    fn default() -> Self {
        Rank::One
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> u8 {
        rank.as_u8()
    }
}

impl TryFrom<u8> for Rank {
    type Error = InvalidRank;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Rank::One),
            2 => Ok(Rank::Two),
            3 => Ok(Rank::Three),
            other => Err(InvalidRank(other)),
        }
    }
}

/// A star level outside 1..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRank(pub u8);

impl fmt::Display for InvalidRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rank {} is outside 1..=3", self.0)
    }
}

/// Immutable catalog entry for a unit
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
pub struct UnitTemplate {
    pub key: UnitKey,
    pub name: String,
    pub traits: Vec<String>,
    pub cost: CostTier,
}

/// An owned (or offered) copy of a unit.
///
/// Instances are plain values: moving one between containers moves the
/// whole record, including the pool entries burned to create it.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitInstance {
    pub key: UnitKey,
    pub name: String,
    #[serde(default)]
    pub traits: Vec<String>,
    pub cost: CostTier,
    #[serde(default, alias = "star")]
    pub rank: Rank,
    /// Pool entries consumed to create this instance (restored on sale)
    #[serde(default, alias = "removedUnits")]
    pub removed_identities: Vec<UnitKey>,
}

impl UnitInstance {
    /// A fresh rank-1 copy with no pool debt
    pub fn from_template(template: &UnitTemplate) -> Self {
        Self {
            key: template.key.clone(),
            name: template.name.clone(),
            traits: template.traits.clone(),
            cost: template.cost,
            rank: Rank::One,
            removed_identities: Vec::new(),
        }
    }

    pub fn with_rank(mut self, rank: Rank) -> Self {
        self.rank = rank;
        self
    }

    pub fn with_removed(mut self, removed: Vec<UnitKey>) -> Self {
        self.removed_identities = removed;
        self
    }

    /// Pool copies this instance represents
    pub fn copy_weight(&self) -> u32 {
        self.rank.copy_weight()
    }

    /// Gold returned when this instance is sold.
    ///
    /// Cost-1 units return 1/3/9, everything else returns `cost * weight - 1`.
    pub fn sell_value(&self) -> u32 {
        let weight = self.copy_weight();
        if self.cost <= 1 {
            weight
        } else {
            (self.cost as u32 * weight).saturating_sub(1)
        }
    }
}

/// Free-function form of [`UnitInstance::sell_value`]
pub fn sell_value(unit: &UnitInstance) -> u32 {
    unit.sell_value()
}

/// The two owned containers
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, TypeInfo,
    Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Container {
    Board,
    Bench,
}

/// Position of a slot inside one of the containers
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, TypeInfo,
    Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct SlotRef {
    pub container: Container,
    pub index: u32,
}

impl SlotRef {
    pub fn board(index: usize) -> Self {
        Self {
            container: Container::Board,
            index: index as u32,
        }
    }

    pub fn bench(index: usize) -> Self {
        Self {
            container: Container::Bench,
            index: index as u32,
        }
    }

    pub fn idx(&self) -> usize {
        self.index as usize
    }
}

/// A unit that was promoted by a merge
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub key: UnitKey,
    pub rank: Rank,
    pub slot: SlotRef,
}
