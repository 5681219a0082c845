//! Session configuration
//!
//! Every optional field gets its default at construction time. After
//! [`SessionConfig::normalized`] nothing downstream reads an absent value.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::catalog::{MAX_LEVEL, MIN_LEVEL};
use crate::types::{Rank, UnitKey};

/// Deck label used when no preset was chosen
pub const CUSTOM_DECK_NAME: &str = "(custom)";

/// Level a fresh session starts at
pub const STARTING_LEVEL: u8 = 3;

/// Gold a fresh standard session starts with
pub const STARTING_GOLD: u32 = 100;

/// How gold is accounted
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Encode, Decode, TypeInfo, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum EconomyMode {
    /// Gold balance is charged and must cover every cost
    #[default]
    Standard,
    /// Unlimited gold, only spend is tracked
    TimeAttack,
}

/// Whether purchases of wanted units simulate a contesting player
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Encode, Decode, TypeInfo, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OverlapMode {
    /// Purchases only consume their own copies
    #[default]
    None,
    /// Each wanted purchase also burns a second copy and same-cost side copies
    With,
}

impl OverlapMode {
    pub fn as_str(self) -> &'static str {
        match self {
            OverlapMode::None => "none",
            OverlapMode::With => "with",
        }
    }
}

/// Parameters of one practice session
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    pub mode: EconomyMode,
    pub overlap: OverlapMode,
    /// Units the player is chasing
    pub wanted: BTreeSet<UnitKey>,
    /// Unit -> rank that completes the run
    pub targets: BTreeMap<UnitKey, Rank>,
    pub deck_name: String,
    pub starting_level: u8,
    pub starting_gold: u32,
    /// Regenerate an unlocked shop for free when the player levels up
    pub refresh_shop_on_level_up: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: EconomyMode::Standard,
            overlap: OverlapMode::None,
            wanted: BTreeSet::new(),
            targets: BTreeMap::new(),
            deck_name: String::from(CUSTOM_DECK_NAME),
            starting_level: STARTING_LEVEL,
            starting_gold: STARTING_GOLD,
            refresh_shop_on_level_up: false,
        }
    }
}

impl SessionConfig {
    /// A standard session chasing the given units at rank 2
    pub fn chasing<I, K>(wanted: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<UnitKey>,
    {
        Self {
            wanted: wanted.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
        .normalized()
    }

    pub fn with_mode(mut self, mode: EconomyMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_overlap(mut self, overlap: OverlapMode) -> Self {
        self.overlap = overlap;
        self
    }

    /// Apply defaults that depend on other fields.
    ///
    /// Empty targets become every wanted unit at rank 2, an empty deck name
    /// becomes the custom label and the starting level is clamped.
    pub fn normalized(mut self) -> Self {
        if self.targets.is_empty() {
            self.targets = self.wanted.iter().map(|k| (k.clone(), Rank::Two)).collect();
        }
        if self.deck_name.is_empty() {
            self.deck_name = String::from(CUSTOM_DECK_NAME);
        }
        self.starting_level = self.starting_level.clamp(MIN_LEVEL, MAX_LEVEL);
        self
    }

    pub fn is_wanted(&self, key: &str) -> bool {
        self.wanted.contains(key)
    }

    pub fn is_time_attack(&self) -> bool {
        self.mode == EconomyMode::TimeAttack
    }
}
