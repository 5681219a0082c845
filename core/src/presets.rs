//! Named target decks

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::cards::deck_presets;
use crate::config::{OverlapMode, SessionConfig};
use crate::types::{Rank, UnitKey};

/// A deck players practise rolling for
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckPreset {
    pub name: String,
    pub members: Vec<UnitKey>,
    /// Rank every member must reach unless listed in `three_stars`
    pub target_rank: Rank,
    pub three_stars: Vec<UnitKey>,
}

impl DeckPreset {
    /// Per-member target ranks
    pub fn targets(&self) -> BTreeMap<UnitKey, Rank> {
        self.members
            .iter()
            .map(|key| {
                let rank = if self.three_stars.contains(key) {
                    Rank::Three
                } else {
                    self.target_rank
                };
                (key.clone(), rank)
            })
            .collect()
    }

    pub fn to_config(&self, overlap: OverlapMode) -> SessionConfig {
        SessionConfig {
            overlap,
            wanted: self.members.iter().cloned().collect(),
            targets: self.targets(),
            deck_name: self.name.clone(),
            ..SessionConfig::default()
        }
        .normalized()
    }
}

/// Look up a built-in preset by name (case-insensitive)
pub fn find_preset(name: &str) -> Option<DeckPreset> {
    deck_presets()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}
