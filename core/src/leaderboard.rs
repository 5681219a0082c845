//! Leaderboard seam and run statistics

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::convert::Infallible;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::config::OverlapMode;
use crate::session::RunResult;

/// Most entries returned by a fetch
pub const FETCH_LIMIT: usize = 100;

/// A stored result
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: u64,
    /// Submission order, larger is newer
    pub submitted: u64,
    #[serde(flatten)]
    pub result: RunResult,
}

/// Result storage
pub trait Leaderboard {
    type Error;

    /// Store a result and return its id
    fn submit_result(&mut self, result: RunResult) -> Result<u64, Self::Error>;

    /// The newest results, newest first, at most [`FETCH_LIMIT`]
    fn fetch_all_results(&self) -> Result<Vec<LeaderboardEntry>, Self::Error>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryLeaderboard {
    entries: Vec<LeaderboardEntry>,
    next_id: u64,
}

impl InMemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Leaderboard for InMemoryLeaderboard {
    type Error = Infallible;

    fn submit_result(&mut self, result: RunResult) -> Result<u64, Self::Error> {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(LeaderboardEntry {
            id,
            submitted: id,
            result,
        });
        Ok(id)
    }

    fn fetch_all_results(&self) -> Result<Vec<LeaderboardEntry>, Self::Error> {
        let mut newest: Vec<LeaderboardEntry> = self.entries.clone();
        newest.sort_by(|a, b| b.submitted.cmp(&a.submitted));
        newest.truncate(FETCH_LIMIT);
        Ok(newest)
    }
}

/// Share of runs (in percent, rounded down) strictly slower than `time_sec`
pub fn percentile(entries: &[LeaderboardEntry], time_sec: u32) -> u32 {
    if entries.is_empty() {
        return 100;
    }
    let slower = entries
        .iter()
        .filter(|e| e.result.time_sec > time_sec)
        .count();
    (slower * 100 / entries.len()) as u32
}

/// Entries grouped by deck, each group fastest first
pub fn group_by_deck(entries: &[LeaderboardEntry]) -> BTreeMap<String, Vec<LeaderboardEntry>> {
    let mut groups: BTreeMap<String, Vec<LeaderboardEntry>> = BTreeMap::new();
    for entry in entries {
        groups
            .entry(entry.result.deck.clone())
            .or_default()
            .push(entry.clone());
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| {
            a.result
                .time_sec
                .cmp(&b.result.time_sec)
                .then(b.submitted.cmp(&a.submitted))
        });
    }
    groups
}

/// Entries played with the given overlap mode; `None` keeps all
pub fn filter_by_overlap(
    entries: &[LeaderboardEntry],
    overlap: Option<OverlapMode>,
) -> Vec<LeaderboardEntry> {
    entries
        .iter()
        .filter(|e| overlap.map_or(true, |mode| e.result.overlap_mode == mode))
        .cloned()
        .collect()
}
