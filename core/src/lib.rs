#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod cards;
pub mod catalog;
pub mod config;
pub mod economy;
pub mod engine;
pub mod error;
pub mod leaderboard;
pub mod log;
pub mod merge;
pub mod pool;
pub mod presets;
pub mod rng;
pub mod session;
pub mod shop;
pub mod state;
pub mod types;
pub mod view;

#[cfg(test)]
mod tests;

pub use catalog::Catalog;
pub use config::{EconomyMode, OverlapMode, SessionConfig};
pub use economy::{reduce, ActionReport, Intent};
pub use engine::{Session, TargetProgress};
pub use error::{GameError, GameResult};
pub use leaderboard::{InMemoryLeaderboard, Leaderboard, LeaderboardEntry};
pub use merge::{resolve_merges, simulate_purchase, MergeOutcome, Simulation};
pub use pool::Pool;
pub use presets::DeckPreset;
pub use rng::{ShopRng, XorShiftRng};
pub use session::{MemoryStore, RunResult, SavedSession, SessionStore};
pub use shop::generate_shop;
pub use state::*;
pub use types::*;
pub use view::GameView;
