//! Command implementations

pub(crate) mod batch;
pub(crate) mod presets;
pub(crate) mod run;

use std::error::Error;
use std::fmt;

use clap::ValueEnum;
use rerollbar_core::presets::find_preset;
use rerollbar_core::{Catalog, EconomyMode, OverlapMode, SessionConfig};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Gold accounting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ModeArg {
    /// Gold balance must cover every cost.
    Standard,
    /// Unlimited gold, spend is tracked.
    TimeAttack,
}

impl From<ModeArg> for EconomyMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Standard => EconomyMode::Standard,
            ModeArg::TimeAttack => EconomyMode::TimeAttack,
        }
    }
}

/// Contested pool simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OverlapArg {
    /// Purchases only take their own copy.
    None,
    /// Another player contests the wanted units.
    With,
}

impl From<OverlapArg> for OverlapMode {
    fn from(overlap: OverlapArg) -> Self {
        match overlap {
            OverlapArg::None => OverlapMode::None,
            OverlapArg::With => OverlapMode::With,
        }
    }
}

/// Session options shared by `run` and `batch`.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SessionArgs {
    /// Deck preset name (see `presets`)
    #[arg(short, long, conflicts_with = "wanted")]
    pub deck: Option<String>,

    /// Comma-separated unit keys to chase at 2 stars
    #[arg(short, long, value_delimiter = ',')]
    pub wanted: Vec<String>,

    /// Gold accounting
    #[arg(short, long, value_enum, default_value = "time-attack")]
    pub mode: ModeArg,

    /// Contested pool simulation
    #[arg(short, long, value_enum, default_value = "none")]
    pub overlap: OverlapArg,

    /// Buy XP until this level (default: 7)
    #[arg(long, default_value = "7")]
    pub level_to: u8,

    /// Maximum actions per run (default: 5000)
    #[arg(long, default_value = "5000")]
    pub max_actions: u32,

    /// Regenerate the shop on level up
    #[arg(long)]
    pub refresh_on_level: bool,
}

impl SessionArgs {
    /// Build the session config, validating unit keys against the catalog.
    pub(crate) fn config(&self, catalog: &Catalog) -> Result<SessionConfig, CliError> {
        let config = match &self.deck {
            Some(name) => find_preset(name)
                .ok_or_else(|| CliError::new(format!("Unknown deck preset: {name}")))?
                .to_config(self.overlap.into()),
            None if self.wanted.is_empty() => {
                return Err(CliError::new("Pass --deck or --wanted"));
            }
            None => {
                if let Some(unknown) = self.wanted.iter().find(|k| !catalog.contains(k)) {
                    return Err(CliError::new(format!("Unknown unit: {unknown}")));
                }
                SessionConfig::chasing(self.wanted.iter().cloned()).with_overlap(self.overlap.into())
            }
        };
        Ok(SessionConfig {
            refresh_shop_on_level_up: self.refresh_on_level,
            ..config.with_mode(self.mode.into())
        })
    }

    pub(crate) fn policy(&self) -> crate::policy::GreedyPolicy {
        crate::policy::GreedyPolicy {
            level_to: self.level_to,
            max_actions: self.max_actions,
        }
    }
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<rerollbar_core::GameError> for CliError {
    fn from(e: rerollbar_core::GameError) -> Self {
        Self::new(e.to_string())
    }
}
