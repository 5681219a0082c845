//! Batch command implementation.

use rayon::prelude::*;
use rerollbar_core::leaderboard::{percentile, InMemoryLeaderboard, Leaderboard};
use rerollbar_core::Catalog;
use serde::Serialize;
use std::time::Instant;

use super::run::{play_one, RunSummary};
use super::{CliError, OutputFormat, SessionArgs};

/// Aggregate statistics over a batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BatchStats {
    pub deck: String,
    pub runs: u64,
    pub completed: u64,
    pub mean_spent: f64,
    pub median_spent: u32,
    pub p90_spent: u32,
    pub mean_rerolls: f64,
    pub mean_actions: f64,
    /// Share of completed runs slower than the median completed run
    pub median_percentile: u32,
    pub elapsed_ms: u128,
}

fn nth_sorted(sorted: &[u32], pct: usize) -> u32 {
    if sorted.is_empty() {
        return 0;
    }
    let idx = (sorted.len() - 1) * pct / 100;
    sorted[idx]
}

fn mean(values: impl Iterator<Item = u32>, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    values.map(f64::from).sum::<f64>() / n as f64
}

pub(crate) fn summarize(runs: &[RunSummary], elapsed_ms: u128) -> BatchStats {
    let done: Vec<&RunSummary> = runs.iter().filter(|r| r.completed).collect();
    let mut spent: Vec<u32> = done.iter().map(|r| r.result.spent).collect();
    spent.sort_unstable();

    let mut board = InMemoryLeaderboard::new();
    for run in &done {
        board.submit_result(run.result.clone()).ok();
    }
    let mut times: Vec<u32> = done.iter().map(|r| r.result.time_sec).collect();
    times.sort_unstable();
    let entries = board.fetch_all_results().unwrap_or_default();

    BatchStats {
        deck: runs.first().map(|r| r.result.deck.clone()).unwrap_or_default(),
        runs: runs.len() as u64,
        completed: done.len() as u64,
        mean_spent: mean(spent.iter().copied(), spent.len()),
        median_spent: nth_sorted(&spent, 50),
        p90_spent: nth_sorted(&spent, 90),
        mean_rerolls: mean(done.iter().map(|r| r.result.reroll_count), done.len()),
        mean_actions: mean(runs.iter().map(|r| r.actions), runs.len()),
        median_percentile: percentile(&entries, nth_sorted(&times, 50)),
        elapsed_ms,
    }
}

/// Execute the batch command.
///
/// # Errors
///
/// Returns an error if the session options are invalid.
pub(crate) fn execute(
    args: SessionArgs,
    runs: u64,
    seed: u64,
    threads: Option<usize>,
    format: OutputFormat,
) -> Result<(), CliError> {
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let catalog = Catalog::standard();
    // Fail fast on bad options before fanning out.
    args.config(&catalog)?;

    let start = Instant::now();
    let results: Vec<RunSummary> = (seed..seed + runs)
        .into_par_iter()
        .map(|s| play_one(&catalog, &args, s))
        .collect::<Result<_, _>>()?;
    let stats = summarize(&results, start.elapsed().as_millis());

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => {
            println!("Deck:            {}", stats.deck);
            println!("Runs:            {} ({} completed)", stats.runs, stats.completed);
            println!("Spent mean:      {:.1}", stats.mean_spent);
            println!("Spent median:    {}", stats.median_spent);
            println!("Spent p90:       {}", stats.p90_spent);
            println!("Rerolls mean:    {:.1}", stats.mean_rerolls);
            println!("Actions mean:    {:.1}", stats.mean_actions);
            println!("Elapsed:         {} ms", stats.elapsed_ms);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ModeArg, OverlapArg};

    fn args() -> SessionArgs {
        SessionArgs {
            deck: None,
            wanted: vec!["Garen".into()],
            mode: ModeArg::TimeAttack,
            overlap: OverlapArg::None,
            level_to: 4,
            max_actions: 2_000,
            refresh_on_level: false,
        }
    }

    #[test]
    fn test_nth_sorted_picks_rank() {
        let values = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        assert_eq!(nth_sorted(&values, 50), 5);
        assert_eq!(nth_sorted(&values, 90), 9);
        assert_eq!(nth_sorted(&[], 90), 0);
    }

    #[test]
    fn test_summarize_counts_completed_runs() {
        let catalog = Catalog::standard();
        let runs: Vec<RunSummary> = (0..8)
            .map(|seed| play_one(&catalog, &args(), seed).expect("valid args"))
            .collect();
        let stats = summarize(&runs, 0);

        assert_eq!(stats.deck, "(custom)");
        assert_eq!(stats.runs, 8);
        assert_eq!(stats.completed, 8);
        assert!(stats.median_spent <= stats.p90_spent);
        assert!(stats.median_percentile <= 100);
    }

    #[test]
    fn test_unknown_unit_is_rejected() {
        let bad = SessionArgs {
            wanted: vec!["Nobody".into()],
            ..args()
        };
        let err = bad.config(&Catalog::standard()).expect_err("unknown unit");
        assert!(err.to_string().contains("Nobody"));
    }
}
