//! Run command implementation.

use chrono::Utc;
use rerollbar_core::{Catalog, RunResult, Session, XorShiftRng};
use serde::Serialize;

use super::{CliError, OutputFormat, SessionArgs};
use crate::policy::Outcome;

/// One finished scripted run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RunSummary {
    pub seed: u64,
    pub completed: bool,
    pub actions: u32,
    pub rejected: u32,
    pub level: u8,
    pub result: RunResult,
}

/// Play one seeded session to completion (or until the policy gives up).
///
/// Simulated time is one second per action.
pub(crate) fn play_one(
    catalog: &Catalog,
    args: &SessionArgs,
    seed: u64,
) -> Result<RunSummary, CliError> {
    let config = args.config(catalog)?;
    let mut session = Session::new(catalog.clone(), config, XorShiftRng::seed_from_u64(seed));
    let Outcome {
        completed,
        actions,
        rejected,
    } = args.policy().play(&mut session);

    Ok(RunSummary {
        seed,
        completed,
        actions,
        rejected,
        level: session.state().level,
        result: session.result(actions, Utc::now().to_rfc3339()),
    })
}

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the session options are invalid.
pub(crate) fn execute(args: SessionArgs, seed: Option<u64>, format: OutputFormat) -> Result<(), CliError> {
    let catalog = Catalog::standard();
    let seed = seed.unwrap_or_else(|| Utc::now().timestamp_millis() as u64);
    let summary = play_one(&catalog, &args, seed)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => {
            println!("Deck:      {}", summary.result.deck);
            println!("Seed:      {}", summary.seed);
            println!(
                "Outcome:   {}",
                if summary.completed { "targets reached" } else { "gave up" }
            );
            println!("Actions:   {} ({} rejected)", summary.actions, summary.rejected);
            println!("Level:     {}", summary.level);
            println!("Spent:     {}", summary.result.spent);
            println!("Rerolls:   {}", summary.result.reroll_count);
            println!("Overlap:   {}", summary.result.overlap_mode.as_str());
        }
    }
    Ok(())
}
