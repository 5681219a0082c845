//! rerollbar-sim - play scripted reroll sessions against the economy engine.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;
mod logger;
mod policy;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Rerollbar simulator - seeded shop/merge economy runs
#[derive(Parser, Debug)]
#[command(name = "rerollbar-sim")]
#[command(version, about, long_about = None)]
struct Args {
    /// Log engine actions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a single seeded session
    Run {
        #[command(flatten)]
        session: cli::SessionArgs,

        /// Random seed (default: current time)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format: text or json
        #[arg(short, long, value_enum, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Play many sessions in parallel and aggregate statistics
    Batch {
        #[command(flatten)]
        session: cli::SessionArgs,

        /// Number of runs (default: 1000)
        #[arg(short = 'n', long, default_value = "1000")]
        runs: u64,

        /// Starting seed (increments for each run)
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text or json
        #[arg(short, long, value_enum, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// List the built-in deck presets
    Presets {
        /// Output format: text or json
        #[arg(short, long, value_enum, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logger::init(args.verbose) {
        eprintln!("Warning: logger not installed: {e}");
    }

    let result = match args.command {
        Commands::Run {
            session,
            seed,
            format,
        } => cli::run::execute(session, seed, format),

        Commands::Batch {
            session,
            runs,
            seed,
            threads,
            format,
        } => cli::batch::execute(session, runs, seed, threads, format),

        Commands::Presets { format } => cli::presets::execute(format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
