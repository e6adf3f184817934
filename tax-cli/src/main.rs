use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

mod commands;
mod format;
mod logging;

use commands::batch::BatchCommand;
use commands::catalog::StrategiesCommand;
use commands::compare::CompareCommand;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Federal tax planner: compares a client's baseline against a scenario with
/// deduction strategies and an optional S-Corp election.
#[derive(Debug, Parser)]
#[command(name = "tax-planner", version, about)]
struct Cli {
    /// TOML tax-year tables; defaults to the built-in 2024 tables
    #[arg(long, global = true)]
    tables: Option<PathBuf>,

    /// Log level or filter directive (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare baseline and scenario for one client
    Compare(CompareCommand),
    /// Plan every client in a CSV file
    Batch(BatchCommand),
    /// List the strategy catalog
    Strategies(StrategiesCommand),
    /// List state tax presets
    States,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref())?;
    debug!(?cli, "starting");

    match &cli.command {
        Command::Compare(cmd) => {
            let tables = commands::load_tables(cli.tables.as_deref())?;
            cmd.exec(&tables, cli.json)
        }
        Command::Batch(cmd) => {
            let tables = commands::load_tables(cli.tables.as_deref())?;
            cmd.exec(&tables, cli.json)
        }
        Command::Strategies(cmd) => cmd.exec(cli.json),
        Command::States => commands::catalog::list_states(cli.json),
    }
}
