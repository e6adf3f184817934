use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tax_data::{TaxBracketLoader, TaxTablesFile};

/// Validate tax-year tables before handing them to the planner.
///
/// Pass either a TOML tables file, or a bracket CSV together with the year
/// it is expected to hold. The CSV file should have the following columns:
/// - tax_year: The tax year (e.g., 2024)
/// - schedule: The IRS schedule code (X, Y-1, Z)
/// - threshold: Lower bound of taxable income for the bracket
/// - rate: The marginal tax rate as a decimal (e.g., 0.10)
#[derive(Parser, Debug)]
#[command(name = "tax-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a TOML tables file or a bracket CSV
    #[arg(short, long)]
    file: PathBuf,

    /// Tax year the bracket CSV must contain (CSV input only)
    #[arg(short, long, default_value_t = 2024)]
    year: i32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let is_csv = args
        .file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        println!("Checking tax brackets in: {}", args.file.display());

        let file = File::open(&args.file)
            .with_context(|| format!("Failed to open: {}", args.file.display()))?;
        let records = TaxBracketLoader::parse(file)
            .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;
        println!("Parsed {} records from CSV", records.len());

        let schedules = TaxBracketLoader::schedules(args.year, &records)
            .with_context(|| format!("Invalid brackets for tax year {}", args.year))?;
        for (status, schedule) in &schedules {
            println!("  {:<26} {} brackets", status.label(), schedule.len());
        }
    } else {
        println!("Checking tax tables in: {}", args.file.display());

        let tables = TaxTablesFile::load(&args.file)
            .with_context(|| format!("Failed to load tables: {}", args.file.display()))?;

        println!("Tax year {}", tables.tax_year());
        for status in tables.statuses() {
            println!(
                "  {:<26} {} brackets, standard deduction {}",
                status.label(),
                tables.brackets(status)?.len(),
                tables.standard_deduction(status)?
            );
        }
    }

    println!("Tables are valid.");

    Ok(())
}
