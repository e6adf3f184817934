pub mod batch;
pub mod catalog;
pub mod compare;

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tabled::Table;
use tabled::settings::object::{Columns, Rows};
use tabled::settings::{Alignment, Modify, Style};
use tax_core::TaxTables;
use tax_data::TaxTablesFile;
use tracing::debug;

/// Loads the tables at `path`, or the built-in 2024 tables.
pub fn load_tables(path: Option<&Path>) -> Result<TaxTables> {
    match path {
        Some(path) => TaxTablesFile::load(path)
            .with_context(|| format!("Failed to load tax tables: {}", path.display())),
        None => {
            debug!("using built-in 2024 tables");
            Ok(TaxTables::tax_year_2024())
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize report")?
    );
    Ok(())
}

/// Rounded table with every column after the first right-aligned.
fn money_table(table: &mut Table) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string()
}
