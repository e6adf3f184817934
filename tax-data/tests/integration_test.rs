//! Integration tests loading on-disk tables and client batches and running
//! them through the engine.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_core::{FilingStatus, TaxEngine, TaxTables};
use tax_data::{
    ClientLoadError, TaxBracketLoaderError, TaxTablesFile, TaxTablesLoadError, clients,
};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

// =============================================================================
// tables
// =============================================================================

#[test]
fn test_inline_toml_matches_built_in_2024() {
    let tables = TaxTablesFile::load(&fixture("tables_2024.toml")).expect("Failed to load tables");

    assert_eq!(tables, TaxTables::tax_year_2024());
}

#[test]
fn test_csv_backed_toml_matches_built_in_2024() {
    let tables =
        TaxTablesFile::load(&fixture("tables_2024_csv.toml")).expect("Failed to load tables");

    assert_eq!(tables, TaxTables::tax_year_2024());
}

#[test]
fn test_csv_for_wrong_year_is_rejected() {
    let err = TaxTablesFile::load(&fixture("tables_2025_mismatch.toml")).unwrap_err();

    assert!(
        matches!(
            err,
            TaxTablesLoadError::Brackets(TaxBracketLoaderError::TaxYearMismatch {
                expected: 2025,
                found: 2024
            })
        ),
        "unexpected error: {err:?}"
    );
}

#[test]
fn test_missing_tables_file_reports_path() {
    let path = fixture("no_such_tables.toml");

    let err = TaxTablesFile::load(&path).unwrap_err();

    assert!(err.to_string().contains("no_such_tables.toml"));
}

#[test]
fn test_loaded_tables_drive_engine() {
    let tables = TaxTablesFile::load(&fixture("tables_2024_csv.toml")).unwrap();
    let engine = TaxEngine::new(&tables);

    assert_eq!(
        engine.federal_tax(dec!(143800), FilingStatus::MarriedFilingJointly),
        Ok(dec!(21742.00))
    );
}

// =============================================================================
// clients
// =============================================================================

#[test]
fn test_client_batch_loads_in_file_order() {
    let plans = clients::load_from_file(&fixture("clients.csv")).expect("Failed to load clients");

    let names: Vec<&str> = plans.iter().map(|p| p.client.as_str()).collect();
    assert_eq!(names, vec!["Rossi", "Chen", "Patel"]);
}

#[test]
fn test_client_batch_plans() {
    let tables = TaxTables::tax_year_2024();
    let engine = TaxEngine::new(&tables);
    let plans = clients::load_from_file(&fixture("clients.csv")).unwrap();

    let savings: Vec<_> = plans
        .iter()
        .map(|p| engine.plan(&p.request).unwrap().savings)
        .collect();

    // Rossi: strategies take profit to 26,000, then 20,000 moves to wages.
    // Baseline 21,742 + 8,477.73 + 5,033 Ohio; scenario 16,638 + 4,221 Ohio.
    // Patel: 2,000 less other income at 22% federal and 4.5% state.
    assert_eq!(savings, vec![dec!(14393.73), dec!(0), dec!(530.00)]);
}

#[test]
fn test_client_batch_net_due_flips_to_refund() {
    let tables = TaxTables::tax_year_2024();
    let engine = TaxEngine::new(&tables);
    let plans = clients::load_from_file(&fixture("clients.csv")).unwrap();

    let report = engine.plan(&plans[0].request).unwrap();

    assert_eq!(report.baseline.net_due, dec!(13252.73));
    assert_eq!(report.scenario.net_due, dec!(-1141.00));
}

#[test]
fn test_missing_client_file_is_io_error() {
    let err = clients::load_from_file(&fixture("missing.csv")).unwrap_err();

    assert!(matches!(err, ClientLoadError::Io { .. }));
}
