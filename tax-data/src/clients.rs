//! CSV loader for batches of client planning requests.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Header
//! names are case-sensitive.
//!
//! | Column               | Required | Type    | Notes                                          |
//! |----------------------|----------|---------|------------------------------------------------|
//! | `client`             | yes      | string  | Label used in reports                          |
//! | `filing_status`      | yes      | string  | One of: `S`, `MFJ`, `HOH`                      |
//! | `wages`              | yes      | decimal |                                                |
//! | `business_profit`    | yes      | decimal | Schedule C net profit                          |
//! | `other_income`       | yes      | decimal |                                                |
//! | `itemized`           | yes      | decimal | Total itemized deductions                      |
//! | `state`              | no       | string  | Preset name, e.g. `Ohio`                       |
//! | `state_rate`         | no       | decimal | Custom percentage 0-15; overrides `state`      |
//! | `withholding`        | no       | decimal |                                                |
//! | `estimated_payments` | no       | decimal |                                                |
//! | `s_corp`             | no       | bool    | `true` to elect S-Corp treatment               |
//! | `reasonable_comp`    | no       | decimal | Owner wage under the election (default 0)      |
//! | `strategies`         | no       | string  | `code=amount` pairs separated by `;`           |
//!
//! ### Example
//!
//! ```csv
//! client,filing_status,wages,business_profit,other_income,itemized,state,s_corp,reasonable_comp,strategies
//! Rossi,MFJ,120000,60000,5000,12000,Ohio,true,72000,augusta=14000;costseg=20000
//! Chen,S,0,95000,0,0,,false,,
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::TaxCalculationInput;
use tax_core::TaxError;
use tax_core::planning::{Payments, PlanRequest, StateTaxRate, StrategySelection};
use thiserror::Error;
use tracing::debug;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    client: String,
    filing_status: String,
    wages: Decimal,
    business_profit: Decimal,
    other_income: Decimal,
    itemized: Decimal,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    state_rate: Option<Decimal>,
    #[serde(default)]
    withholding: Option<Decimal>,
    #[serde(default)]
    estimated_payments: Option<Decimal>,
    #[serde(default)]
    s_corp: Option<bool>,
    #[serde(default)]
    reasonable_comp: Option<Decimal>,
    #[serde(default)]
    strategies: Option<String>,
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One client row turned into a planning request.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientPlan {
    pub client: String,
    pub request: PlanRequest,
}

/// Errors that can occur while loading or converting client CSV data.
#[derive(Debug, Error)]
pub enum ClientLoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A row parsed but its values were rejected. `row` is 1-based (header
    /// excluded).
    #[error("row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: TaxError,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn state_rate(row: &CsvRow) -> Result<StateTaxRate, TaxError> {
    if let Some(percent) = row.state_rate {
        return StateTaxRate::custom(percent);
    }
    match row.state.as_deref().map(str::trim) {
        None | Some("") => Ok(StateTaxRate::none()),
        Some(name) => StateTaxRate::preset(name),
    }
}

fn build_request(row: &CsvRow) -> Result<PlanRequest, TaxError> {
    let client = TaxCalculationInput::builder(row.filing_status.parse()?)
        .wages(row.wages)
        .business_profit(row.business_profit)
        .other_income(row.other_income)
        .itemized_deductions(row.itemized)
        .build()?;

    let reasonable_compensation = match row.s_corp {
        Some(true) => {
            let rc = row.reasonable_comp.unwrap_or(Decimal::ZERO);
            if rc < Decimal::ZERO {
                return Err(TaxError::NegativeAmount {
                    field: "reasonable_compensation",
                    amount: rc,
                });
            }
            Some(rc)
        }
        _ => None,
    };

    Ok(PlanRequest {
        client,
        state: state_rate(row)?,
        payments: Payments::new(
            row.withholding.unwrap_or(Decimal::ZERO),
            row.estimated_payments.unwrap_or(Decimal::ZERO),
        )?,
        strategies: StrategySelection::parse(row.strategies.as_deref().unwrap_or(""))?,
        reasonable_compensation,
    })
}

/// Convert a single CSV row into a ClientPlan.
///
/// row_number is 1-based (for error messages).
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<ClientPlan, ClientLoadError> {
    let request = build_request(&row).map_err(|source| ClientLoadError::InvalidRow {
        row: row_number,
        source,
    })?;
    debug!(client = %row.client, row = row_number, "client row loaded");

    Ok(ClientPlan {
        client: row.client,
        request,
    })
}

/// Parse CSV text and return one plan per row, in file order.
///
/// # Errors
///
/// * [ClientLoadError::Parse] – if the CSV is structurally invalid or a
///   required field cannot be deserialised.
/// * [ClientLoadError::InvalidRow] – if a row's values are rejected
///   (unknown filing status, strategy or state, negative amount, rate out
///   of range).
pub fn load_from_str(input: &str) -> Result<Vec<ClientPlan>, ClientLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<ClientPlan>, ClientLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ClientLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
