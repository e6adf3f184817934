use std::collections::BTreeMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{BracketSchedule, FilingStatus, TaxBracket, TaxError};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading tax bracket data.
#[derive(Debug, Error)]
pub enum TaxBracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Bracket record for tax year {found} in a {expected} table")]
    TaxYearMismatch { expected: i32, found: i32 },

    #[error("Invalid bracket schedule: {0}")]
    Schedule(#[from] TaxError),
}

impl From<csv::Error> for TaxBracketLoaderError {
    fn from(err: csv::Error) -> Self {
        TaxBracketLoaderError::CsvParse(err.to_string())
    }
}

/// Maps IRS schedule codes to filing statuses.
///
/// - Schedule X → Single (S)
/// - Schedule Y-1 → Married Filing Jointly (MFJ)
/// - Schedule Z → Head of Household (HOH)
fn schedule_to_filing_status(schedule: &str) -> Result<FilingStatus, TaxBracketLoaderError> {
    match schedule {
        "X" => Ok(FilingStatus::Single),
        "Y-1" => Ok(FilingStatus::MarriedFilingJointly),
        "Z" => Ok(FilingStatus::HeadOfHousehold),
        _ => Err(TaxBracketLoaderError::InvalidSchedule(schedule.to_string())),
    }
}

/// A single record from the tax brackets CSV file.
///
/// - `tax_year`: The tax year (e.g., 2024)
/// - `schedule`: The IRS schedule code (X, Y-1, Z)
/// - `threshold`: Lower bound of taxable income for this bracket
/// - `rate`: The marginal tax rate as a decimal (e.g., 0.10 for 10%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBracketRecord {
    pub tax_year: i32,
    pub schedule: String,
    pub threshold: Decimal,
    pub rate: Decimal,
}

/// Loader for tax bracket data from CSV files.
///
/// The CSV uses IRS schedule codes (X, Y-1, Z) which are mapped to the
/// matching filing status when the records are assembled into schedules.
pub struct TaxBracketLoader;

impl TaxBracketLoader {
    /// Parse tax bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxBracketRecord>, TaxBracketLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxBracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Group records into one validated schedule per filing status.
    ///
    /// Records may appear in any order; each schedule is sorted by threshold
    /// before validation.
    ///
    /// # Errors
    ///
    /// - [`TaxBracketLoaderError::TaxYearMismatch`] if a record is for another year
    /// - [`TaxBracketLoaderError::InvalidSchedule`] for an unknown schedule code
    /// - [`TaxBracketLoaderError::Schedule`] if a grouped schedule fails validation
    pub fn schedules(
        tax_year: i32,
        records: &[TaxBracketRecord],
    ) -> Result<BTreeMap<FilingStatus, BracketSchedule>, TaxBracketLoaderError> {
        let mut groups: BTreeMap<FilingStatus, Vec<TaxBracket>> = BTreeMap::new();

        for record in records {
            if record.tax_year != tax_year {
                return Err(TaxBracketLoaderError::TaxYearMismatch {
                    expected: tax_year,
                    found: record.tax_year,
                });
            }
            let status = schedule_to_filing_status(&record.schedule)?;
            groups
                .entry(status)
                .or_default()
                .push(TaxBracket::new(record.threshold, record.rate));
        }

        groups
            .into_iter()
            .map(|(status, mut brackets)| {
                brackets.sort_by(|a, b| a.threshold.cmp(&b.threshold));
                debug!(%status, brackets = brackets.len(), "bracket schedule assembled");
                Ok((status, BracketSchedule::new(brackets)?))
            })
            .collect()
    }
}
