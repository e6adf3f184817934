//! TOML tax-year table files.
//!
//! ```toml
//! tax_year = 2024
//! qbi_rate = 0.20
//!
//! [self_employment]
//! ss_wage_base = 168600
//! ss_tax_rate = 0.124
//! medicare_tax_rate = 0.029
//! net_earnings_factor = 0.9235
//!
//! [standard_deduction]
//! S = 14600
//! MFJ = 29200
//!
//! [brackets]
//! S = [[0, 0.10], [11600, 0.12], [47150, 0.22]]
//! MFJ = [[0, 0.10], [23200, 0.12], [94300, 0.22]]
//! ```
//!
//! Instead of `[brackets]`, `brackets_csv = "brackets_2024.csv"` points at a
//! bracket CSV (see [`TaxBracketLoader`]) relative to the TOML file.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{
    BracketSchedule, FilingStatus, FilingStatusTable, SelfEmploymentConfig, TaxBracket, TaxError,
    TaxTables,
};
use thiserror::Error;
use tracing::info;

use crate::brackets::{TaxBracketLoader, TaxBracketLoaderError};

#[derive(Debug, Error)]
pub enum TaxTablesLoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Brackets(#[from] TaxBracketLoaderError),

    #[error("Invalid tax tables: {0}")]
    Invalid(#[from] TaxError),

    #[error("Tables must set exactly one of `brackets` or `brackets_csv`")]
    BracketSource,

    #[error("No brackets for filing status {0}")]
    MissingBrackets(FilingStatus),

    #[error("No standard deduction for filing status {0}")]
    MissingStandardDeduction(FilingStatus),
}

/// The on-disk shape of a tax-year tables file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TaxTablesFile {
    pub tax_year: i32,
    pub qbi_rate: Decimal,
    pub self_employment: SelfEmploymentConfig,
    pub standard_deduction: BTreeMap<FilingStatus, Decimal>,
    #[serde(default)]
    pub brackets: Option<BTreeMap<FilingStatus, Vec<(Decimal, Decimal)>>>,
    #[serde(default)]
    pub brackets_csv: Option<PathBuf>,
}

impl FromStr for TaxTablesFile {
    type Err = TaxTablesLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

impl TaxTablesFile {
    /// Reads and validates the tables at `path`.
    pub fn load(path: &Path) -> Result<TaxTables, TaxTablesLoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| TaxTablesLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: TaxTablesFile = contents.parse()?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        let tables = file.into_tables(base_dir)?;
        info!(
            path = %path.display(),
            tax_year = tables.tax_year(),
            statuses = tables.statuses().count(),
            "Tax tables loaded"
        );
        Ok(tables)
    }

    /// Builds validated [`TaxTables`], resolving `brackets_csv` against
    /// `base_dir`.
    pub fn into_tables(
        self,
        base_dir: &Path,
    ) -> Result<TaxTables, TaxTablesLoadError> {
        let schedules = match (self.brackets, &self.brackets_csv) {
            (Some(inline), None) => inline
                .into_iter()
                .map(|(status, pairs)| {
                    let brackets = pairs
                        .into_iter()
                        .map(|(threshold, rate)| TaxBracket::new(threshold, rate))
                        .collect();
                    Ok((status, BracketSchedule::new(brackets)?))
                })
                .collect::<Result<BTreeMap<_, _>, TaxError>>()?,
            (None, Some(csv_path)) => {
                let path = base_dir.join(csv_path);
                let file = File::open(&path).map_err(|source| TaxTablesLoadError::Io {
                    path: path.clone(),
                    source,
                })?;
                let records = TaxBracketLoader::parse(file)?;
                TaxBracketLoader::schedules(self.tax_year, &records)?
            }
            _ => return Err(TaxTablesLoadError::BracketSource),
        };

        if let Some(status) = schedules
            .keys()
            .find(|status| !self.standard_deduction.contains_key(*status))
        {
            return Err(TaxTablesLoadError::MissingStandardDeduction(*status));
        }

        let mut schedules = schedules;
        let statuses = self
            .standard_deduction
            .into_iter()
            .map(|(status, standard_deduction)| {
                let brackets = schedules
                    .remove(&status)
                    .ok_or(TaxTablesLoadError::MissingBrackets(status))?;
                Ok((
                    status,
                    FilingStatusTable {
                        brackets,
                        standard_deduction,
                    },
                ))
            })
            .collect::<Result<BTreeMap<_, _>, TaxTablesLoadError>>()?;

        Ok(TaxTables::new(
            self.tax_year,
            statuses,
            self.self_employment,
            self.qbi_rate,
        )?)
    }
}
