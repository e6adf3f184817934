use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::TaxError;
use crate::models::{BracketSchedule, FilingStatus, SelfEmploymentConfig, TaxBracket};

/// Bracket schedule and standard deduction for one filing status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilingStatusTable {
    pub brackets: BracketSchedule,
    pub standard_deduction: Decimal,
}

/// Every constant the engine needs for one tax year.
///
/// Built once at start-up and passed by reference to
/// [`TaxEngine`](crate::calculations::TaxEngine); there is no write path
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxTables {
    tax_year: i32,
    statuses: BTreeMap<FilingStatus, FilingStatusTable>,
    self_employment: SelfEmploymentConfig,
    qbi_rate: Decimal,
}

impl TaxTables {
    /// Assembles and validates a set of tables.
    ///
    /// Tables need not cover every filing status; evaluating a status they
    /// lack fails with [`TaxError::InvalidFilingStatus`].
    ///
    /// # Errors
    ///
    /// - [`TaxError::InvalidSelfEmploymentConfig`] if the SE constants are out of range
    /// - [`TaxError::InvalidQbiRate`] if `qbi_rate` is outside `[0, 1]`
    /// - [`TaxError::NegativeAmount`] if a standard deduction is negative
    pub fn new(
        tax_year: i32,
        statuses: BTreeMap<FilingStatus, FilingStatusTable>,
        self_employment: SelfEmploymentConfig,
        qbi_rate: Decimal,
    ) -> Result<Self, TaxError> {
        self_employment.validate()?;

        if qbi_rate < Decimal::ZERO || qbi_rate > Decimal::ONE {
            return Err(TaxError::InvalidQbiRate(qbi_rate));
        }

        for table in statuses.values() {
            if table.standard_deduction < Decimal::ZERO {
                return Err(TaxError::NegativeAmount {
                    field: "standard_deduction",
                    amount: table.standard_deduction,
                });
            }
        }

        Ok(Self {
            tax_year,
            statuses,
            self_employment,
            qbi_rate,
        })
    }

    /// The built-in 2024 federal tables.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::{FilingStatus, TaxTables};
    ///
    /// let tables = TaxTables::tax_year_2024();
    /// assert_eq!(tables.tax_year(), 2024);
    /// assert_eq!(
    ///     tables.standard_deduction(FilingStatus::MarriedFilingJointly).unwrap(),
    ///     dec!(29200)
    /// );
    /// ```
    pub fn tax_year_2024() -> Self {
        let rates = [10, 12, 22, 24, 32, 35, 37];
        let rows: [(FilingStatus, [i64; 7], i64); 3] = [
            (
                FilingStatus::Single,
                [0, 11_600, 47_150, 100_525, 191_950, 243_725, 609_350],
                14_600,
            ),
            (
                FilingStatus::MarriedFilingJointly,
                [0, 23_200, 94_300, 201_050, 383_900, 487_450, 731_200],
                29_200,
            ),
            (
                FilingStatus::HeadOfHousehold,
                [0, 16_550, 63_100, 100_500, 191_950, 243_700, 609_350],
                21_900,
            ),
        ];

        let statuses = rows
            .into_iter()
            .map(|(status, thresholds, standard_deduction)| {
                let brackets = thresholds
                    .iter()
                    .zip(rates)
                    .map(|(&threshold, rate)| {
                        TaxBracket::new(Decimal::from(threshold), Decimal::new(rate, 2))
                    })
                    .collect();
                let table = FilingStatusTable {
                    brackets: BracketSchedule::new(brackets)
                        .expect("built-in 2024 brackets are progressive"),
                    standard_deduction: Decimal::from(standard_deduction),
                };
                (status, table)
            })
            .collect();

        Self::new(
            2024,
            statuses,
            SelfEmploymentConfig::tax_year_2024(),
            Decimal::new(20, 2),
        )
        .expect("built-in 2024 tables are valid")
    }

    pub fn tax_year(&self) -> i32 {
        self.tax_year
    }

    /// Filing statuses these tables cover, in declaration order.
    pub fn statuses(&self) -> impl Iterator<Item = FilingStatus> + '_ {
        self.statuses.keys().copied()
    }

    /// # Errors
    ///
    /// Returns [`TaxError::InvalidFilingStatus`] if the tables do not cover `status`.
    pub fn status_table(
        &self,
        status: FilingStatus,
    ) -> Result<&FilingStatusTable, TaxError> {
        self.statuses
            .get(&status)
            .ok_or_else(|| TaxError::InvalidFilingStatus(status.as_str().to_string()))
    }

    pub fn brackets(
        &self,
        status: FilingStatus,
    ) -> Result<&BracketSchedule, TaxError> {
        self.status_table(status).map(|t| &t.brackets)
    }

    pub fn standard_deduction(
        &self,
        status: FilingStatus,
    ) -> Result<Decimal, TaxError> {
        self.status_table(status).map(|t| t.standard_deduction)
    }

    pub fn self_employment(&self) -> &SelfEmploymentConfig {
        &self.self_employment
    }

    pub fn qbi_rate(&self) -> Decimal {
        self.qbi_rate
    }
}
