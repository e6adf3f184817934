use rust_decimal::Decimal;

use crate::calculations::TaxEngine;
use crate::calculations::common::round_half_up;
use crate::{FilingStatus, TaxError};

impl TaxEngine<'_> {
    /// Federal income tax on `taxable_income` under the status's bracket schedule.
    ///
    /// Each slice of income is taxed at its own bracket's rate. Brackets are
    /// walked in ascending order and the walk stops at the first bracket whose
    /// threshold is at or above the income.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::InvalidFilingStatus`] if the tables do not cover `status`.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::{FilingStatus, TaxEngine, TaxTables};
    ///
    /// let tables = TaxTables::tax_year_2024();
    /// let engine = TaxEngine::new(&tables);
    ///
    /// // 1,160 (10%) + 4,266 (12%) + 627 (22%)
    /// let tax = engine.federal_tax(dec!(50000), FilingStatus::Single).unwrap();
    /// assert_eq!(tax, dec!(6053.00));
    /// ```
    pub fn federal_tax(
        &self,
        taxable_income: Decimal,
        status: FilingStatus,
    ) -> Result<Decimal, TaxError> {
        let schedule = self.tables.brackets(status)?;
        let mut tax = Decimal::ZERO;

        for (bracket, upper) in schedule.bounded() {
            if taxable_income <= bracket.threshold {
                break;
            }
            let top = match upper {
                Some(upper) => taxable_income.min(upper),
                None => taxable_income,
            };
            tax += (top - bracket.threshold) * bracket.rate;
        }

        Ok(round_half_up(tax))
    }

    /// Marginal rate applied to the next dollar above `taxable_income`.
    pub fn marginal_rate(
        &self,
        taxable_income: Decimal,
        status: FilingStatus,
    ) -> Result<Decimal, TaxError> {
        let schedule = self.tables.brackets(status)?;
        Ok(schedule.marginal_bracket(taxable_income).rate)
    }
}
