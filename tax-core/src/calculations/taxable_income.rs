use rust_decimal::Decimal;

use crate::calculations::TaxEngine;
use crate::calculations::common::{max, non_negative, round_half_up};
use crate::{FilingStatus, TaxError};

impl TaxEngine<'_> {
    /// Gross income less the greater of the standard or itemized deduction,
    /// never below zero.
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
    /// // Standard deduction (29,200) beats itemized (12,000).
    /// let ti = engine
    ///     .taxable_income(
    ///         FilingStatus::MarriedFilingJointly,
    ///         dec!(120000),
    ///         dec!(60000),
    ///         dec!(5000),
    ///         dec!(12000),
    ///     )
    ///     .unwrap();
    /// assert_eq!(ti, dec!(155800));
    /// ```
    pub fn taxable_income(
        &self,
        status: FilingStatus,
        wages: Decimal,
        business_profit: Decimal,
        other_income: Decimal,
        itemized: Decimal,
    ) -> Result<Decimal, TaxError> {
        let deduction = self.deduction(status, itemized)?;
        let gross = wages + business_profit + other_income;

        Ok(round_half_up(non_negative(gross - deduction)))
    }

    /// The greater of the status's standard deduction or `itemized`.
    pub fn deduction(
        &self,
        status: FilingStatus,
        itemized: Decimal,
    ) -> Result<Decimal, TaxError> {
        let standard = self.tables.standard_deduction(status)?;
        Ok(max(standard, itemized))
    }
}
