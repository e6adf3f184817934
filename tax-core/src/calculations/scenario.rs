//! Baseline and scenario evaluation.
//!
//! Both run the same pipeline: taxable income and QBI from the wage/profit
//! split, federal tax on taxable income less QBI, SE tax on profit. The
//! scenario differs only when the S-Corp election is on, in which case
//! reasonable compensation moves from profit to wages and SE tax is zero.
//!
//! The S-Corp branch does not compute payroll tax on the reassigned wage.
//! It is a planning approximation: distributions escape SE tax and the
//! owner's wage is assumed to be taxed through payroll outside this model.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::TaxEngine;
use crate::calculations::common::non_negative;
use crate::{FilingStatus, TaxCalculationInput, TaxCalculationResult, TaxError};

impl TaxEngine<'_> {
    /// Evaluates `input` as filed, ignoring any S-Corp election on it.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::InvalidFilingStatus`] if the tables do not cover the
    /// input's filing status.
    pub fn baseline(
        &self,
        input: &TaxCalculationInput,
    ) -> Result<TaxCalculationResult, TaxError> {
        let self_employment_tax = self.self_employment_tax(input.business_profit());

        let result = self.compose(
            input.filing_status(),
            input.wages(),
            input.business_profit(),
            input.other_income(),
            input.itemized_deductions(),
            self_employment_tax,
        )?;

        debug!(
            status = %input.filing_status(),
            taxable_income = %result.taxable_income,
            total_tax = %result.total_tax,
            "baseline evaluated"
        );

        Ok(result)
    }

    /// Evaluates `input` with its S-Corp election applied, if any.
    ///
    /// Without the election this is identical to [`baseline`](Self::baseline).
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::InvalidFilingStatus`] if the tables do not cover the
    /// input's filing status.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::{FilingStatus, TaxCalculationInput, TaxEngine, TaxTables};
    ///
    /// let tables = TaxTables::tax_year_2024();
    /// let engine = TaxEngine::new(&tables);
    ///
    /// let input = TaxCalculationInput::builder(FilingStatus::MarriedFilingJointly)
    ///     .wages(dec!(120000))
    ///     .business_profit(dec!(60000))
    ///     .other_income(dec!(5000))
    ///     .itemized_deductions(dec!(12000))
    ///     .s_corp(dec!(72000))
    ///     .build()
    ///     .unwrap();
    ///
    /// let scenario = engine.scenario(&input).unwrap();
    ///
    /// assert_eq!(scenario.self_employment_tax, dec!(0));
    /// assert_eq!(scenario.qbi_deduction, dec!(0));
    /// assert_eq!(scenario.taxable_income, dec!(167800));
    /// assert_eq!(scenario.federal_tax, dec!(27022.00));
    /// ```
    pub fn scenario(
        &self,
        input: &TaxCalculationInput,
    ) -> Result<TaxCalculationResult, TaxError> {
        if !input.s_corp_election() {
            return self.baseline(input);
        }

        let reasonable_compensation = input.reasonable_compensation();
        if reasonable_compensation > input.business_profit() {
            warn!(
                business_profit = %input.business_profit(),
                reasonable_compensation = %reasonable_compensation,
                "Reasonable compensation exceeds business profit; remaining profit is zero"
            );
        }

        let business_profit = non_negative(input.business_profit() - reasonable_compensation);
        let wages = input.wages() + reasonable_compensation;

        let result = self.compose(
            input.filing_status(),
            wages,
            business_profit,
            input.other_income(),
            input.itemized_deductions(),
            Decimal::ZERO,
        )?;

        debug!(
            status = %input.filing_status(),
            reasonable_compensation = %reasonable_compensation,
            taxable_income = %result.taxable_income,
            total_tax = %result.total_tax,
            "S-Corp scenario evaluated"
        );

        Ok(result)
    }

    fn compose(
        &self,
        status: FilingStatus,
        wages: Decimal,
        business_profit: Decimal,
        other_income: Decimal,
        itemized: Decimal,
        self_employment_tax: Decimal,
    ) -> Result<TaxCalculationResult, TaxError> {
        let before_qbi =
            self.taxable_income(status, wages, business_profit, other_income, itemized)?;
        let qbi_deduction =
            self.qbi_deduction(business_profit, status, wages, other_income, itemized)?;
        let taxable_income = non_negative(before_qbi - qbi_deduction);
        let federal_tax = self.federal_tax(taxable_income, status)?;

        Ok(TaxCalculationResult {
            taxable_income,
            federal_tax,
            self_employment_tax,
            qbi_deduction,
            total_tax: federal_tax + self_employment_tax,
        })
    }
}
