use rust_decimal::Decimal;
use serde::Serialize;

use crate::TaxError;
use crate::models::FilingStatus;

/// Everything the engine needs for one evaluation.
///
/// Built through [`TaxCalculationInput::builder`], which rejects negative
/// amounts. Fields are read-only afterwards; a different scenario gets a new
/// input rather than a modified one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxCalculationInput {
    filing_status: FilingStatus,
    wages: Decimal,
    business_profit: Decimal,
    other_income: Decimal,
    itemized_deductions: Decimal,
    s_corp_election: bool,
    reasonable_compensation: Decimal,
}

impl TaxCalculationInput {
    /// Starts a builder with every amount at zero and no S-Corp election.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::{FilingStatus, TaxCalculationInput, TaxError};
    ///
    /// let input = TaxCalculationInput::builder(FilingStatus::Single)
    ///     .wages(dec!(85000))
    ///     .business_profit(dec!(12000))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(input.wages(), dec!(85000));
    ///
    /// let err = TaxCalculationInput::builder(FilingStatus::Single)
    ///     .other_income(dec!(-1))
    ///     .build()
    ///     .unwrap_err();
    /// assert_eq!(err, TaxError::NegativeAmount { field: "other_income", amount: dec!(-1) });
    /// ```
    pub fn builder(filing_status: FilingStatus) -> TaxCalculationInputBuilder {
        TaxCalculationInputBuilder {
            input: Self {
                filing_status,
                wages: Decimal::ZERO,
                business_profit: Decimal::ZERO,
                other_income: Decimal::ZERO,
                itemized_deductions: Decimal::ZERO,
                s_corp_election: false,
                reasonable_compensation: Decimal::ZERO,
            },
        }
    }

    /// Returns a builder seeded with this input's values.
    pub fn to_builder(&self) -> TaxCalculationInputBuilder {
        TaxCalculationInputBuilder {
            input: self.clone(),
        }
    }

    pub fn filing_status(&self) -> FilingStatus {
        self.filing_status
    }

    pub fn wages(&self) -> Decimal {
        self.wages
    }

    /// Schedule C equivalent net profit.
    pub fn business_profit(&self) -> Decimal {
        self.business_profit
    }

    /// Dividends, interest, capital gains, K-1 income and the like, as one figure.
    pub fn other_income(&self) -> Decimal {
        self.other_income
    }

    pub fn itemized_deductions(&self) -> Decimal {
        self.itemized_deductions
    }

    pub fn s_corp_election(&self) -> bool {
        self.s_corp_election
    }

    /// Wage paid to the owner out of business profit when the S-Corp election
    /// is in effect. Ignored otherwise.
    pub fn reasonable_compensation(&self) -> Decimal {
        self.reasonable_compensation
    }
}

/// Builder for [`TaxCalculationInput`].
#[derive(Debug, Clone)]
pub struct TaxCalculationInputBuilder {
    input: TaxCalculationInput,
}

impl TaxCalculationInputBuilder {
    pub fn filing_status(
        mut self,
        filing_status: FilingStatus,
    ) -> Self {
        self.input.filing_status = filing_status;
        self
    }

    pub fn wages(
        mut self,
        wages: Decimal,
    ) -> Self {
        self.input.wages = wages;
        self
    }

    pub fn business_profit(
        mut self,
        business_profit: Decimal,
    ) -> Self {
        self.input.business_profit = business_profit;
        self
    }

    pub fn other_income(
        mut self,
        other_income: Decimal,
    ) -> Self {
        self.input.other_income = other_income;
        self
    }

    pub fn itemized_deductions(
        mut self,
        itemized_deductions: Decimal,
    ) -> Self {
        self.input.itemized_deductions = itemized_deductions;
        self
    }

    /// Turns the S-Corp election on with the given reasonable compensation.
    pub fn s_corp(
        mut self,
        reasonable_compensation: Decimal,
    ) -> Self {
        self.input.s_corp_election = true;
        self.input.reasonable_compensation = reasonable_compensation;
        self
    }

    /// Turns the S-Corp election off and clears reasonable compensation.
    pub fn sole_proprietor(mut self) -> Self {
        self.input.s_corp_election = false;
        self.input.reasonable_compensation = Decimal::ZERO;
        self
    }

    /// # Errors
    ///
    /// Returns [`TaxError::NegativeAmount`] naming the first negative field.
    pub fn build(self) -> Result<TaxCalculationInput, TaxError> {
        let input = self.input;
        let amounts = [
            ("wages", input.wages),
            ("business_profit", input.business_profit),
            ("other_income", input.other_income),
            ("itemized_deductions", input.itemized_deductions),
            ("reasonable_compensation", input.reasonable_compensation),
        ];

        if let Some((field, amount)) = amounts.into_iter().find(|(_, a)| *a < Decimal::ZERO) {
            return Err(TaxError::NegativeAmount { field, amount });
        }

        Ok(input)
    }
}
