use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of one baseline or scenario evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    /// Taxable income after the QBI deduction.
    pub taxable_income: Decimal,

    pub federal_tax: Decimal,

    pub self_employment_tax: Decimal,

    pub qbi_deduction: Decimal,

    /// Federal tax plus self-employment tax.
    pub total_tax: Decimal,
}
