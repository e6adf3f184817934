use crate::TaxTables;

/// Calculator over one tax year's tables.
///
/// Holds no state besides the borrowed tables, so it is `Copy` and any
/// number of evaluations may run in any order or in parallel.
///
/// # Example
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
///     .build()
///     .unwrap();
///
/// let baseline = engine.baseline(&input).unwrap();
///
/// assert_eq!(baseline.qbi_deduction, dec!(12000.00));
/// assert_eq!(baseline.taxable_income, dec!(143800.00));
/// assert_eq!(baseline.federal_tax, dec!(21742.00));
/// assert_eq!(baseline.self_employment_tax, dec!(8477.73));
/// assert_eq!(baseline.total_tax, dec!(30219.73));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TaxEngine<'a> {
    pub(super) tables: &'a TaxTables,
}

impl<'a> TaxEngine<'a> {
    pub fn new(tables: &'a TaxTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'a TaxTables {
        self.tables
    }
}
