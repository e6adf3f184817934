use rust_decimal::Decimal;

use crate::calculations::TaxEngine;
use crate::calculations::common::round_half_up;
use crate::{FilingStatus, TaxError};

impl TaxEngine<'_> {
    /// Simplified qualified business income deduction.
    ///
    /// The lesser of `qbi_rate × business_profit` and taxable income computed
    /// before the deduction. Wage, UBIA and phase-out limits are not modeled.
    /// Zero when profit is zero or negative.
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
    /// let qbi = engine
    ///     .qbi_deduction(dec!(40000), FilingStatus::Single, dec!(0), dec!(0), dec!(0))
    ///     .unwrap();
    /// assert_eq!(qbi, dec!(8000));
    ///
    /// // 20% would be 3,600, but taxable income is only 18,000 − 14,600.
    /// let capped = engine
    ///     .qbi_deduction(dec!(18000), FilingStatus::Single, dec!(0), dec!(0), dec!(0))
    ///     .unwrap();
    /// assert_eq!(capped, dec!(3400));
    /// ```
    pub fn qbi_deduction(
        &self,
        business_profit: Decimal,
        status: FilingStatus,
        wages: Decimal,
        other_income: Decimal,
        itemized: Decimal,
    ) -> Result<Decimal, TaxError> {
        if business_profit <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let pre_qbi_taxable =
            self.taxable_income(status, wages, business_profit, other_income, itemized)?;
        let tentative = self.tables.qbi_rate() * business_profit;

        Ok(round_half_up(tentative.min(pre_qbi_taxable)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::TaxTables;

    #[test]
    fn twenty_percent_when_taxable_income_is_ample() {
        let tables = TaxTables::tax_year_2024();
        let engine = TaxEngine::new(&tables);

        let result = engine.qbi_deduction(
            dec!(60000),
            FilingStatus::MarriedFilingJointly,
            dec!(120000),
            dec!(5000),
            dec!(12000),
        );

        assert_eq!(result, Ok(dec!(12000.00)));
    }

    #[test]
    fn capped_by_pre_qbi_taxable_income() {
        let tables = TaxTables::tax_year_2024();
        let engine = TaxEngine::new(&tables);

        // Pre-QBI taxable: 30,000 − 29,200 = 800, below 20% of 30,000.
        let result = engine.qbi_deduction(
            dec!(30000),
            FilingStatus::MarriedFilingJointly,
            dec!(0),
            dec!(0),
            dec!(0),
        );

        assert_eq!(result, Ok(dec!(800)));
    }

    #[test]
    fn zero_when_deductions_exceed_income() {
        let tables = TaxTables::tax_year_2024();
        let engine = TaxEngine::new(&tables);

        let result = engine.qbi_deduction(
            dec!(10000),
            FilingStatus::HeadOfHousehold,
            dec!(0),
            dec!(0),
            dec!(0),
        );

        assert_eq!(result, Ok(dec!(0)));
    }

    #[test]
    fn zero_for_non_positive_profit() {
        let tables = TaxTables::tax_year_2024();
        let engine = TaxEngine::new(&tables);

        for profit in [dec!(0), dec!(-5000)] {
            let result = engine.qbi_deduction(
                profit,
                FilingStatus::Single,
                dec!(200000),
                dec!(0),
                dec!(0),
            );
            assert_eq!(result, Ok(dec!(0)));
        }
    }

    #[test]
    fn rounds_to_cents() {
        let tables = TaxTables::tax_year_2024();
        let engine = TaxEngine::new(&tables);

        let result = engine.qbi_deduction(
            dec!(12345.67),
            FilingStatus::Single,
            dec!(100000),
            dec!(0),
            dec!(0),
        );

        // 12,345.67 × 20% = 2,469.134
        assert_eq!(result, Ok(dec!(2469.13)));
    }

    #[test]
    fn never_exceeds_either_bound() {
        let tables = TaxTables::tax_year_2024();
        let engine = TaxEngine::new(&tables);

        for status in FilingStatus::ALL {
            for (profit, wages) in [
                (dec!(5000), dec!(0)),
                (dec!(25000), dec!(3000)),
                (dec!(80000), dec!(40000)),
                (dec!(400000), dec!(0)),
            ] {
                let pre_qbi = engine
                    .taxable_income(status, wages, profit, dec!(0), dec!(0))
                    .unwrap();
                let qbi = engine
                    .qbi_deduction(profit, status, wages, dec!(0), dec!(0))
                    .unwrap();

                assert!(qbi <= dec!(0.2) * profit);
                assert!(qbi <= pre_qbi);
                assert!(qbi >= dec!(0));
            }
        }
    }
}
