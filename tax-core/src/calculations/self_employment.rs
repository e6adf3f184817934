//! Self-employment tax on Schedule C style profit.
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Net earnings: profit × net earnings factor (92.35%) |
//! | 2    | Social security: min(net earnings, wage base) × 12.4% |
//! | 3    | Medicare: net earnings × 2.9%, no cap |
//! | 4    | Total: step 2 + step 3, rounded once |
//!
//! The wage base and rates come from
//! [`SelfEmploymentConfig`](crate::SelfEmploymentConfig). Wages from other
//! employment do not reduce the remaining wage base here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::TaxEngine;
use crate::calculations::common::round_half_up;

/// Self-employment tax with its intermediate values.
///
/// Components are rounded to cents individually for display. `total` is the
/// unrounded components summed and then rounded, so it can differ from
/// `social_security_tax + medicare_tax` by a cent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfEmploymentTax {
    /// Profit × net earnings factor.
    pub net_earnings: Decimal,

    /// Net earnings capped at the social security wage base.
    pub ss_taxable_earnings: Decimal,

    pub social_security_tax: Decimal,

    pub medicare_tax: Decimal,

    pub total: Decimal,
}

impl SelfEmploymentTax {
    fn zero() -> Self {
        Self {
            net_earnings: Decimal::ZERO,
            ss_taxable_earnings: Decimal::ZERO,
            social_security_tax: Decimal::ZERO,
            medicare_tax: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

impl TaxEngine<'_> {
    /// Self-employment tax on `business_profit`; zero when profit is zero or
    /// negative.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::{TaxEngine, TaxTables};
    ///
    /// let tables = TaxTables::tax_year_2024();
    /// let engine = TaxEngine::new(&tables);
    ///
    /// // 60,000 × 92.35% = 55,410; 55,410 × 12.4% + 55,410 × 2.9%
    /// assert_eq!(engine.self_employment_tax(dec!(60000)), dec!(8477.73));
    /// assert_eq!(engine.self_employment_tax(dec!(0)), dec!(0));
    /// ```
    pub fn self_employment_tax(
        &self,
        business_profit: Decimal,
    ) -> Decimal {
        self.self_employment_breakdown(business_profit).total
    }

    /// Same as [`self_employment_tax`](Self::self_employment_tax) with the
    /// intermediate steps.
    pub fn self_employment_breakdown(
        &self,
        business_profit: Decimal,
    ) -> SelfEmploymentTax {
        if business_profit <= Decimal::ZERO {
            if business_profit < Decimal::ZERO {
                warn!(
                    business_profit = %business_profit,
                    "Business profit is negative; no self-employment tax applies"
                );
            }
            return SelfEmploymentTax::zero();
        }

        let config = self.tables.self_employment();

        let net_earnings = business_profit * config.net_earnings_factor;
        let ss_taxable_earnings = net_earnings.min(config.ss_wage_base);
        let social_security_tax = ss_taxable_earnings * config.ss_tax_rate;
        let medicare_tax = net_earnings * config.medicare_tax_rate;

        SelfEmploymentTax {
            net_earnings: round_half_up(net_earnings),
            ss_taxable_earnings: round_half_up(ss_taxable_earnings),
            social_security_tax: round_half_up(social_security_tax),
            medicare_tax: round_half_up(medicare_tax),
            total: round_half_up(social_security_tax + medicare_tax),
        }
    }
}
