use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxError;

/// Statutory self-employment tax parameters for one tax year.
///
/// These change annually by law and are loaded with the rest of the tax
/// tables rather than hard-coded in the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfEmploymentConfig {
    /// Maximum earnings subject to social security tax.
    pub ss_wage_base: Decimal,

    /// Combined employer and employee social security rate, typically 12.4%.
    pub ss_tax_rate: Decimal,

    /// Combined employer and employee Medicare rate, typically 2.9%.
    pub medicare_tax_rate: Decimal,

    /// Share of profit treated as net earnings from self-employment, typically 92.35%.
    pub net_earnings_factor: Decimal,
}

impl SelfEmploymentConfig {
    /// 2024 parameters.
    pub fn tax_year_2024() -> Self {
        Self {
            ss_wage_base: Decimal::from(168_600),
            ss_tax_rate: Decimal::new(124, 3),
            medicare_tax_rate: Decimal::new(29, 3),
            net_earnings_factor: Decimal::new(9235, 4),
        }
    }

    /// Checks every parameter is within range.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::InvalidSelfEmploymentConfig`] if:
    /// - `net_earnings_factor` is not in (0, 1]
    /// - `ss_tax_rate` or `medicare_tax_rate` is not in [0, 1]
    /// - `ss_wage_base` is not positive
    pub fn validate(&self) -> Result<(), TaxError> {
        if self.net_earnings_factor <= Decimal::ZERO || self.net_earnings_factor > Decimal::ONE {
            return Err(TaxError::InvalidSelfEmploymentConfig(format!(
                "net earnings factor must be between 0 and 1, got {}",
                self.net_earnings_factor
            )));
        }
        if self.ss_tax_rate < Decimal::ZERO || self.ss_tax_rate > Decimal::ONE {
            return Err(TaxError::InvalidSelfEmploymentConfig(format!(
                "social security tax rate must be between 0 and 1, got {}",
                self.ss_tax_rate
            )));
        }
        if self.medicare_tax_rate < Decimal::ZERO || self.medicare_tax_rate > Decimal::ONE {
            return Err(TaxError::InvalidSelfEmploymentConfig(format!(
                "medicare tax rate must be between 0 and 1, got {}",
                self.medicare_tax_rate
            )));
        }
        if self.ss_wage_base <= Decimal::ZERO {
            return Err(TaxError::InvalidSelfEmploymentConfig(format!(
                "social security wage base must be positive, got {}",
                self.ss_wage_base
            )));
        }
        Ok(())
    }
}
