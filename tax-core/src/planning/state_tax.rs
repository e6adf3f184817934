use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxError;
use crate::calculations::common::round_half_up;

/// Flat state rates as percentages.
const PRESETS: [(&str, i64, u32); 7] = [
    ("Ohio", 350, 2),
    ("Pennsylvania", 307, 2),
    ("Florida", 0, 0),
    ("New York", 64, 1),
    ("California", 7, 0),
    ("Texas", 0, 0),
    ("Illinois", 495, 2),
];

/// Custom rates above this percentage are rejected.
const MAX_CUSTOM_PERCENT: i64 = 15;

/// A flat state income tax rate applied to federal taxable income.
///
/// `rate` is a fraction (0.035 for 3.5%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StateTaxRecord")]
pub struct StateTaxRate {
    name: String,
    rate: Decimal,
}

#[derive(Deserialize)]
struct StateTaxRecord {
    name: String,
    rate: Decimal,
}

impl TryFrom<StateTaxRecord> for StateTaxRate {
    type Error = TaxError;

    fn try_from(record: StateTaxRecord) -> Result<Self, Self::Error> {
        Self::custom(record.rate * Decimal::ONE_HUNDRED)?;
        Ok(Self {
            name: record.name,
            rate: record.rate,
        })
    }
}

impl StateTaxRate {
    /// No state income tax.
    pub fn none() -> Self {
        Self {
            name: "None".to_string(),
            rate: Decimal::ZERO,
        }
    }

    /// Looks up a preset by name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::UnknownState`] if `name` is not a preset.
    pub fn preset(name: &str) -> Result<Self, TaxError> {
        let name = name.trim();
        PRESETS
            .iter()
            .find(|(preset, _, _)| preset.eq_ignore_ascii_case(name))
            .map(|&(preset, mantissa, scale)| Self::from_percent(preset, Decimal::new(mantissa, scale)))
            .ok_or_else(|| TaxError::UnknownState(name.to_string()))
    }

    /// A custom rate given as a percentage between 0 and 15.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::planning::StateTaxRate;
    ///
    /// let rate = StateTaxRate::custom(dec!(5)).unwrap();
    /// assert_eq!(rate.rate(), dec!(0.05));
    /// assert!(StateTaxRate::custom(dec!(15.5)).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::InvalidStateRate`] outside that range.
    pub fn custom(percent: Decimal) -> Result<Self, TaxError> {
        if percent < Decimal::ZERO || percent > Decimal::from(MAX_CUSTOM_PERCENT) {
            return Err(TaxError::InvalidStateRate(percent));
        }
        Ok(Self::from_percent("Other", percent))
    }

    fn from_percent(
        name: &str,
        percent: Decimal,
    ) -> Self {
        Self {
            name: name.to_string(),
            rate: percent / Decimal::ONE_HUNDRED,
        }
    }

    /// Every preset in display order.
    pub fn presets() -> Vec<Self> {
        PRESETS
            .iter()
            .map(|&(name, mantissa, scale)| Self::from_percent(name, Decimal::new(mantissa, scale)))
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    pub fn percent(&self) -> Decimal {
        (self.rate * Decimal::ONE_HUNDRED).normalize()
    }

    /// State tax on `taxable_income`, rounded to cents.
    pub fn tax_on(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        round_half_up(taxable_income * self.rate)
    }
}

impl Default for StateTaxRate {
    fn default() -> Self {
        Self::none()
    }
}
