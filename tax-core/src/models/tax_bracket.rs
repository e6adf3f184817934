use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxError;

/// One marginal bracket: income above `threshold` (up to the next bracket's
/// threshold) is taxed at `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub threshold: Decimal,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        threshold: Decimal,
        rate: Decimal,
    ) -> Self {
        Self { threshold, rate }
    }
}

/// Progressive bracket schedule for a single filing status.
///
/// Always non-empty, starts at a threshold of zero, and has strictly
/// increasing thresholds and rates. The last bracket is open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct BracketSchedule {
    brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    /// Builds a schedule, checking its ordering invariants.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::InvalidBracketSchedule`] if the schedule is empty,
    /// does not start at zero, has a rate outside `[0, 1]`, or is not strictly
    /// increasing in both threshold and rate.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::{BracketSchedule, TaxBracket};
    ///
    /// let schedule = BracketSchedule::new(vec![
    ///     TaxBracket::new(dec!(0), dec!(0.10)),
    ///     TaxBracket::new(dec!(11600), dec!(0.12)),
    /// ])
    /// .unwrap();
    /// assert_eq!(schedule.len(), 2);
    ///
    /// let unsorted = BracketSchedule::new(vec![
    ///     TaxBracket::new(dec!(0), dec!(0.12)),
    ///     TaxBracket::new(dec!(11600), dec!(0.10)),
    /// ]);
    /// assert!(unsorted.is_err());
    /// ```
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, TaxError> {
        let first = brackets
            .first()
            .ok_or_else(|| TaxError::InvalidBracketSchedule("no brackets".to_string()))?;

        if first.threshold != Decimal::ZERO {
            return Err(TaxError::InvalidBracketSchedule(format!(
                "first threshold must be 0, got {}",
                first.threshold
            )));
        }

        for bracket in &brackets {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(TaxError::InvalidBracketSchedule(format!(
                    "rate {} at threshold {} is outside [0, 1]",
                    bracket.rate, bracket.threshold
                )));
            }
        }

        for pair in brackets.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            if upper.threshold <= lower.threshold {
                return Err(TaxError::InvalidBracketSchedule(format!(
                    "thresholds must be strictly increasing ({} then {})",
                    lower.threshold, upper.threshold
                )));
            }
            if upper.rate <= lower.rate {
                return Err(TaxError::InvalidBracketSchedule(format!(
                    "rates must be strictly increasing ({} then {})",
                    lower.rate, upper.rate
                )));
            }
        }

        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    /// Whether the schedule has no brackets.
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// Iterates `(bracket, upper_bound)` pairs, where the upper bound is the
    /// next bracket's threshold or `None` for the top bracket.
    pub fn bounded(&self) -> impl Iterator<Item = (&TaxBracket, Option<Decimal>)> {
        self.brackets.iter().enumerate().map(|(i, bracket)| {
            let upper = self.brackets.get(i + 1).map(|next| next.threshold);
            (bracket, upper)
        })
    }

    /// The bracket that taxes the next dollar above `taxable_income`.
    pub fn marginal_bracket(
        &self,
        taxable_income: Decimal,
    ) -> &TaxBracket {
        self.brackets
            .iter()
            .rev()
            .find(|b| taxable_income >= b.threshold)
            .unwrap_or(&self.brackets[0])
    }
}

impl TryFrom<Vec<TaxBracket>> for BracketSchedule {
    type Error = TaxError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<BracketSchedule> for Vec<TaxBracket> {
    fn from(schedule: BracketSchedule) -> Self {
        schedule.brackets
    }
}
