//! Tax strategy catalog and per-client strategy selections.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::common::non_negative;
use crate::{TaxCalculationInput, TaxError};

/// Which income line a strategy's deduction reduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeductionTarget {
    BusinessProfit,
    OtherIncome,
}

/// A planning strategy that produces a deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Strategy {
    AugustaRule,
    CostSegregation,
    FamilyManagementCompany,
    OilAndGas,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::AugustaRule,
        Strategy::CostSegregation,
        Strategy::FamilyManagementCompany,
        Strategy::OilAndGas,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::AugustaRule => "augusta",
            Self::CostSegregation => "costseg",
            Self::FamilyManagementCompany => "fmc",
            Self::OilAndGas => "oilgas",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::AugustaRule => "Augusta Rule",
            Self::CostSegregation => "Cost Segregation",
            Self::FamilyManagementCompany => "Family Management Company",
            Self::OilAndGas => "Oil & Gas Investment",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Self::AugustaRule => {
                "Rent your home to your business for up to 14 days per year; the rent is excluded from income and deducted by the business."
            }
            Self::CostSegregation => {
                "Accelerates depreciation deductions by reclassifying building components into shorter recovery periods."
            }
            Self::FamilyManagementCompany => {
                "Pays family members reasonable wages for bona fide services, shifting income to lower brackets."
            }
            Self::OilAndGas => {
                "Deducts intangible drilling costs and depletion allowances from a working-interest investment."
            }
        }
    }

    /// Statutory authority for the strategy.
    pub fn authority(&self) -> &'static str {
        match self {
            Self::AugustaRule => "IRC §280A(g)",
            Self::CostSegregation => "IRC §168 (MACRS), §179",
            Self::FamilyManagementCompany => "IRS Pub. 15 (Circular E)",
            Self::OilAndGas => "IRC §263(c), §§611-613",
        }
    }

    /// IRS and statute references as `(label, url)`.
    pub fn references(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::AugustaRule => &[
                (
                    "26 U.S.C. §280A(g) - Dwelling unit used as a residence",
                    "https://www.law.cornell.edu/uscode/text/26/280A",
                ),
                (
                    "IRS Publication 535 - Business Expenses",
                    "https://www.irs.gov/publications/p535",
                ),
            ],
            Self::CostSegregation => &[
                (
                    "IRS Cost Segregation Audit Techniques Guide",
                    "https://www.irs.gov/businesses/small-businesses-self-employed/cost-segregation-audit-techniques-guide",
                ),
                (
                    "26 U.S.C. §168 - MACRS",
                    "https://www.law.cornell.edu/uscode/text/26/168",
                ),
                (
                    "Form 3115 - Change in Accounting Method",
                    "https://www.irs.gov/forms-pubs/about-form-3115",
                ),
            ],
            Self::FamilyManagementCompany => &[
                (
                    "IRS Pub. 15 (Circular E) - Employer's Tax Guide",
                    "https://www.irs.gov/publications/p15",
                ),
                (
                    "IRS - Family Help",
                    "https://www.irs.gov/businesses/small-businesses-self-employed/family-help",
                ),
            ],
            Self::OilAndGas => &[
                (
                    "26 U.S.C. §263(c) - Intangible drilling and development costs",
                    "https://www.law.cornell.edu/uscode/text/26/263",
                ),
                (
                    "26 U.S.C. §§611-613 - Depletion",
                    "https://www.law.cornell.edu/uscode/text/26/611",
                ),
            ],
        }
    }

    /// Records to keep when claiming the deduction.
    pub fn checklist(&self) -> &'static [&'static str] {
        match self {
            Self::AugustaRule => &[
                "Document fair market rent with at least three comparable rentals.",
                "Sign a short lease between the owner and the business.",
                "Hold legitimate business meetings; keep agendas and minutes.",
                "Do not issue a 1099 to yourself; 14 or fewer rental days are excluded.",
            ],
            Self::CostSegregation => &[
                "Order a benefits analysis first to estimate savings.",
                "Use an engineered study; retain invoices, drawings and closing statements.",
                "If changing methods, file Form 3115 with the return.",
            ],
            Self::FamilyManagementCompany => &[
                "Track hours and tasks; keep invoices from the management company.",
                "Open a dedicated bank account; pay by check or ACH.",
                "Run payroll and issue W-2s where entity type and age require it.",
            ],
            Self::OilAndGas => &[
                "Confirm suitability and risk tolerance; review placement documents.",
                "Document the split of intangible drilling costs versus equipment.",
                "Track depletion and K-1 reporting annually.",
            ],
        }
    }

    /// Rent, depreciation and family wages are business expenses; drilling
    /// costs flow through on a K-1 against other income.
    pub fn target(&self) -> DeductionTarget {
        match self {
            Self::AugustaRule | Self::CostSegregation | Self::FamilyManagementCompany => {
                DeductionTarget::BusinessProfit
            }
            Self::OilAndGas => DeductionTarget::OtherIncome,
        }
    }

    /// # Errors
    ///
    /// Returns [`TaxError::UnknownStrategy`] for anything but a catalog code.
    pub fn parse(code: &str) -> Result<Self, TaxError> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| TaxError::UnknownStrategy(code.to_string()))
    }
}

impl fmt::Display for Strategy {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Strategy {
    type Error = TaxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Strategy> for String {
    fn from(strategy: Strategy) -> Self {
        strategy.code().to_string()
    }
}

/// A strategy together with the deduction it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyAmount {
    pub strategy: Strategy,
    pub amount: Decimal,
}

/// The strategies elected for a scenario, in the order they were chosen.
///
/// Each strategy appears at most once and every amount is non-negative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SelectionRecord")]
pub struct StrategySelection {
    entries: Vec<StrategyAmount>,
}

#[derive(Deserialize)]
struct SelectionRecord {
    entries: Vec<StrategyAmount>,
}

impl TryFrom<SelectionRecord> for StrategySelection {
    type Error = TaxError;

    fn try_from(record: SelectionRecord) -> Result<Self, Self::Error> {
        record
            .entries
            .into_iter()
            .try_fold(Self::new(), |selection, entry| {
                selection.with(entry.strategy, entry.amount)
            })
    }
}

impl StrategySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `strategy` with `amount`, replacing the amount if the strategy is
    /// already selected.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::NegativeAmount`] if `amount` is negative.
    pub fn with(
        mut self,
        strategy: Strategy,
        amount: Decimal,
    ) -> Result<Self, TaxError> {
        if amount < Decimal::ZERO {
            return Err(TaxError::NegativeAmount {
                field: "strategy_amount",
                amount,
            });
        }

        match self.entries.iter_mut().find(|e| e.strategy == strategy) {
            Some(entry) => entry.amount = amount,
            None => self.entries.push(StrategyAmount { strategy, amount }),
        }
        Ok(self)
    }

    /// Parses `code=amount` pairs separated by `;`. Blank input is an empty
    /// selection.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::planning::{Strategy, StrategySelection};
    ///
    /// let selection = StrategySelection::parse("augusta=14000; oilgas=25000").unwrap();
    /// assert_eq!(selection.total(), dec!(39000));
    /// assert_eq!(selection.amount(Strategy::OilAndGas), Some(dec!(25000)));
    /// ```
    ///
    /// # Errors
    ///
    /// - [`TaxError::UnknownStrategy`] for an unknown code or a malformed pair
    /// - [`TaxError::NegativeAmount`] for a negative amount
    pub fn parse(input: &str) -> Result<Self, TaxError> {
        input
            .split(';')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .try_fold(Self::new(), |selection, pair| {
                let (code, amount) = pair
                    .split_once('=')
                    .ok_or_else(|| TaxError::UnknownStrategy(pair.to_string()))?;
                let strategy = Strategy::parse(code)?;
                let amount = amount
                    .trim()
                    .replace(',', "")
                    .parse::<Decimal>()
                    .map_err(|_| TaxError::UnknownStrategy(pair.to_string()))?;
                selection.with(strategy, amount)
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &StrategyAmount> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn amount(
        &self,
        strategy: Strategy,
    ) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|e| e.strategy == strategy)
            .map(|e| e.amount)
    }

    /// Sum of every selected deduction.
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Sum of the deductions aimed at `target`.
    pub fn total_for(
        &self,
        target: DeductionTarget,
    ) -> Decimal {
        self.entries
            .iter()
            .filter(|e| e.strategy.target() == target)
            .map(|e| e.amount)
            .sum()
    }

    /// A selection holding only `entry`, every other strategy at zero.
    pub fn isolate(entry: StrategyAmount) -> Self {
        Self {
            entries: vec![entry],
        }
    }

    /// Returns a new input with each deduction taken off its target income
    /// line. A line never drops below zero; the unused part of the deduction
    /// is lost.
    ///
    /// # Errors
    ///
    /// Propagates input validation errors from the rebuilt input.
    pub fn apply(
        &self,
        input: &TaxCalculationInput,
    ) -> Result<TaxCalculationInput, TaxError> {
        let business = self.total_for(DeductionTarget::BusinessProfit);
        let other = self.total_for(DeductionTarget::OtherIncome);

        if business > input.business_profit() {
            warn!(
                business_profit = %input.business_profit(),
                deductions = %business,
                "Strategy deductions exceed business profit; profit floored at zero"
            );
        }
        if other > input.other_income() {
            warn!(
                other_income = %input.other_income(),
                deductions = %other,
                "Strategy deductions exceed other income; other income floored at zero"
            );
        }

        input
            .to_builder()
            .business_profit(non_negative(input.business_profit() - business))
            .other_income(non_negative(input.other_income() - other))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::FilingStatus;

    fn client() -> TaxCalculationInput {
        TaxCalculationInput::builder(FilingStatus::MarriedFilingJointly)
            .wages(dec!(120000))
            .business_profit(dec!(60000))
            .other_income(dec!(5000))
            .itemized_deductions(dec!(12000))
            .build()
            .unwrap()
    }

    #[test]
    fn parse_accepts_every_code() {
        for strategy in Strategy::ALL {
            assert_eq!(Strategy::parse(strategy.code()), Ok(strategy));
        }
        assert_eq!(Strategy::parse(" FMC "), Ok(Strategy::FamilyManagementCompany));
    }

    #[test]
    fn parse_rejects_unknown_code() {
        assert_eq!(
            Strategy::parse("hsa"),
            Err(TaxError::UnknownStrategy("hsa".to_string()))
        );
    }

    #[test]
    fn every_strategy_has_guidance() {
        for strategy in Strategy::ALL {
            assert!(!strategy.authority().is_empty());
            assert!(!strategy.references().is_empty(), "{strategy}");
            assert!(!strategy.checklist().is_empty(), "{strategy}");
        }
    }

    #[test]
    fn serde_uses_code() {
        let json = serde_json::to_string(&Strategy::CostSegregation).unwrap();

        assert_eq!(json, "\"costseg\"");
        assert_eq!(serde_json::from_str::<Strategy>("\"oilgas\"").unwrap(), Strategy::OilAndGas);
    }

    #[test]
    fn targets() {
        assert_eq!(Strategy::AugustaRule.target(), DeductionTarget::BusinessProfit);
        assert_eq!(Strategy::CostSegregation.target(), DeductionTarget::BusinessProfit);
        assert_eq!(
            Strategy::FamilyManagementCompany.target(),
            DeductionTarget::BusinessProfit
        );
        assert_eq!(Strategy::OilAndGas.target(), DeductionTarget::OtherIncome);
    }

    #[test]
    fn with_replaces_existing_amount() {
        let selection = StrategySelection::new()
            .with(Strategy::AugustaRule, dec!(10000))
            .unwrap()
            .with(Strategy::CostSegregation, dec!(5000))
            .unwrap()
            .with(Strategy::AugustaRule, dec!(14000))
            .unwrap();

        assert_eq!(selection.len(), 2);
        assert_eq!(selection.amount(Strategy::AugustaRule), Some(dec!(14000)));
        assert_eq!(selection.total(), dec!(19000));
    }

    #[test]
    fn with_rejects_negative_amount() {
        let result = StrategySelection::new().with(Strategy::OilAndGas, dec!(-1));

        assert_eq!(
            result,
            Err(TaxError::NegativeAmount {
                field: "strategy_amount",
                amount: dec!(-1),
            })
        );
    }

    #[test]
    fn selection_deserialize_rejects_negative_amount() {
        let err = serde_json::from_str::<StrategySelection>(
            r#"{"entries":[{"strategy":"augusta","amount":"-10000"}]}"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("strategy_amount must not be negative"), "{err}");
    }

    #[test]
    fn selection_deserialize_merges_repeated_strategy() {
        let selection: StrategySelection = serde_json::from_str(
            r#"{"entries":[
                {"strategy":"augusta","amount":"5000"},
                {"strategy":"oilgas","amount":"2000"},
                {"strategy":"augusta","amount":"14000"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(selection.len(), 2);
        assert_eq!(selection.amount(Strategy::AugustaRule), Some(dec!(14000)));
        assert_eq!(selection.total(), dec!(16000));
    }

    #[test]
    fn parse_selection_with_thousands_separators() {
        let selection = StrategySelection::parse("costseg=1,250.50").unwrap();

        assert_eq!(selection.amount(Strategy::CostSegregation), Some(dec!(1250.50)));
    }

    #[test]
    fn parse_blank_selection_is_empty() {
        assert!(StrategySelection::parse("").unwrap().is_empty());
        assert!(StrategySelection::parse(" ; ").unwrap().is_empty());
    }

    #[test]
    fn parse_selection_rejects_missing_amount() {
        assert_eq!(
            StrategySelection::parse("augusta"),
            Err(TaxError::UnknownStrategy("augusta".to_string()))
        );
    }

    #[test]
    fn parse_selection_rejects_bad_amount() {
        assert!(StrategySelection::parse("augusta=lots").is_err());
    }

    #[test]
    fn total_for_splits_by_target() {
        let selection = StrategySelection::parse("augusta=14000;fmc=6000;oilgas=3000").unwrap();

        assert_eq!(selection.total_for(DeductionTarget::BusinessProfit), dec!(20000));
        assert_eq!(selection.total_for(DeductionTarget::OtherIncome), dec!(3000));
    }

    #[test]
    fn apply_reduces_target_lines() {
        let selection = StrategySelection::parse("augusta=14000;oilgas=3000").unwrap();

        let adjusted = selection.apply(&client()).unwrap();

        assert_eq!(adjusted.business_profit(), dec!(46000));
        assert_eq!(adjusted.other_income(), dec!(2000));
        assert_eq!(adjusted.wages(), dec!(120000));
        assert_eq!(adjusted.itemized_deductions(), dec!(12000));
    }

    #[test]
    fn apply_floors_lines_at_zero() {
        let selection = StrategySelection::parse("costseg=90000;oilgas=9000").unwrap();

        let adjusted = selection.apply(&client()).unwrap();

        assert_eq!(adjusted.business_profit(), dec!(0));
        assert_eq!(adjusted.other_income(), dec!(0));
    }

    #[test]
    fn apply_empty_selection_is_identity() {
        let input = client();

        assert_eq!(StrategySelection::new().apply(&input), Ok(input));
    }

    #[test]
    fn isolate_keeps_only_one_entry() {
        let entry = StrategyAmount {
            strategy: Strategy::FamilyManagementCompany,
            amount: dec!(8000),
        };

        let selection = StrategySelection::isolate(entry);

        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![&entry]);
    }
}
