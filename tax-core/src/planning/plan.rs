//! Baseline versus scenario planning reports.
//!
//! The baseline is the client's facts as filed. The scenario applies the
//! selected strategies and, when elected, the S-Corp branch. Both are
//! extended with state tax and prior payments so the report can show what
//! is still owed under each.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculations::TaxEngine;
use crate::planning::{StateTaxRate, Strategy, StrategyAmount, StrategySelection};
use crate::{TaxCalculationInput, TaxCalculationResult, TaxError};

/// Federal withholding and estimated payments already made for the year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PaymentsRecord")]
pub struct Payments {
    withholding: Decimal,
    estimated_payments: Decimal,
}

#[derive(Deserialize)]
struct PaymentsRecord {
    #[serde(default)]
    withholding: Decimal,
    #[serde(default)]
    estimated_payments: Decimal,
}

impl TryFrom<PaymentsRecord> for Payments {
    type Error = TaxError;

    fn try_from(record: PaymentsRecord) -> Result<Self, Self::Error> {
        Self::new(record.withholding, record.estimated_payments)
    }
}

impl Payments {
    /// # Errors
    ///
    /// Returns [`TaxError::NegativeAmount`] if either amount is negative.
    pub fn new(
        withholding: Decimal,
        estimated_payments: Decimal,
    ) -> Result<Self, TaxError> {
        for (field, amount) in [
            ("withholding", withholding),
            ("estimated_payments", estimated_payments),
        ] {
            if amount < Decimal::ZERO {
                return Err(TaxError::NegativeAmount { field, amount });
            }
        }
        Ok(Self {
            withholding,
            estimated_payments,
        })
    }

    pub fn withholding(&self) -> Decimal {
        self.withholding
    }

    pub fn estimated_payments(&self) -> Decimal {
        self.estimated_payments
    }

    pub fn total(&self) -> Decimal {
        self.withholding + self.estimated_payments
    }
}

/// Everything needed to compare a client's baseline against a scenario.
///
/// Any S-Corp election on `client` is ignored; the scenario's election is
/// taken from `reasonable_compensation` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanRequest {
    pub client: TaxCalculationInput,
    pub state: StateTaxRate,
    pub payments: Payments,
    pub strategies: StrategySelection,
    /// `Some` elects S-Corp treatment with this reasonable compensation.
    pub reasonable_compensation: Option<Decimal>,
}

impl PlanRequest {
    /// A request with no state tax, payments, strategies or election.
    pub fn new(client: TaxCalculationInput) -> Self {
        Self {
            client,
            state: StateTaxRate::none(),
            payments: Payments::default(),
            strategies: StrategySelection::new(),
            reasonable_compensation: None,
        }
    }

    pub fn s_corp_election(&self) -> bool {
        self.reasonable_compensation.is_some()
    }

    fn baseline_input(&self) -> Result<TaxCalculationInput, TaxError> {
        self.client.to_builder().sole_proprietor().build()
    }

    fn scenario_input(
        &self,
        strategies: &StrategySelection,
        elect_s_corp: bool,
    ) -> Result<TaxCalculationInput, TaxError> {
        let adjusted = strategies.apply(&self.baseline_input()?)?;
        match self.reasonable_compensation {
            Some(rc) if elect_s_corp => adjusted.to_builder().s_corp(rc).build(),
            _ => Ok(adjusted),
        }
    }
}

/// One side of the comparison: the engine result plus state tax and payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub result: TaxCalculationResult,
    pub state_tax: Decimal,
    /// Federal + SE + state.
    pub combined_tax: Decimal,
    /// Combined tax less payments; negative is a refund.
    pub net_due: Decimal,
}

impl ScenarioOutcome {
    fn new(
        result: TaxCalculationResult,
        state: &StateTaxRate,
        payments: &Payments,
    ) -> Self {
        let state_tax = state.tax_on(result.taxable_income);
        let combined_tax = result.total_tax + state_tax;
        Self {
            result,
            state_tax,
            combined_tax,
            net_due: combined_tax - payments.total(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    TaxableIncome,
    FederalTax,
    StateTax,
    SelfEmploymentTax,
    QbiDeduction,
    TotalTax,
    NetDue,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::TaxableIncome,
        Metric::FederalTax,
        Metric::StateTax,
        Metric::SelfEmploymentTax,
        Metric::QbiDeduction,
        Metric::TotalTax,
        Metric::NetDue,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::TaxableIncome => "Taxable Income",
            Self::FederalTax => "Federal Tax",
            Self::StateTax => "State Tax",
            Self::SelfEmploymentTax => "SE Tax",
            Self::QbiDeduction => "QBI Deduction",
            Self::TotalTax => "Total Tax",
            Self::NetDue => "Net Due / Refund",
        }
    }

    fn value(
        &self,
        outcome: &ScenarioOutcome,
    ) -> Decimal {
        match self {
            Self::TaxableIncome => outcome.result.taxable_income,
            Self::FederalTax => outcome.result.federal_tax,
            Self::StateTax => outcome.state_tax,
            Self::SelfEmploymentTax => outcome.result.self_employment_tax,
            Self::QbiDeduction => outcome.result.qbi_deduction,
            Self::TotalTax => outcome.combined_tax,
            Self::NetDue => outcome.net_due,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub metric: Metric,
    pub baseline: Decimal,
    pub scenario: Decimal,
    /// Scenario − baseline.
    pub delta: Decimal,
}

/// What a single change is worth on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributionSource {
    Strategy(Strategy),
    SCorpElection,
}

impl fmt::Display for AttributionSource {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Strategy(strategy) => write!(f, "{strategy}"),
            Self::SCorpElection => f.write_str("S-Corp Election"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyAttribution {
    pub source: AttributionSource,
    /// The deduction claimed, or the reasonable compensation for the election.
    pub amount: Decimal,
    pub combined_tax: Decimal,
    /// Baseline combined − isolated combined.
    pub savings: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanReport {
    pub tax_year: i32,
    pub baseline: ScenarioOutcome,
    pub scenario: ScenarioOutcome,
    /// Baseline combined − scenario combined.
    pub savings: Decimal,
    /// Baseline net due − scenario net due.
    pub net_due_difference: Decimal,
    pub rows: Vec<ComparisonRow>,
    pub attribution: Vec<StrategyAttribution>,
}

impl PlanReport {
    pub fn row(
        &self,
        metric: Metric,
    ) -> Option<&ComparisonRow> {
        self.rows.iter().find(|row| row.metric == metric)
    }
}

impl TaxEngine<'_> {
    /// Runs the baseline and the scenario for `request` and compares them.
    ///
    /// # Errors
    ///
    /// Propagates [`TaxError::InvalidFilingStatus`] when the tables lack the
    /// client's status, and input validation errors from the rebuilt inputs.
    pub fn plan(
        &self,
        request: &PlanRequest,
    ) -> Result<PlanReport, TaxError> {
        let baseline = self.outcome(&request.baseline_input()?, request)?;
        let scenario = self.outcome(
            &request.scenario_input(&request.strategies, true)?,
            request,
        )?;

        let rows = Metric::ALL
            .into_iter()
            .map(|metric| {
                let base = metric.value(&baseline);
                let scen = metric.value(&scenario);
                ComparisonRow {
                    metric,
                    baseline: base,
                    scenario: scen,
                    delta: scen - base,
                }
            })
            .collect();

        let attribution = self.attribution(request, &baseline)?;
        let savings = baseline.combined_tax - scenario.combined_tax;

        info!(
            status = %request.client.filing_status(),
            strategies = request.strategies.len(),
            s_corp = request.s_corp_election(),
            savings = %savings,
            "Plan evaluated"
        );

        Ok(PlanReport {
            tax_year: self.tables().tax_year(),
            net_due_difference: baseline.net_due - scenario.net_due,
            savings,
            baseline,
            scenario,
            rows,
            attribution,
        })
    }

    fn outcome(
        &self,
        input: &TaxCalculationInput,
        request: &PlanRequest,
    ) -> Result<ScenarioOutcome, TaxError> {
        let result = self.scenario(input)?;
        Ok(ScenarioOutcome::new(result, &request.state, &request.payments))
    }

    fn attribution(
        &self,
        request: &PlanRequest,
        baseline: &ScenarioOutcome,
    ) -> Result<Vec<StrategyAttribution>, TaxError> {
        let mut entries = Vec::with_capacity(request.strategies.len() + 1);

        for &entry in request.strategies.iter() {
            let StrategyAmount { strategy, amount } = entry;
            let isolated = request.scenario_input(&StrategySelection::isolate(entry), false)?;
            let outcome = self.outcome(&isolated, request)?;
            debug!(%strategy, %amount, combined_tax = %outcome.combined_tax, "strategy isolated");

            entries.push(StrategyAttribution {
                source: AttributionSource::Strategy(strategy),
                amount,
                combined_tax: outcome.combined_tax,
                savings: baseline.combined_tax - outcome.combined_tax,
            });
        }

        if let Some(rc) = request.reasonable_compensation {
            let isolated = request.scenario_input(&StrategySelection::new(), true)?;
            let outcome = self.outcome(&isolated, request)?;

            entries.push(StrategyAttribution {
                source: AttributionSource::SCorpElection,
                amount: rc,
                combined_tax: outcome.combined_tax,
                savings: baseline.combined_tax - outcome.combined_tax,
            });
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{FilingStatus, TaxTables};

    fn client() -> TaxCalculationInput {
        TaxCalculationInput::builder(FilingStatus::MarriedFilingJointly)
            .wages(dec!(120000))
            .business_profit(dec!(60000))
            .other_income(dec!(5000))
            .itemized_deductions(dec!(12000))
            .build()
            .unwrap()
    }

    // =========================================================================
    // Payments tests
    // =========================================================================

    #[test]
    fn payments_total() {
        let payments = Payments::new(dec!(18000), dec!(4000)).unwrap();

        assert_eq!(payments.total(), dec!(22000));
    }

    #[test]
    fn payments_reject_negative() {
        assert_eq!(
            Payments::new(dec!(0), dec!(-10)),
            Err(TaxError::NegativeAmount {
                field: "estimated_payments",
                amount: dec!(-10),
            })
        );
    }

    #[test]
    fn payments_deserialize_through_validation() {
        let payments = Payments::new(dec!(18000), dec!(4000)).unwrap();
        let json = serde_json::to_string(&payments).unwrap();

        assert_eq!(serde_json::from_str::<Payments>(&json).unwrap(), payments);

        let err = serde_json::from_str::<Payments>(
            r#"{"withholding":"-500","estimated_payments":"0"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("withholding must not be negative"), "{err}");
    }

    // =========================================================================
    // plan tests
    // =========================================================================

    #[test]
    fn s_corp_only_plan() {
        let tables = TaxTables::tax_year_2024();
        let engine = TaxEngine::new(&tables);
        let request = PlanRequest {
            reasonable_compensation: Some(dec!(72000)),
            ..PlanRequest::new(client())
        };

        let report = engine.plan(&request).unwrap();

        assert_eq!(report.tax_year, 2024);
        assert_eq!(report.baseline.combined_tax, dec!(30219.73));
        assert_eq!(report.scenario.combined_tax, dec!(27022.00));
        assert_eq!(report.savings, dec!(3197.73));
        assert_eq!(report.net_due_difference, dec!(3197.73));
        assert_eq!(
            report.attribution,
            vec![StrategyAttribution {
                source: AttributionSource::SCorpElection,
                amount: dec!(72000),
                combined_tax: dec!(27022.00),
                savings: dec!(3197.73),
            }]
        );
    }

    #[test]
    fn comparison_rows_with_state_and_payments() {
        let tables = TaxTables::tax_year_2024();
        let engine = TaxEngine::new(&tables);
        let request = PlanRequest {
            state: StateTaxRate::preset("Ohio").unwrap(),
            payments: Payments::new(dec!(25000), dec!(2000)).unwrap(),
            reasonable_compensation: Some(dec!(72000)),
            ..PlanRequest::new(client())
        };

        let report = engine.plan(&request).unwrap();

        // Ohio 3.5%: 143,800 → 5,033; 167,800 → 5,873
        let rows: Vec<(&str, Decimal, Decimal, Decimal)> = report
            .rows
            .iter()
            .map(|r| (r.metric.label(), r.baseline, r.scenario, r.delta))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Taxable Income", dec!(143800), dec!(167800), dec!(24000)),
                ("Federal Tax", dec!(21742.00), dec!(27022.00), dec!(5280.00)),
                ("State Tax", dec!(5033.00), dec!(5873.00), dec!(840.00)),
                ("SE Tax", dec!(8477.73), dec!(0), dec!(-8477.73)),
                ("QBI Deduction", dec!(12000), dec!(0), dec!(-12000)),
                ("Total Tax", dec!(35252.73), dec!(32895.00), dec!(-2357.73)),
                ("Net Due / Refund", dec!(8252.73), dec!(5895.00), dec!(-2357.73)),
            ]
        );
        assert_eq!(report.savings, dec!(2357.73));
    }

    #[test]
    fn refund_is_negative_net_due() {
        let tables = TaxTables::tax_year_2024();
        let engine = TaxEngine::new(&tables);
        let request = PlanRequest {
            payments: Payments::new(dec!(40000), dec!(0)).unwrap(),
            ..PlanRequest::new(client())
        };

        let report = engine.plan(&request).unwrap();

        assert_eq!(report.baseline.net_due, dec!(-9780.27));
        assert_eq!(report.row(Metric::NetDue).unwrap().baseline, dec!(-9780.27));
    }

    #[test]
    fn empty_request_has_no_savings() {
        let tables = TaxTables::tax_year_2024();
        let engine = TaxEngine::new(&tables);

        let report = engine.plan(&PlanRequest::new(client())).unwrap();

        assert_eq!(report.baseline, report.scenario);
        assert_eq!(report.savings, dec!(0));
        assert!(report.attribution.is_empty());
        assert!(report.rows.iter().all(|r| r.delta == dec!(0)));
    }

    #[test]
    fn election_on_client_input_is_ignored() {
        let tables = TaxTables::tax_year_2024();
        let engine = TaxEngine::new(&tables);
        let elected = client().to_builder().s_corp(dec!(72000)).build().unwrap();

        let report = engine.plan(&PlanRequest::new(elected)).unwrap();

        assert_eq!(report.scenario.result.self_employment_tax, dec!(8477.73));
        assert_eq!(report.savings, dec!(0));
    }

    #[test]
    fn strategy_reduces_profit_and_se_tax() {
        let tables = TaxTables::tax_year_2024();
        let engine = TaxEngine::new(&tables);
        let request = PlanRequest {
            strategies: StrategySelection::parse("augusta=10000").unwrap(),
            ..PlanRequest::new(client())
        };

        let report = engine.plan(&request).unwrap();

        // Profit 50,000: SE 7,064.78; pre-QBI 145,800, QBI 10,000,
        // taxable 135,800, federal 19,982.
        assert_eq!(report.scenario.result.self_employment_tax, dec!(7064.78));
        assert_eq!(report.scenario.result.qbi_deduction, dec!(10000));
        assert_eq!(report.scenario.result.taxable_income, dec!(135800));
        assert_eq!(report.scenario.result.federal_tax, dec!(19982.00));
        assert_eq!(report.savings, dec!(3172.95));
        assert_eq!(report.attribution[0].savings, report.savings);
    }

    #[test]
    fn oil_and_gas_reduces_other_income_only() {
        let tables = TaxTables::tax_year_2024();
        let engine = TaxEngine::new(&tables);
        let request = PlanRequest {
            strategies: StrategySelection::parse("oilgas=5000").unwrap(),
            ..PlanRequest::new(client())
        };

        let report = engine.plan(&request).unwrap();

        assert_eq!(
            report.scenario.result.self_employment_tax,
            report.baseline.result.self_employment_tax
        );
        // 5,000 less taxable income at 22%
        assert_eq!(report.savings, dec!(1100.00));
    }

    #[test]
    fn attribution_is_independent_of_selection_order() {
        let tables = TaxTables::tax_year_2024();
        let engine = TaxEngine::new(&tables);
        let forward = PlanRequest {
            strategies: StrategySelection::parse("augusta=14000;costseg=20000;oilgas=3000")
                .unwrap(),
            reasonable_compensation: Some(dec!(30000)),
            ..PlanRequest::new(client())
        };
        let reversed = PlanRequest {
            strategies: StrategySelection::parse("oilgas=3000;costseg=20000;augusta=14000")
                .unwrap(),
            ..forward.clone()
        };

        let mut a = engine.plan(&forward).unwrap().attribution;
        let mut b = engine.plan(&reversed).unwrap().attribution;
        a.sort_by_key(|e| e.source.to_string());
        b.sort_by_key(|e| e.source.to_string());

        assert_eq!(a, b);
        assert_eq!(a.len(), 4);
    }

    #[test]
    fn attribution_isolates_each_strategy_without_election() {
        let tables = TaxTables::tax_year_2024();
        let engine = TaxEngine::new(&tables);
        let request = PlanRequest {
            strategies: StrategySelection::parse("oilgas=5000").unwrap(),
            reasonable_compensation: Some(dec!(72000)),
            ..PlanRequest::new(client())
        };

        let report = engine.plan(&request).unwrap();

        assert_eq!(report.attribution[0].source, AttributionSource::Strategy(Strategy::OilAndGas));
        assert_eq!(report.attribution[0].savings, dec!(1100.00));
        assert_eq!(report.attribution[1].source, AttributionSource::SCorpElection);
        assert_eq!(report.attribution[1].savings, dec!(3197.73));
    }

    #[test]
    fn missing_status_propagates() {
        let tables = TaxTables::tax_year_2024();
        let mut statuses = std::collections::BTreeMap::new();
        statuses.insert(
            FilingStatus::Single,
            tables.status_table(FilingStatus::Single).unwrap().clone(),
        );
        let partial = TaxTables::new(
            2024,
            statuses,
            tables.self_employment().clone(),
            tables.qbi_rate(),
        )
        .unwrap();
        let engine = TaxEngine::new(&partial);

        assert_eq!(
            engine.plan(&PlanRequest::new(client())),
            Err(TaxError::InvalidFilingStatus("MFJ".to_string()))
        );
    }
}
