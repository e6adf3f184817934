//! Compare command - baseline versus scenario for a single client

use anyhow::{Context, Result};
use clap::Args;
use rust_decimal::Decimal;
use tabled::{Table, Tabled};
use tax_core::planning::{
    Payments, PlanReport, PlanRequest, StateTaxRate, Strategy, StrategySelection,
};
use tax_core::{FilingStatus, TaxCalculationInput, TaxEngine, TaxError, TaxTables};
use tracing::warn;

use crate::commands::{money_table, print_json};
use crate::format::{format_percent, format_usd, format_usd_signed};

#[derive(Args, Debug)]
pub struct CompareCommand {
    /// Filing status code: S, MFJ or HOH
    #[arg(short, long, default_value = "S")]
    status: FilingStatus,

    /// W-2 wages
    #[arg(long, default_value = "0")]
    wages: Decimal,

    /// Schedule C net profit
    #[arg(long, default_value = "0")]
    business_profit: Decimal,

    /// Interest, dividends and other ordinary income
    #[arg(long, default_value = "0")]
    other_income: Decimal,

    /// Total itemized deductions
    #[arg(long, default_value = "0")]
    itemized: Decimal,

    /// State preset, e.g. "Ohio" (see `tax-planner states`)
    #[arg(long, conflicts_with = "state_rate")]
    state: Option<String>,

    /// Custom state rate as a percentage between 0 and 15
    #[arg(long)]
    state_rate: Option<Decimal>,

    /// Federal income tax withheld
    #[arg(long, default_value = "0")]
    withholding: Decimal,

    /// Estimated tax payments made
    #[arg(long, default_value = "0")]
    estimated_payments: Decimal,

    /// Strategy deduction as code=amount, e.g. augusta=14000 (repeatable)
    #[arg(long = "strategy", value_name = "CODE=AMOUNT")]
    strategies: Vec<String>,

    /// Elect S-Corp treatment in the scenario
    #[arg(long)]
    s_corp: bool,

    /// Owner's reasonable compensation under the S-Corp election
    #[arg(long, requires = "s_corp")]
    reasonable_comp: Option<Decimal>,
}

impl CompareCommand {
    pub fn exec(
        &self,
        tables: &TaxTables,
        json: bool,
    ) -> Result<()> {
        let request = self.to_request().context("Invalid plan inputs")?;
        let report = TaxEngine::new(tables)
            .plan(&request)
            .context("Failed to evaluate plan")?;

        if json {
            print_json(&report)
        } else {
            print_report(&report, &request);
            Ok(())
        }
    }

    fn to_request(&self) -> Result<PlanRequest, TaxError> {
        let client = TaxCalculationInput::builder(self.status)
            .wages(self.wages)
            .business_profit(self.business_profit)
            .other_income(self.other_income)
            .itemized_deductions(self.itemized)
            .build()?;

        let state = match (&self.state, self.state_rate) {
            (_, Some(percent)) => StateTaxRate::custom(percent)?,
            (Some(name), None) => StateTaxRate::preset(name)?,
            (None, None) => StateTaxRate::none(),
        };

        let strategies = StrategySelection::parse(&self.strategies.join(";"))?;

        let reasonable_compensation = if self.s_corp {
            if self.reasonable_comp.is_none() {
                warn!("S-Corp elected without --reasonable-comp; assuming zero owner wage");
            }
            Some(self.reasonable_comp.unwrap_or(Decimal::ZERO))
        } else {
            None
        };

        Ok(PlanRequest {
            client,
            state,
            payments: Payments::new(self.withholding, self.estimated_payments)?,
            strategies,
            reasonable_compensation,
        })
    }
}

#[derive(Debug, Clone, Tabled)]
struct ComparisonDisplayRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Baseline")]
    baseline: String,
    #[tabled(rename = "Scenario")]
    scenario: String,
    #[tabled(rename = "Change")]
    change: String,
}

#[derive(Debug, Clone, Tabled)]
struct AttributionDisplayRow {
    #[tabled(rename = "Change")]
    source: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Total Tax")]
    combined_tax: String,
    #[tabled(rename = "Savings")]
    savings: String,
}

fn comparison_rows(report: &PlanReport) -> Vec<ComparisonDisplayRow> {
    report
        .rows
        .iter()
        .map(|row| ComparisonDisplayRow {
            metric: row.metric.label(),
            baseline: format_usd(row.baseline),
            scenario: format_usd(row.scenario),
            change: format_usd_signed(row.delta),
        })
        .collect()
}

fn attribution_rows(report: &PlanReport) -> Vec<AttributionDisplayRow> {
    report
        .attribution
        .iter()
        .map(|entry| AttributionDisplayRow {
            source: entry.source.to_string(),
            amount: format_usd(entry.amount),
            combined_tax: format_usd(entry.combined_tax),
            savings: format_usd_signed(entry.savings),
        })
        .collect()
}

fn print_report(
    report: &PlanReport,
    request: &PlanRequest,
) {
    println!();
    println!(
        "TAX PLAN ({}, {})",
        report.tax_year,
        request.client.filing_status().label()
    );
    println!(
        "State: {} ({})",
        request.state.name(),
        format_percent(request.state.percent())
    );
    println!();

    println!("{}", money_table(&mut Table::new(comparison_rows(report))));
    println!();
    println!("Estimated savings: {}", format_usd(report.savings));
    if report.scenario.net_due < Decimal::ZERO {
        println!("Scenario refund:   {}", format_usd(-report.scenario.net_due));
    } else {
        println!("Scenario balance:  {}", format_usd(report.scenario.net_due));
    }

    if !report.attribution.is_empty() {
        println!();
        println!("SAVINGS BY CHANGE (each applied on its own)");
        println!();
        println!("{}", money_table(&mut Table::new(attribution_rows(report))));
    }

    let unused: Vec<&str> = Strategy::ALL
        .iter()
        .filter(|s| request.strategies.amount(**s).is_none())
        .map(|s| s.code())
        .collect();
    if !unused.is_empty() && !request.strategies.is_empty() {
        println!();
        println!("Other strategies to consider: {}", unused.join(", "));
    }
}
