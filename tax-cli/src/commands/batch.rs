//! Batch command - plan every client in a CSV file

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{Table, Tabled};
use tax_core::planning::PlanReport;
use tax_core::{TaxEngine, TaxTables};
use tax_data::{ClientPlan, clients};
use tracing::info;

use crate::commands::{money_table, print_json};
use crate::format::{format_usd, format_usd_signed};

#[derive(Args, Debug)]
pub struct BatchCommand {
    /// Client CSV file, one planning request per row
    #[arg(short, long)]
    file: PathBuf,
}

#[derive(Debug, Serialize)]
struct ClientReport<'a> {
    client: &'a str,
    report: PlanReport,
}

#[derive(Debug, Clone, Tabled)]
struct BatchRow {
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Baseline Tax")]
    baseline: String,
    #[tabled(rename = "Scenario Tax")]
    scenario: String,
    #[tabled(rename = "Savings")]
    savings: String,
    #[tabled(rename = "Net Due / Refund")]
    net_due: String,
}

impl BatchCommand {
    pub fn exec(
        &self,
        tables: &TaxTables,
        json: bool,
    ) -> Result<()> {
        let plans = clients::load_from_file(&self.file)
            .with_context(|| format!("Failed to load clients: {}", self.file.display()))?;
        let reports = run(tables, &plans)?;
        info!(clients = reports.len(), "Batch evaluated");

        if json {
            return print_json(&reports);
        }

        if reports.is_empty() {
            println!("No clients found in {}", self.file.display());
            return Ok(());
        }

        let total: Decimal = reports.iter().map(|r| r.report.savings).sum();
        let rows: Vec<BatchRow> = reports
            .iter()
            .zip(&plans)
            .map(|(r, plan)| BatchRow {
                client: r.client.to_string(),
                status: plan.request.client.filing_status().as_str(),
                baseline: format_usd(r.report.baseline.combined_tax),
                scenario: format_usd(r.report.scenario.combined_tax),
                savings: format_usd_signed(r.report.savings),
                net_due: format_usd(r.report.scenario.net_due),
            })
            .collect();

        println!();
        println!("BATCH PLAN ({} clients)", rows.len());
        println!();
        println!("{}", money_table(&mut Table::new(rows)));
        println!();
        println!("Total estimated savings: {}", format_usd(total));

        Ok(())
    }
}

fn run<'a>(
    tables: &TaxTables,
    plans: &'a [ClientPlan],
) -> Result<Vec<ClientReport<'a>>> {
    let engine = TaxEngine::new(tables);
    plans
        .iter()
        .map(|plan| {
            let report = engine
                .plan(&plan.request)
                .with_context(|| format!("Failed to plan client '{}'", plan.client))?;
            Ok(ClientReport {
                client: &plan.client,
                report,
            })
        })
        .collect()
}
