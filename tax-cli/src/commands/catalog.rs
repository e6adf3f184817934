//! Strategies and states commands - reference listings

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tax_core::planning::{DeductionTarget, StateTaxRate, Strategy};

use crate::commands::print_json;
use crate::format::format_percent;

#[derive(Args, Debug)]
pub struct StrategiesCommand {
    /// Include authority, references and the record-keeping checklist
    #[arg(long)]
    detail: bool,
}

#[derive(Debug, Serialize)]
struct StrategyView {
    code: &'static str,
    name: &'static str,
    reduces: DeductionTarget,
    summary: &'static str,
    authority: &'static str,
    references: Vec<Reference>,
    checklist: &'static [&'static str],
}

#[derive(Debug, Serialize)]
struct Reference {
    label: &'static str,
    url: &'static str,
}

impl From<Strategy> for StrategyView {
    fn from(strategy: Strategy) -> Self {
        Self {
            code: strategy.code(),
            name: strategy.name(),
            reduces: strategy.target(),
            summary: strategy.summary(),
            authority: strategy.authority(),
            references: strategy
                .references()
                .iter()
                .map(|&(label, url)| Reference { label, url })
                .collect(),
            checklist: strategy.checklist(),
        }
    }
}

#[derive(Debug, Clone, Tabled)]
struct StrategyRow {
    #[tabled(rename = "Code")]
    code: &'static str,
    #[tabled(rename = "Strategy")]
    name: &'static str,
    #[tabled(rename = "Reduces")]
    reduces: &'static str,
    #[tabled(rename = "Summary")]
    summary: &'static str,
}

fn target_label(target: DeductionTarget) -> &'static str {
    match target {
        DeductionTarget::BusinessProfit => "Business profit",
        DeductionTarget::OtherIncome => "Other income",
    }
}

impl StrategiesCommand {
    pub fn exec(
        &self,
        json: bool,
    ) -> Result<()> {
        if json {
            let views: Vec<StrategyView> = Strategy::ALL.into_iter().map(Into::into).collect();
            return print_json(&views);
        }

        let rows: Vec<StrategyRow> = Strategy::ALL
            .into_iter()
            .map(|s| StrategyRow {
                code: s.code(),
                name: s.name(),
                reduces: target_label(s.target()),
                summary: s.summary(),
            })
            .collect();

        println!();
        println!("TAX STRATEGIES");
        println!();
        println!("{}", Table::new(rows).with(Style::rounded()));

        if self.detail {
            for strategy in Strategy::ALL {
                println!();
                println!("{} ({})", strategy.name(), strategy.authority());
                for (label, url) in strategy.references() {
                    println!("  - {label}: {url}");
                }
                println!("  Records to keep:");
                for item in strategy.checklist() {
                    println!("    * {item}");
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Tabled)]
struct StateRow {
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

fn state_rows() -> Vec<StateRow> {
    StateTaxRate::presets()
        .iter()
        .map(|s| StateRow {
            state: s.name().to_string(),
            rate: format_percent(s.percent()),
        })
        .collect()
}

pub fn list_states(json: bool) -> Result<()> {
    if json {
        return print_json(&StateTaxRate::presets());
    }

    println!();
    println!("STATE PRESETS");
    println!();
    println!("{}", Table::new(state_rows()).with(Style::rounded()));
    println!();
    println!("Use --state-rate for any other state (0-15%).");
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_state_rows_format_percentages() {
        let rows = state_rows();

        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0].state, "Ohio");
        assert_eq!(rows[0].rate, "3.5%");
        assert_eq!(rows[1].rate, "3.07%");
        assert_eq!(rows[2].rate, "0%");
    }

    #[test]
    fn test_strategy_view_json() {
        let view = StrategyView::from(Strategy::OilAndGas);

        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["code"], "oilgas");
        assert_eq!(json["reduces"], "OtherIncome");
        assert_eq!(json["references"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_target_labels() {
        assert_eq!(target_label(Strategy::AugustaRule.target()), "Business profit");
        assert_eq!(target_label(Strategy::OilAndGas.target()), "Other income");
    }
}
