//! Planning layer on top of the engine.
//!
//! | Item | Role |
//! |------|------|
//! | [`Strategy`] | Catalog of deduction strategies and the income line each reduces |
//! | [`StrategySelection`] | Strategies elected for a scenario with their amounts |
//! | [`StateTaxRate`] | Flat state rate, preset or custom |
//! | [`Payments`] | Withholding and estimated payments |
//! | [`PlanRequest`] / [`PlanReport`] | Baseline vs scenario comparison with attribution |

mod plan;
mod state_tax;
pub mod strategy;

pub use plan::{
    AttributionSource, ComparisonRow, Metric, Payments, PlanReport, PlanRequest, ScenarioOutcome,
    StrategyAttribution,
};
pub use state_tax::StateTaxRate;
pub use strategy::{DeductionTarget, Strategy, StrategyAmount, StrategySelection};
