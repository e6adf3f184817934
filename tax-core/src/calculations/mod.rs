//! The tax computation engine.
//!
//! Every calculation is a method on [`TaxEngine`], a borrowed view over a set
//! of [`TaxTables`](crate::TaxTables). Each operation lives in its own module:
//!
//! | Module            | Operation |
//! |-------------------|-----------|
//! | `taxable_income`  | Income less the greater of standard or itemized deduction |
//! | `federal`         | Progressive bracket tax |
//! | `self_employment` | Social Security + Medicare on business profit |
//! | `qbi`             | Simplified qualified business income deduction |
//! | `scenario`        | Baseline and scenario composition |
//!
//! All monetary results are rounded to cents at each operation's return, so
//! rounding compounds through the taxable income → QBI → federal tax chain.

pub mod common;
mod engine;
mod federal;
mod qbi;
mod scenario;
mod self_employment;
mod taxable_income;

pub use engine::TaxEngine;
pub use self_employment::SelfEmploymentTax;
