//! Loading tax-year tables and client batches from disk.
//!
//! | Module | Format | Produces |
//! |--------|--------|----------|
//! | [`tables`] | TOML (optionally with a bracket CSV) | [`tax_core::TaxTables`] |
//! | [`brackets`] | CSV with IRS schedule codes | [`tax_core::BracketSchedule`] per status |
//! | [`clients`] | CSV, one client per row | [`ClientPlan`] |

pub mod brackets;
pub mod clients;
pub mod tables;

pub use brackets::{TaxBracketLoader, TaxBracketLoaderError, TaxBracketRecord};
pub use clients::{ClientLoadError, ClientPlan};
pub use tables::{TaxTablesFile, TaxTablesLoadError};
