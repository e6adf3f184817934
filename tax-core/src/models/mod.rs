mod filing_status;
mod tax_bracket;
mod tax_input;
mod tax_result;
mod tax_tables;
mod tax_year_config;

pub use filing_status::FilingStatus;
pub use tax_bracket::{BracketSchedule, TaxBracket};
pub use tax_input::{TaxCalculationInput, TaxCalculationInputBuilder};
pub use tax_result::TaxCalculationResult;
pub use tax_tables::{FilingStatusTable, TaxTables};
pub use tax_year_config::SelfEmploymentConfig;
