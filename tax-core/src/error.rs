use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by the tax engine and the planning layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxError {
    /// The filing status code is unknown, or the loaded tables do not cover it.
    #[error("invalid filing status '{0}'")]
    InvalidFilingStatus(String),

    /// A monetary input was negative.
    #[error("{field} must not be negative, got {amount}")]
    NegativeAmount { field: &'static str, amount: Decimal },

    /// A bracket schedule violates its ordering invariants.
    #[error("invalid bracket schedule: {0}")]
    InvalidBracketSchedule(String),

    /// A self-employment constant is outside its valid range.
    #[error("invalid self-employment config: {0}")]
    InvalidSelfEmploymentConfig(String),

    /// The QBI deduction rate must be between 0 and 1.
    #[error("QBI rate must be between 0 and 1, got {0}")]
    InvalidQbiRate(Decimal),

    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),

    #[error("unknown state '{0}'")]
    UnknownState(String),

    /// Custom state rates are accepted between 0% and 15%.
    #[error("state tax rate must be between 0% and 15%, got {0}%")]
    InvalidStateRate(Decimal),
}
