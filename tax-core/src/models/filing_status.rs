use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TaxError;

/// Taxpayer category selecting the bracket schedule and standard deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FilingStatus {
    Single,
    MarriedFilingJointly,
    HeadOfHousehold,
}

impl FilingStatus {
    pub const ALL: [FilingStatus; 3] = [
        FilingStatus::Single,
        FilingStatus::MarriedFilingJointly,
        FilingStatus::HeadOfHousehold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::MarriedFilingJointly => "MFJ",
            Self::HeadOfHousehold => "HOH",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::MarriedFilingJointly => "Married Filing Jointly",
            Self::HeadOfHousehold => "Head of Household",
        }
    }

    /// Parses a status code (`S`, `MFJ`, `HOH`). Surrounding whitespace and
    /// letter case are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::InvalidFilingStatus`] for any other code; there is
    /// no fallback status.
    ///
    /// ```
    /// use tax_core::{FilingStatus, TaxError};
    ///
    /// assert_eq!(FilingStatus::parse("mfj"), Ok(FilingStatus::MarriedFilingJointly));
    /// assert_eq!(
    ///     FilingStatus::parse("MFS"),
    ///     Err(TaxError::InvalidFilingStatus("MFS".to_string()))
    /// );
    /// ```
    pub fn parse(code: &str) -> Result<Self, TaxError> {
        match code.trim().to_ascii_uppercase().as_str() {
            "S" => Ok(Self::Single),
            "MFJ" => Ok(Self::MarriedFilingJointly),
            "HOH" => Ok(Self::HeadOfHousehold),
            _ => Err(TaxError::InvalidFilingStatus(code.trim().to_string())),
        }
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilingStatus {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FilingStatus {
    type Error = TaxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FilingStatus> for String {
    fn from(status: FilingStatus) -> Self {
        status.as_str().to_string()
    }
}
