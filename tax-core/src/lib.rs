pub mod calculations;
pub mod error;
pub mod models;
pub mod planning;

pub use calculations::TaxEngine;
pub use error::TaxError;
pub use models::*;
