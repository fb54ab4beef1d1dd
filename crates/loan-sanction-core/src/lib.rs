pub mod config;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "emi")]
pub mod emi;

#[cfg(feature = "applicant")]
pub mod applicant;

#[cfg(feature = "sanction")]
pub mod sanction;

pub use config::LoanProductConfig;
pub use error::LoanError;
pub use types::*;

#[cfg(feature = "emi")]
pub use emi::quote::{compute_quote, LoanQuote, LoanRequest};

/// Standard result type for all loan-sanction operations
pub type LoanResult<T> = Result<T, LoanError>;
