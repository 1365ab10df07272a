pub mod error;
pub mod products;
pub mod time_value;
pub mod types;

#[cfg(feature = "emi")]
pub mod emi;

#[cfg(feature = "prepayment")]
pub mod prepayment;

#[cfg(feature = "eligibility")]
pub mod eligibility;

#[cfg(feature = "comparison")]
pub mod comparison;

pub use error::SarvasvaError;
pub use types::*;

/// Standard result type for all loan calculator operations
pub type SarvasvaResult<T> = Result<T, SarvasvaError>;
