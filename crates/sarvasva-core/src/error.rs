use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SarvasvaError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Non-convergent: {function} did not settle after {iterations} iterations (residual: {residual})")]
    NonConvergent {
        function: String,
        iterations: u32,
        residual: Decimal,
    },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for SarvasvaError {
    fn from(e: serde_json::Error) -> Self {
        SarvasvaError::SerializationError(e.to_string())
    }
}
