use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("invalid amount: {amount}")]
    InvalidAmount {
        amount: f64,
    },

    #[error("invalid rate: {rate}")]
    InvalidRate {
        rate: f64,
    },

    #[error("invalid tenure: {tenure}")]
    InvalidTenure {
        tenure: u32,
    },

    #[error("invalid month number: {month}")]
    InvalidMonth {
        month: u32,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: f64,
    },

    #[error("worker unavailable: {message}")]
    WorkerUnavailable {
        message: String,
    },

    #[error("worker response timed out after {waited_ms}ms")]
    ResponseTimeout {
        waited_ms: u64,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LoanError>;
