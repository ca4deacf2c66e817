//! Error types for fx-profit

use thiserror::Error;

/// Reasons an analysis request is rejected before any rates are fetched
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Initial capital must be greater than zero.")]
    NonPositiveCapital,

    #[error("Start date cannot be later than today.")]
    StartDateInFuture,

    #[error("End date cannot be later than today.")]
    EndDateInFuture,

    #[error("Start date cannot be later than end date.")]
    StartAfterEnd,
}

/// Main error type for fx-profit
#[derive(Error, Debug)]
pub enum FxProfitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to fetch exchange rates. Please try again later.")]
    NoData,

    #[error("Could not find the most profitable currency for the given period.")]
    NoProfitableCurrency,

    #[error("Numeric overflow while computing {context}")]
    NumericOverflow { context: String },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl FxProfitError {
    /// Shorthand for an overflow raised while computing `context`
    pub fn overflow(context: impl Into<String>) -> Self {
        FxProfitError::NumericOverflow {
            context: context.into(),
        }
    }
}

/// Result type alias for fx-profit operations
pub type Result<T> = std::result::Result<T, FxProfitError>;
