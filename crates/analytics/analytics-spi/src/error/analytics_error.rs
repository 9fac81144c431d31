//! Analytics error types.

use thiserror::Error;

/// Errors returned by the analytics engine.
///
/// Zero portfolio volatility is not an error: the Sharpe ratio is reported
/// as 0 in that case.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    /// Fewer observations or holdings than the computation requires.
    #[error("Insufficient data for {context}: need at least {required}, got {actual}")]
    InsufficientData {
        context: String,
        required: usize,
        actual: usize,
    },

    /// A holding weight is non-positive or non-finite.
    #[error("Invalid weight for '{symbol}': {weight}")]
    InvalidWeight { symbol: String, weight: f64 },

    /// Invalid configuration or call parameter.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// A collaborator lookup failed.
    #[error("Source '{source_name}' unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },
}

impl AnalyticsError {
    pub fn insufficient(context: impl Into<String>, required: usize, actual: usize) -> Self {
        Self::InsufficientData {
            context: context.into(),
            required,
            actual,
        }
    }

    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn source_unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Whether this failure means "not enough history".
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}

/// Result type alias for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;
