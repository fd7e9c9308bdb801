//! Error Handling Module
//!
//! Errors raised by the unit codec. Both variants mean the caller passed
//! malformed input; nothing here is retryable.

use thiserror::Error;

/// Unit codec errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// Amount is not a decimal string representable with the requested precision
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Byte or string data does not fit the requested encoding
    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// Result type for unit conversions
pub type UnitResult<T> = std::result::Result<T, UnitError>;
