//! Error types shared across the exchange crates
//!
//! Error taxonomy using thiserror

use thiserror::Error;

/// Errors raised while constructing decimal value types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumericError {
    #[error("Invalid decimal: {0}")]
    InvalidDecimal(String),

    #[error("Price must be positive, got {0}")]
    NonPositivePrice(String),

    #[error("Quantity must not be negative, got {0}")]
    NegativeQuantity(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_error_display() {
        let err = NumericError::NonPositivePrice("-1".to_string());
        assert_eq!(err.to_string(), "Price must be positive, got -1");
    }
}
