//! Error types for the foundation layer

use thiserror::Error;

/// Result type for foundation conversions
pub type TypeResult<T> = std::result::Result<T, TypeError>;

/// Errors raised while constructing foundation types from raw input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Address bytes have the wrong length
    #[error("Invalid address length: expected {expected} bytes, got {actual}")]
    InvalidAddressLength { expected: usize, actual: usize },

    /// Address string is not valid hex
    #[error("Invalid address hex: {0}")]
    InvalidAddressHex(String),

    /// Raw match outcome code outside the defined set
    #[error("Invalid match outcome code: {0}")]
    InvalidOutcome(u8),

    /// Raw tier discriminant outside the defined set
    #[error("Invalid tier discriminant: {0}")]
    InvalidTier(u8),
}

impl TypeError {
    /// Get an error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAddressLength { .. } => "INVALID_ADDRESS_LENGTH",
            Self::InvalidAddressHex(_) => "INVALID_ADDRESS_HEX",
            Self::InvalidOutcome(_) => "INVALID_OUTCOME",
            Self::InvalidTier(_) => "INVALID_TIER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = TypeError::InvalidAddressLength {
            expected: 20,
            actual: 3,
        };
        assert_eq!(err.error_code(), "INVALID_ADDRESS_LENGTH");
        assert_eq!(TypeError::InvalidOutcome(9).error_code(), "INVALID_OUTCOME");
    }

    #[test]
    fn test_error_display() {
        let err = TypeError::InvalidTier(7);
        assert_eq!(err.to_string(), "Invalid tier discriminant: 7");
    }
}
