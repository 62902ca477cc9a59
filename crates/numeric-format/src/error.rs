//! Numeric Format Error Types

use thiserror::Error;

/// Errors produced while parsing a raw reading
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Input was empty or whitespace-only
    #[error("empty input")]
    EmptyInput,

    /// Input did not reduce to a decimal number after stripping
    #[error("not a numeric value: {cleaned:?}")]
    NotNumeric {
        /// What remained after symbol and separator handling
        cleaned: String,
    },
}

/// Contradictions in a [`NumericFormatConfig`](crate::NumericFormatConfig),
/// reported at startup
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("decimal separator must not be empty")]
    EmptyDecimalSeparator,

    #[error("thousand and decimal separator are both {0:?}")]
    SeparatorClash(String),

    #[error("min_decimals {min} exceeds max_decimals {max}")]
    DecimalRange { min: usize, max: usize },

    #[error("max_digits_before_decimal must be at least 1")]
    ZeroIntegerDigits,
}
