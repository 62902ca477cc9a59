//! Display locale configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Position of the currency symbol relative to the digit run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyPosition {
    Prefix,
    Suffix,
}

/// Locale description of the monitored numeric display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericFormatConfig {
    /// Currency symbol shown on the display (empty = none)
    pub currency_symbol: String,
    /// Whether the symbol precedes or follows the digits
    pub currency_position: CurrencyPosition,
    /// Thousand separator (empty = none)
    pub thousand_separator: String,
    /// Decimal separator
    pub decimal_separator: String,
    /// Whether a fractional part must be present
    pub decimals_required: bool,
    /// Minimum fractional digits, when a fraction is required
    pub min_decimals: usize,
    /// Maximum fractional digits, when a fraction is required
    pub max_decimals: usize,
    /// Largest plausible digit count before the decimal point
    pub max_digits_before_decimal: usize,
}

impl Default for NumericFormatConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "€".to_string(),
            currency_position: CurrencyPosition::Suffix,
            thousand_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
            decimals_required: true,
            min_decimals: 2,
            max_decimals: 2,
            max_digits_before_decimal: 7,
        }
    }
}

impl NumericFormatConfig {
    /// Check the locale for contradictions.
    ///
    /// Called once at startup; parsing and validation assume a config that
    /// passed this check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decimal_separator.is_empty() {
            return Err(ConfigError::EmptyDecimalSeparator);
        }
        if !self.thousand_separator.is_empty() && self.thousand_separator == self.decimal_separator
        {
            return Err(ConfigError::SeparatorClash(self.decimal_separator.clone()));
        }
        if self.min_decimals > self.max_decimals {
            return Err(ConfigError::DecimalRange {
                min: self.min_decimals,
                max: self.max_decimals,
            });
        }
        if self.max_digits_before_decimal == 0 {
            return Err(ConfigError::ZeroIntegerDigits);
        }
        Ok(())
    }
}
