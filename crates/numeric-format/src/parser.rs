//! Best-effort locale-aware parsing

use crate::config::NumericFormatConfig;
use crate::error::ParseError;
use tracing::debug;

/// A successfully parsed reading
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedValue {
    /// Numeric value of the reading
    pub value: f64,
    /// Canonical dot-decimal text the value was converted from
    pub canonical: String,
}

impl ParsedValue {
    /// Digit count of the integer part, sign excluded.
    ///
    /// Thousand separators are already gone from the canonical form, so the
    /// count reflects the magnitude of the value, not its rendering.
    pub fn integer_digits(&self) -> usize {
        let unsigned = self.canonical.strip_prefix('-').unwrap_or(&self.canonical);
        match unsigned.find('.') {
            Some(pos) => pos,
            None => unsigned.len(),
        }
    }
}

/// Convert localized display text to a number.
///
/// Inverts the display format: the currency symbol is removed wherever it
/// occurs, thousand separators are dropped, the locale decimal separator
/// becomes `.`, and the remainder must read as a plain decimal number. The
/// symbol is optional here; [`validate`](crate::validate) is the strict gate.
pub fn parse(text: &str, cfg: &NumericFormatConfig) -> Result<ParsedValue, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let without_symbol = if cfg.currency_symbol.is_empty() {
        trimmed.to_string()
    } else {
        trimmed.replace(&cfg.currency_symbol, "")
    };

    let mut canonical = without_symbol.trim().to_string();
    if !cfg.thousand_separator.is_empty() {
        canonical = canonical.replace(&cfg.thousand_separator, "");
    }
    if cfg.decimal_separator != "." {
        canonical = canonical.replace(&cfg.decimal_separator, ".");
    }

    if !is_plain_decimal(&canonical) {
        debug!("reading {:?} reduced to non-numeric {:?}", text, canonical);
        return Err(ParseError::NotNumeric { cleaned: canonical });
    }

    match canonical.parse::<f64>() {
        Ok(value) => Ok(ParsedValue { value, canonical }),
        Err(_) => Err(ParseError::NotNumeric { cleaned: canonical }),
    }
}

/// An optional leading minus, digits, at most one dot, at least one digit.
/// Scientific notation and special float spellings stay out.
fn is_plain_decimal(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let mut digits = 0usize;
    let mut seen_dot = false;
    for c in unsigned.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    digits > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CurrencyPosition;

    fn euro() -> NumericFormatConfig {
        NumericFormatConfig::default()
    }

    fn dollar() -> NumericFormatConfig {
        NumericFormatConfig {
            currency_symbol: "$".to_string(),
            currency_position: CurrencyPosition::Prefix,
            thousand_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_euro_suffix() {
        let parsed = parse("1.234,56€", &euro()).unwrap();
        assert_eq!(parsed.value, 1234.56);
        assert_eq!(parsed.canonical, "1234.56");
    }

    #[test]
    fn test_parse_dollar_prefix() {
        let parsed = parse("$1,234.56", &dollar()).unwrap();
        assert_eq!(parsed.value, 1234.56);
        assert_eq!(parsed.canonical, "1234.56");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let parsed = parse("  42,00€  ", &euro()).unwrap();
        assert_eq!(parsed.value, 42.0);
    }

    #[test]
    fn test_parse_symbol_is_optional() {
        let parsed = parse("123,45", &euro()).unwrap();
        assert_eq!(parsed.value, 123.45);
    }

    #[test]
    fn test_parse_strips_every_symbol_occurrence() {
        let parsed = parse("€1.234,56€", &euro()).unwrap();
        assert_eq!(parsed.value, 1234.56);
    }

    #[test]
    fn test_parse_negative_value() {
        let parsed = parse("-5,25€", &euro()).unwrap();
        assert_eq!(parsed.value, -5.25);
        assert_eq!(parsed.integer_digits(), 1);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(parse("", &euro()), Err(ParseError::EmptyInput));
        assert_eq!(parse("   ", &euro()), Err(ParseError::EmptyInput));
    }

    #[test]
    fn test_lone_symbol_rejected() {
        match parse("€", &euro()) {
            Err(ParseError::NotNumeric { cleaned }) => assert!(cleaned.is_empty()),
            other => panic!("expected NotNumeric, got {:?}", other),
        }
    }

    #[test]
    fn test_garbled_text_rejected() {
        assert!(parse("12garbage34", &euro()).is_err());
        assert!(parse("O,50€", &euro()).is_err());
    }

    #[test]
    fn test_doubled_decimal_rejected() {
        match parse("12,34,56€", &euro()) {
            Err(ParseError::NotNumeric { cleaned }) => assert_eq!(cleaned, "12.34.56"),
            other => panic!("expected NotNumeric, got {:?}", other),
        }
    }

    #[test]
    fn test_scientific_notation_rejected() {
        assert!(parse("1e5", &dollar()).is_err());
        assert!(parse("inf", &dollar()).is_err());
        assert!(parse("NaN", &dollar()).is_err());
    }

    #[test]
    fn test_parse_canonical_form_is_idempotent() {
        // dot-decimal locale: the canonical form reparses to the same value
        let first = parse("$1,234.56", &dollar()).unwrap();
        let second = parse(&first.canonical, &dollar()).unwrap();
        assert_eq!(first.value, second.value);
        assert_eq!(first.canonical, second.canonical);
    }

    #[test]
    fn test_integer_digit_counts() {
        assert_eq!(parse("1.234.567,89€", &euro()).unwrap().integer_digits(), 7);
        assert_eq!(parse("0,50€", &euro()).unwrap().integer_digits(), 1);
        assert_eq!(parse("999", &euro()).unwrap().integer_digits(), 3);
    }
}
