//! Rendering values the way the display shows them

use crate::config::{CurrencyPosition, NumericFormatConfig};

/// Render `value` with a fixed number of fractional digits, thousand
/// separators every three integer digits, and the configured decimal
/// separator and currency symbol.
pub fn format_value(value: f64, decimals: usize, cfg: &NumericFormatConfig) -> String {
    let plain = format!("{:.decimals$}", value, decimals = decimals);
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (plain.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(&cfg.thousand_separator);
        }
        grouped.push(c);
    }

    let mut number = format!("{}{}", sign, grouped);
    if let Some(frac) = frac_part {
        number.push_str(&cfg.decimal_separator);
        number.push_str(frac);
    }

    match cfg.currency_position {
        CurrencyPosition::Prefix => format!("{}{}", cfg.currency_symbol, number),
        CurrencyPosition::Suffix => format!("{}{}", number, cfg.currency_symbol),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::validator::validate;
    use proptest::prelude::*;

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
    fn test_format_euro_suffix() {
        assert_eq!(format_value(1234.56, 2, &euro()), "1.234,56€");
    }

    #[test]
    fn test_format_dollar_prefix() {
        assert_eq!(format_value(1234.5, 2, &dollar()), "$1,234.50");
    }

    #[test]
    fn test_format_groups_every_three_digits() {
        assert_eq!(format_value(1_000_000.0, 2, &euro()), "1.000.000,00€");
        assert_eq!(format_value(12345.0, 2, &euro()), "12.345,00€");
    }

    #[test]
    fn test_format_small_values_ungrouped() {
        assert_eq!(format_value(123.0, 2, &euro()), "123,00€");
        assert_eq!(format_value(0.0, 2, &euro()), "0,00€");
    }

    #[test]
    fn test_format_negative_value() {
        assert_eq!(format_value(-1234.5, 2, &dollar()), "$-1,234.50");
    }

    #[test]
    fn test_format_without_thousand_separator() {
        let cfg = NumericFormatConfig {
            thousand_separator: String::new(),
            ..Default::default()
        };
        assert_eq!(format_value(1234567.0, 2, &cfg), "1234567,00€");
    }

    #[test]
    fn test_format_zero_decimals() {
        let cfg = NumericFormatConfig {
            decimals_required: false,
            ..Default::default()
        };
        assert_eq!(format_value(1234.0, 0, &cfg), "1.234€");
    }

    #[test]
    fn test_formatted_value_passes_validation() {
        assert_eq!(
            validate(&format_value(9876.54, 2, &euro()), &euro()),
            Some("9876.54".to_string())
        );
    }

    proptest! {
        #[test]
        fn round_trip_euro(cents in 0u64..1_000_000_000u64) {
            let value = cents as f64 / 100.0;
            let text = format_value(value, 2, &euro());
            prop_assert!(validate(&text, &euro()).is_some());
            let parsed = parse(&text, &euro()).unwrap();
            prop_assert_eq!(parsed.value, value);
            prop_assert!(parsed.integer_digits() <= 7);
        }

        #[test]
        fn round_trip_dollar(cents in 0u64..1_000_000_000u64) {
            let value = cents as f64 / 100.0;
            let text = format_value(value, 2, &dollar());
            prop_assert!(validate(&text, &dollar()).is_some());
            let parsed = parse(&text, &dollar()).unwrap();
            prop_assert_eq!(parsed.value, value);
        }
    }
}
