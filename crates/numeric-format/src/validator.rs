//! Strict display-grammar validation

use crate::config::{CurrencyPosition, NumericFormatConfig};
use tracing::debug;

/// Check `text` against the full display grammar and return its canonical
/// dot-decimal form, or `None` when the shape does not hold.
///
/// Stripping alone would happily turn doubled or misplaced separators into a
/// number. This gate requires the currency symbol at its configured end,
/// separators only between digits, a single decimal separator, and a
/// fractional digit count inside the configured range.
pub fn validate(text: &str, cfg: &NumericFormatConfig) -> Option<String> {
    // displays pad between the symbol and the digits, nowhere else
    let run = match cfg.currency_position {
        CurrencyPosition::Prefix => text.strip_prefix(cfg.currency_symbol.as_str())?.trim_start(),
        CurrencyPosition::Suffix => text.strip_suffix(cfg.currency_symbol.as_str())?.trim_end(),
    };

    let canonical = scan_digit_run(run, &cfg.thousand_separator, &cfg.decimal_separator)?;

    if cfg.decimals_required {
        let decimals = match canonical.find('.') {
            Some(pos) => canonical.len() - pos - 1,
            None => {
                debug!("reading {:?} has no fractional part", text);
                return None;
            }
        };
        if decimals < cfg.min_decimals || decimals > cfg.max_decimals {
            debug!(
                "reading {:?} has {} fractional digits, expected {} to {}",
                text, decimals, cfg.min_decimals, cfg.max_decimals
            );
            return None;
        }
    }

    Some(canonical)
}

/// Scan one digit run and build its canonical form.
///
/// Grammar: starts and ends with a digit, thousand separators appear singly
/// between integer digits, at most one decimal separator, only digits after
/// it.
fn scan_digit_run(run: &str, thousand: &str, decimal: &str) -> Option<String> {
    let mut canonical = String::with_capacity(run.len());
    let mut rest = run;
    let mut after_digit = false;
    let mut seen_decimal = false;

    while let Some(c) = rest.chars().next() {
        if c.is_ascii_digit() {
            canonical.push(c);
            after_digit = true;
            rest = &rest[c.len_utf8()..];
            continue;
        }
        if !after_digit {
            // a separator may only follow a digit
            return None;
        }
        if !seen_decimal && rest.starts_with(decimal) {
            canonical.push('.');
            seen_decimal = true;
            after_digit = false;
            rest = &rest[decimal.len()..];
            continue;
        }
        if !seen_decimal && !thousand.is_empty() && rest.starts_with(thousand) {
            after_digit = false;
            rest = &rest[thousand.len()..];
            continue;
        }
        return None;
    }

    if !after_digit {
        // empty run, or a run ending in a separator
        return None;
    }
    Some(canonical)
}
