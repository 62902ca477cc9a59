//! Locale-Aware Numeric Format Handling
//!
//! Numeric displays render values in a locale: a currency symbol at one end,
//! thousand separators inside the integer part, a locale decimal separator.
//! This crate converts such text back into numbers (best effort), checks it
//! against the full display grammar (strict), and renders numbers the way the
//! display would.

mod config;
mod error;
mod format;
mod parser;
mod validator;

pub use config::{CurrencyPosition, NumericFormatConfig};
pub use error::{ConfigError, ParseError};
pub use format::format_value;
pub use parser::{parse, ParsedValue};
pub use validator::validate;
