//! Reading Stability Filter
//!
//! Decides whether each new reading of a numeric display can be trusted.
//! Readings arrive as raw OCR text and are noisy: dropped digits, misread
//! separators, whole regions missing. A reading is accepted only when it
//! parses under the configured locale, stays within the digit ceiling, and
//! does not jump or drop implausibly far from the last accepted value. One
//! exception: a large drop from a sufficiently high value is treated as a
//! legitimate meter reset and accepted.

mod config;
mod decision;
mod filter;
mod state;

pub use config::{ConfigError, StabilityConfig};
pub use decision::{ChangeRule, Decision, RejectReason};
pub use filter::StabilityFilter;
pub use state::{AcceptedReading, StabilityState};
