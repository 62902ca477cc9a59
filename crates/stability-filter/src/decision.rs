//! Filter decisions

use numeric_format::ParseError;
use std::fmt;

/// Which plausibility rule a reading violated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeRule {
    /// Upward change beyond the configured bound
    Jump,
    /// Downward change beyond the configured bound, reset exception not met
    Drop,
}

impl fmt::Display for ChangeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeRule::Jump => write!(f, "jump"),
            ChangeRule::Drop => write!(f, "drop"),
        }
    }
}

/// Why a reading never reached the plausibility stage
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    /// Best-effort parsing failed
    Parse(ParseError),
    /// The strict display grammar did not match
    InvalidFormat,
}

/// Outcome of evaluating one raw reading.
///
/// Every rejection carries the evidence a caller needs to report it; none of
/// them changes the filter state.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Reading accepted as the new last-known-good value
    Accepted { value: f64, raw: String },
    /// Parsing or strict validation failed
    Rejected { reason: RejectReason },
    /// Integer digit count above the configured ceiling
    RejectedTooManyDigits { value: f64, digit_count: usize },
    /// Change from the previous value was implausibly large
    RejectedImplausibleChange {
        value: f64,
        previous: f64,
        delta: f64,
        rule: ChangeRule,
    },
}

impl Decision {
    /// Whether the reading became the new last-known-good value
    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accepted { .. })
    }

    /// The parsed value, for decisions that got far enough to have one
    pub fn value(&self) -> Option<f64> {
        match self {
            Decision::Accepted { value, .. }
            | Decision::RejectedTooManyDigits { value, .. }
            | Decision::RejectedImplausibleChange { value, .. } => Some(*value),
            Decision::Rejected { .. } => None,
        }
    }
}
