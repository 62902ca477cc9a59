//! Acceptance state machine

use crate::config::StabilityConfig;
use crate::decision::{ChangeRule, Decision, RejectReason};
use crate::state::StabilityState;
use numeric_format::{parse, validate, NumericFormatConfig};
use tracing::{debug, warn};

/// Acceptance state machine for one monitored meter.
///
/// The filter owns the meter's [`StabilityState`]; deciding on a reading and
/// recording it is one step, so an interrupted run can never leave the two
/// out of sync. Both configs are assumed validated at startup.
pub struct StabilityFilter {
    format: NumericFormatConfig,
    stability: StabilityConfig,
    strict_format: bool,
    state: StabilityState,
}

impl StabilityFilter {
    /// Create a filter with an unprimed state.
    ///
    /// With `strict_format`, the full display grammar must match before a
    /// reading is even parsed; without it, best-effort parsing decides.
    pub fn new(
        format: NumericFormatConfig,
        stability: StabilityConfig,
        strict_format: bool,
    ) -> Self {
        Self {
            format,
            stability,
            strict_format,
            state: StabilityState::new(),
        }
    }

    /// Current last-known-good state
    pub fn state(&self) -> &StabilityState {
        &self.state
    }

    /// Forget the last accepted reading, as if the filter had just started.
    ///
    /// The filter never does this on its own. A filter wedged on a stale
    /// high value, rejecting every new reading as a drop, recovers only
    /// through a reading inside the bounds or through this call.
    pub fn reset(&mut self) {
        debug!("filter state cleared");
        self.state.clear();
    }

    /// Decide whether `raw_text` becomes the new last-known-good reading.
    ///
    /// Checks run in order: strict grammar (when enabled), parse, digit
    /// ceiling, then change plausibility against the previous value. The
    /// first reading after start or reset skips the plausibility stage.
    /// Only acceptance mutates the state.
    pub fn evaluate(&mut self, raw_text: &str) -> Decision {
        if self.strict_format && validate(raw_text, &self.format).is_none() {
            warn!("rejected {:?}: display format mismatch", raw_text);
            return Decision::Rejected {
                reason: RejectReason::InvalidFormat,
            };
        }

        let parsed = match parse(raw_text, &self.format) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("rejected {:?}: {}", raw_text, err);
                return Decision::Rejected {
                    reason: RejectReason::Parse(err),
                };
            }
        };

        let digit_count = parsed.integer_digits();
        if digit_count > self.format.max_digits_before_decimal {
            warn!(
                "rejected {:?}: {} integer digits, at most {} plausible",
                raw_text, digit_count, self.format.max_digits_before_decimal
            );
            return Decision::RejectedTooManyDigits {
                value: parsed.value,
                digit_count,
            };
        }

        if let Some(previous) = self.state.last_value() {
            let delta = (parsed.value - previous).abs();

            if parsed.value > previous && delta > self.stability.max_upward_change {
                warn!(
                    "rejected {:?}: jump of {} from {} (bound {})",
                    raw_text, delta, previous, self.stability.max_upward_change
                );
                return Decision::RejectedImplausibleChange {
                    value: parsed.value,
                    previous,
                    delta,
                    rule: ChangeRule::Jump,
                };
            }

            if parsed.value < previous && delta > self.stability.max_downward_change {
                if previous >= self.stability.reset_threshold {
                    // meter reset: a value this high legitimately collapses
                    debug!(
                        "reset detected: {} -> {} (threshold {})",
                        previous, parsed.value, self.stability.reset_threshold
                    );
                } else {
                    warn!(
                        "rejected {:?}: drop of {} from {} (bound {})",
                        raw_text, delta, previous, self.stability.max_downward_change
                    );
                    return Decision::RejectedImplausibleChange {
                        value: parsed.value,
                        previous,
                        delta,
                        rule: ChangeRule::Drop,
                    };
                }
            }
        }

        self.state.accept(raw_text, parsed.value);
        debug!("accepted {:?} as {}", raw_text, parsed.value);
        Decision::Accepted {
            value: parsed.value,
            raw: raw_text.to_string(),
        }
    }
}
