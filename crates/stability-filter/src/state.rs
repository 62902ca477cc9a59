//! Last-known-good state

/// A reading that passed every acceptance rule
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedReading {
    /// Raw text exactly as captured
    pub raw: String,
    /// Value the raw text parsed to
    pub value: f64,
}

/// Last-known-good state of one monitored meter.
///
/// Starts unprimed and changes only when the filter accepts a reading. The
/// raw text and its value are held as one pair so the two can never
/// disagree.
#[derive(Debug, Clone, Default)]
pub struct StabilityState {
    last_accepted: Option<AcceptedReading>,
}

impl StabilityState {
    /// Create an unprimed state
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a reading has ever been accepted
    pub fn is_primed(&self) -> bool {
        self.last_accepted.is_some()
    }

    /// The last accepted reading, if any
    pub fn last_accepted(&self) -> Option<&AcceptedReading> {
        self.last_accepted.as_ref()
    }

    /// The last accepted value, if any
    pub fn last_value(&self) -> Option<f64> {
        self.last_accepted.as_ref().map(|accepted| accepted.value)
    }

    /// Replace the pair with a newly accepted reading
    pub(crate) fn accept(&mut self, raw: &str, value: f64) {
        self.last_accepted = Some(AcceptedReading {
            raw: raw.to_string(),
            value,
        });
    }

    /// Return to the unprimed state
    pub(crate) fn clear(&mut self) {
        self.last_accepted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_unprimed() {
        let state = StabilityState::new();
        assert!(!state.is_primed());
        assert_eq!(state.last_value(), None);
        assert_eq!(state.last_accepted(), None);
    }

    #[test]
    fn test_accept_replaces_pair() {
        let mut state = StabilityState::new();
        state.accept("100,00€", 100.0);
        state.accept("101,00€", 101.0);

        assert!(state.is_primed());
        assert_eq!(state.last_value(), Some(101.0));
        assert_eq!(state.last_accepted().unwrap().raw, "101,00€");
    }

    #[test]
    fn test_clear_unprimes() {
        let mut state = StabilityState::new();
        state.accept("100,00€", 100.0);
        state.clear();
        assert!(!state.is_primed());
    }
}
