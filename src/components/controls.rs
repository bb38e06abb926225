//! Control components: Switch.

/// A switch component.
///
/// Modeled as a resistance:
/// - Closed: 1 milliohm (must stay above the solver's resistance floor)
/// - Open: 1 gigaohm (conductance on the order of the per-node leakage)
#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    pub closed: bool,
}

impl Switch {
    /// Resistance when closed.
    pub const R_CLOSED: f64 = 1e-3;
    /// Resistance when open.
    pub const R_OPEN: f64 = 1e9;

    /// Create a new switch.
    pub fn new(closed: bool) -> Self {
        Self { closed }
    }

    /// Get the current resistance.
    pub fn resistance(&self) -> f64 {
        if self.closed {
            Self::R_CLOSED
        } else {
            Self::R_OPEN
        }
    }

    /// Toggle the switch state.
    pub fn toggle(&mut self) {
        self.closed = !self.closed;
    }
}

impl Default for Switch {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_toggle() {
        let mut s = Switch::default();
        assert_eq!(s.resistance(), Switch::R_CLOSED);
        s.toggle();
        assert!(!s.closed);
        assert_eq!(s.resistance(), Switch::R_OPEN);
        s.toggle();
        assert_eq!(s.resistance(), Switch::R_CLOSED);
    }
}
