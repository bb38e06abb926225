//! Voltage sources.

/// A battery component.
///
/// Batteries require an extra row/column in the MNA matrix for the branch
/// current. The source enforces `V+ - V- = E - I * R_int`, where `I` is the
/// current delivered by the positive terminal (`nodes[0]`).
#[derive(Debug, Clone, PartialEq)]
pub struct Battery {
    /// Electromotive force in volts
    pub voltage: f64,
    /// Internal resistance in ohms; zero or negative means "unset"
    pub internal_resistance: f64,
}

impl Default for Battery {
    fn default() -> Self {
        Self {
            voltage: 9.0,
            internal_resistance: 0.0,
        }
    }
}

impl Battery {
    /// Create a new battery with the internal resistance left unset.
    pub fn new(voltage: f64) -> Self {
        Self {
            voltage,
            internal_resistance: 0.0,
        }
    }

    /// Create a new battery with an explicit internal resistance.
    pub fn with_internal_resistance(voltage: f64, internal_resistance: f64) -> Self {
        Self {
            voltage,
            internal_resistance,
        }
    }

    /// Get the internal resistance, substituting `default` when unset.
    pub fn effective_internal_resistance(&self, default: f64) -> f64 {
        if self.internal_resistance > 0.0 {
            self.internal_resistance
        } else {
            default
        }
    }
}
