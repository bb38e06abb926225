//! Measurement instruments.

/// An ideal voltmeter.
///
/// Draws no current and contributes nothing to the MNA matrix; its reading
/// is taken directly from the solved node voltages.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Voltmeter;

/// An ammeter, stamped as a near-zero resistance link.
#[derive(Debug, Clone, PartialEq)]
pub struct Ammeter {
    /// Shunt resistance in ohms
    pub resistance: f64,
}

impl Ammeter {
    /// Default shunt resistance.
    pub const DEFAULT_RESISTANCE: f64 = 1e-3;

    /// Create an ammeter with a custom shunt resistance.
    pub fn new(resistance: f64) -> Self {
        Self { resistance }
    }
}

impl Default for Ammeter {
    fn default() -> Self {
        Self {
            resistance: Self::DEFAULT_RESISTANCE,
        }
    }
}
