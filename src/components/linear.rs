//! Linear passive components: Resistor, Wire, LightBulb.

/// A resistor component.
#[derive(Debug, Clone, PartialEq)]
pub struct Resistor {
    /// Resistance in ohms
    pub resistance: f64,
}

impl Default for Resistor {
    fn default() -> Self {
        Self { resistance: 10.0 }
    }
}

impl Resistor {
    /// Create a new resistor.
    pub fn new(resistance: f64) -> Self {
        Self { resistance }
    }
}

/// A wire: a conductor with a small positive resistance standing in for an
/// ideal connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    /// Wire resistance in ohms
    pub resistivity: f64,
}

impl Wire {
    /// Default wire resistance.
    pub const DEFAULT_RESISTIVITY: f64 = 0.01;

    /// Create a new wire with the given resistance.
    pub fn new(resistivity: f64) -> Self {
        Self { resistivity }
    }
}

impl Default for Wire {
    fn default() -> Self {
        Self {
            resistivity: Self::DEFAULT_RESISTIVITY,
        }
    }
}

/// An incandescent light bulb.
///
/// The filament resistance is derived by the solver each frame. With the
/// "real bulb" behaviour enabled it rises with the power dissipated during
/// the previous frame:
///
/// ```text
/// R = 10 + min(2 * P_prev, 100)
/// ```
///
/// This is a one-frame-lagged update, not a converged nonlinear solve.
#[derive(Debug, Clone, PartialEq)]
pub struct LightBulb {
    /// Filament resistance used for the current frame (ohms)
    pub resistance: f64,
}

impl LightBulb {
    /// Cold filament resistance.
    pub const BASE_RESISTANCE: f64 = 10.0;
    /// Ohms added per watt dissipated in the previous frame.
    pub const POWER_COEFFICIENT: f64 = 2.0;
    /// Upper bound on the power-dependent rise.
    pub const MAX_RISE: f64 = 100.0;

    /// Create a new bulb with a cold filament.
    pub fn new() -> Self {
        Self {
            resistance: Self::BASE_RESISTANCE,
        }
    }

    /// Filament resistance for a frame, given last frame's power.
    pub fn resistance_for(previous_power: f64, real_bulb: bool) -> f64 {
        if !real_bulb || !previous_power.is_finite() {
            return Self::BASE_RESISTANCE;
        }
        let rise = (previous_power * Self::POWER_COEFFICIENT).min(Self::MAX_RISE);
        Self::BASE_RESISTANCE + rise
    }
}

impl Default for LightBulb {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulb_constant_when_real_mode_disabled() {
        assert_eq!(LightBulb::resistance_for(0.0, false), 10.0);
        assert_eq!(LightBulb::resistance_for(25.0, false), 10.0);
    }

    #[test]
    fn test_bulb_rise_is_clamped() {
        assert_eq!(LightBulb::resistance_for(0.0, true), 10.0);
        assert!((LightBulb::resistance_for(8.0, true) - 26.0).abs() < 1e-12);
        assert_eq!(LightBulb::resistance_for(50.0, true), 110.0);
        assert_eq!(LightBulb::resistance_for(1.0e6, true), 110.0);
    }

    #[test]
    fn test_bulb_ignores_non_finite_power() {
        assert_eq!(LightBulb::resistance_for(f64::NAN, true), 10.0);
    }

    #[test]
    fn test_wire_default_resistivity() {
        assert_eq!(Wire::default().resistivity, 0.01);
    }
}
