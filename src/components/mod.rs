//! Element models for circuit solving.
//!
//! This module provides models for all supported two-terminal elements:
//! - Sources: Battery
//! - Linear: Resistor, Wire, LightBulb
//! - Controls: Switch
//! - Meters: Voltmeter, Ammeter
//!
//! Every element except the battery and the voltmeter is stamped into the MNA
//! matrix as a plain conductance; see [`ElementKind::resistance`].

mod controls;
mod linear;
mod meters;
mod sources;

pub use controls::Switch;
pub use linear::{LightBulb, Resistor, Wire};
pub use meters::{Ammeter, Voltmeter};
pub use sources::Battery;

use crate::circuit::{ElementId, NodeId};

/// Values written back by the solver after each successful frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Readings {
    /// Current from the first terminal to the second (amps).
    /// For batteries this is the current delivered by the positive terminal.
    pub current: f64,
    /// `V(nodes[0]) - V(nodes[1])` (volts)
    pub voltage_drop: f64,
    /// Dissipated power (watts); only computed for light bulbs
    pub power: f64,
    /// Set when `|current|` exceeds the short-circuit threshold
    pub is_short_circuit: bool,
}

/// The kind-specific parameters of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Battery(Battery),
    Resistor(Resistor),
    Wire(Wire),
    LightBulb(LightBulb),
    Switch(Switch),
    Voltmeter(Voltmeter),
    Ammeter(Ammeter),
}

impl ElementKind {
    /// Human-readable kind name.
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Battery(_) => "Battery",
            ElementKind::Resistor(_) => "Resistor",
            ElementKind::Wire(_) => "Wire",
            ElementKind::LightBulb(_) => "LightBulb",
            ElementKind::Switch(_) => "Switch",
            ElementKind::Voltmeter(_) => "Voltmeter",
            ElementKind::Ammeter(_) => "Ammeter",
        }
    }

    /// Branch resistance for elements stamped as a conductance.
    ///
    /// Returns `None` for batteries (stamped as a voltage source) and
    /// voltmeters (ideal infinite impedance). The value is unclamped; the
    /// solver applies its own resistance floor.
    pub fn resistance(&self) -> Option<f64> {
        match self {
            ElementKind::Resistor(r) => Some(r.resistance),
            ElementKind::Wire(w) => Some(w.resistivity),
            ElementKind::LightBulb(b) => Some(b.resistance),
            ElementKind::Switch(s) => Some(s.resistance()),
            ElementKind::Ammeter(a) => Some(a.resistance),
            ElementKind::Battery(_) | ElementKind::Voltmeter(_) => None,
        }
    }

    /// Check if this element is stamped as a conductance.
    pub fn is_conductance(&self) -> bool {
        self.resistance().is_some()
    }
}

/// A two-terminal element placed in a circuit.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub nodes: [NodeId; 2],
    pub kind: ElementKind,
    pub readings: Readings,
}

impl Element {
    /// Create a new element with zeroed readings.
    pub fn new(id: ElementId, nodes: [NodeId; 2], kind: ElementKind) -> Self {
        Self {
            id,
            nodes,
            kind,
            readings: Readings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conductance_classification() {
        assert!(ElementKind::Resistor(Resistor::default()).is_conductance());
        assert!(ElementKind::Wire(Wire::default()).is_conductance());
        assert!(ElementKind::LightBulb(LightBulb::default()).is_conductance());
        assert!(ElementKind::Switch(Switch::default()).is_conductance());
        assert!(ElementKind::Ammeter(Ammeter::default()).is_conductance());
        assert!(!ElementKind::Battery(Battery::default()).is_conductance());
        assert!(!ElementKind::Voltmeter(Voltmeter).is_conductance());
    }

    #[test]
    fn test_new_element_has_zeroed_readings() {
        let e = Element::new(
            ElementId(0),
            [NodeId(1), NodeId(2)],
            ElementKind::Resistor(Resistor::new(47.0)),
        );
        assert_eq!(e.nodes, [NodeId(1), NodeId(2)]);
        assert_eq!(e.readings, Readings::default());
    }
}
