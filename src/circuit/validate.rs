//! Circuit validation.

use crate::components::ElementKind;
use crate::error::{CircuitError, Result};

use super::Circuit;

/// Validate a circuit for solving.
///
/// Checks:
/// - No element connects a node to itself
/// - Every terminal resolves to a live node
/// - Element parameters are finite and in range
///
/// The solver tolerates all of these, so this is meant for the editor and
/// for tests rather than for the frame loop.
pub fn validate_circuit(circuit: &Circuit) -> Result<()> {
    for element in circuit.branches() {
        let [n1, n2] = element.nodes;
        if n1 == n2 {
            return Err(CircuitError::SelfLoop { node: n1 });
        }
        for node in element.nodes {
            if !circuit.contains_node(node) {
                return Err(CircuitError::invalid_topology(format!(
                    "{} {} references removed node {}",
                    element.kind.name(),
                    element.id,
                    node
                )));
            }
        }

        match &element.kind {
            ElementKind::Battery(b) => {
                if !b.voltage.is_finite() {
                    return Err(CircuitError::invalid_parameter(
                        element.id,
                        "voltage",
                        "must be finite",
                    ));
                }
                if !b.internal_resistance.is_finite() || b.internal_resistance < 0.0 {
                    return Err(CircuitError::invalid_parameter(
                        element.id,
                        "internal_resistance",
                        "must be finite and non-negative",
                    ));
                }
            }
            kind => {
                if let Some(r) = kind.resistance() {
                    if !r.is_finite() || r < 0.0 {
                        return Err(CircuitError::invalid_parameter(
                            element.id,
                            "resistance",
                            format!("must be finite and non-negative, got {r}"),
                        ));
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Battery, Resistor};

    #[test]
    fn test_valid_circuit_passes() {
        let mut c = Circuit::new();
        let a = c.add_node(0.0, 0.0);
        let b = c.add_node(1.0, 0.0);
        c.add_element(ElementKind::Battery(Battery::new(9.0)), a, b).unwrap();
        c.add_element(ElementKind::Resistor(Resistor::new(9.0)), a, b).unwrap();
        assert!(validate_circuit(&c).is_ok());
    }

    #[test]
    fn test_dangling_terminal_is_reported() {
        let mut c = Circuit::new();
        let a = c.add_node(0.0, 0.0);
        let b = c.add_node(1.0, 0.0);
        c.add_element(ElementKind::Resistor(Resistor::new(9.0)), a, b).unwrap();
        c.remove_node(b);
        assert!(matches!(
            validate_circuit(&c),
            Err(CircuitError::InvalidTopology { .. })
        ));
    }

    #[test]
    fn test_negative_resistance_is_reported() {
        let mut c = Circuit::new();
        let a = c.add_node(0.0, 0.0);
        let b = c.add_node(1.0, 0.0);
        let r = c
            .add_element(ElementKind::Resistor(Resistor::new(-1.0)), a, b)
            .unwrap();
        match validate_circuit(&c) {
            Err(CircuitError::InvalidParameter { element, param, .. }) => {
                assert_eq!(element, r);
                assert_eq!(param, "resistance");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
