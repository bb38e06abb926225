//! Writing a solved frame back onto the circuit.

use crate::circuit::Circuit;
use crate::components::{ElementKind, Readings};

use super::mna::NodeIndex;
use super::SolverConfig;

/// Write node voltages and element readings from the solution vector `x`.
///
/// Conductance branches recompute their resistance exactly as assembly did,
/// so bulb readings use this frame's filament resistance. Battery branch
/// currents are read from the extra rows in component order. A conductance
/// branch with an unresolved terminal was not stamped and reads all zeros.
pub fn distribute(circuit: &mut Circuit, index: &NodeIndex, x: &[f64], config: &SolverConfig) {
    for node in circuit.nodes_mut() {
        if let Some(row) = index.row(node.id) {
            node.voltage = x[row];
        }
    }

    let num_nodes = index.num_nodes();
    let mut battery = 0;

    for element in circuit.branches_mut() {
        let v1 = index.voltage(x, element.nodes[0]);
        let v2 = index.voltage(x, element.nodes[1]);
        let voltage_drop = v1 - v2;
        let attached = element.nodes.iter().all(|&n| index.row(n).is_some());

        element.readings = match &element.kind {
            ElementKind::Battery(_) => {
                let current = -x[num_nodes + battery];
                battery += 1;
                Readings {
                    current,
                    voltage_drop,
                    power: 0.0,
                    is_short_circuit: config.is_short_circuit(current),
                }
            }

            ElementKind::Voltmeter(_) => Readings {
                voltage_drop,
                ..Readings::default()
            },

            kind if kind.is_conductance() && attached => {
                conductance_readings(kind, voltage_drop, config)
            }

            _ => Readings::default(),
        };
    }
}

fn conductance_readings(kind: &ElementKind, voltage_drop: f64, config: &SolverConfig) -> Readings {
    let r = kind.resistance().map_or(f64::INFINITY, |r| config.clamp_resistance(r));
    let current = voltage_drop / r;
    let power = if matches!(kind, ElementKind::LightBulb(_)) {
        voltage_drop * voltage_drop / r
    } else {
        0.0
    };
    Readings {
        current,
        voltage_drop,
        power,
        is_short_circuit: config.is_short_circuit(current),
    }
}
