//! Per-frame solver interface.

use crate::circuit::Circuit;
use crate::error::CircuitError;

use super::bulb::update_bulb_resistances;
use super::distribute::distribute;
use super::gauss::solve_dense;
use super::mna::assemble;
use super::{
    DEFAULT_INTERNAL_RESISTANCE, GROUND_CONDUCTANCE, LEAKAGE_CONDUCTANCE, MIN_RESISTANCE,
    SHORT_CIRCUIT_CURRENT,
};

/// Configuration for the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Conductance tying the reference node to 0 V (siemens).
    pub ground_conductance: f64,
    /// Conductance added to every diagonal entry (siemens).
    pub leakage_conductance: f64,
    /// Floor applied to every branch resistance (ohms).
    pub min_resistance: f64,
    /// Internal resistance used for batteries that leave it unset (ohms).
    pub default_internal_resistance: f64,
    /// Current magnitude above which a branch is flagged as shorted (amps).
    pub short_circuit_current: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            ground_conductance: GROUND_CONDUCTANCE,
            leakage_conductance: LEAKAGE_CONDUCTANCE,
            min_resistance: MIN_RESISTANCE,
            default_internal_resistance: DEFAULT_INTERNAL_RESISTANCE,
            short_circuit_current: SHORT_CIRCUIT_CURRENT,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reference-node conductance.
    pub fn with_ground_conductance(mut self, g: f64) -> Self {
        self.ground_conductance = g;
        self
    }

    /// Set the per-node leakage conductance.
    ///
    /// Setting this to zero makes floating sub-networks singular.
    pub fn with_leakage_conductance(mut self, g: f64) -> Self {
        self.leakage_conductance = g;
        self
    }

    /// Set the resistance floor.
    pub fn with_min_resistance(mut self, r: f64) -> Self {
        self.min_resistance = r;
        self
    }

    /// Set the fallback battery internal resistance.
    pub fn with_default_internal_resistance(mut self, r: f64) -> Self {
        self.default_internal_resistance = r;
        self
    }

    /// Set the short-circuit current threshold.
    pub fn with_short_circuit_current(mut self, amps: f64) -> Self {
        self.short_circuit_current = amps;
        self
    }

    /// Apply the resistance floor.
    pub fn clamp_resistance(&self, r: f64) -> f64 {
        if r.is_nan() {
            self.min_resistance
        } else {
            r.max(self.min_resistance)
        }
    }

    /// Check a branch current against the short-circuit threshold.
    pub fn is_short_circuit(&self, current: f64) -> bool {
        current.abs() > self.short_circuit_current
    }
}

/// Outcome of one solve call.
///
/// The solver never fails a frame; a degenerate frame leaves every output
/// from the last good frame in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Outputs were written for this frame.
    Solved,
    /// The circuit has no nodes; nothing was touched.
    EmptyNetwork,
    /// Elimination hit a zero pivot (or produced non-finite values) at this
    /// column; outputs were left unchanged.
    Degenerate { column: usize },
}

impl SolveStatus {
    /// Check whether this frame's outputs were written.
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveStatus::Solved)
    }
}

/// The DC circuit solver.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Create a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Solve one frame.
    ///
    /// Updates bulb resistances from last frame's power, assembles and solves
    /// the MNA system, then writes node voltages and element readings back
    /// onto the circuit.
    pub fn solve(&self, circuit: &mut Circuit, use_real_bulbs: bool) -> SolveStatus {
        if circuit.is_empty() {
            return SolveStatus::EmptyNetwork;
        }

        update_bulb_resistances(circuit, use_real_bulbs);

        let mut assembly = assemble(circuit, &self.config);
        let size = assembly.system.size;
        tracing::debug!(
            nodes = assembly.index.num_nodes(),
            batteries = assembly.num_batteries,
            size,
            "assembled MNA system"
        );

        let system = &mut assembly.system;
        let x = match solve_dense(&mut system.g, &mut system.i, size) {
            Ok(x) => x,
            Err(err) => {
                tracing::warn!(%err, "degenerate frame, keeping previous outputs");
                let column = match err {
                    CircuitError::SingularMatrix { column } => column,
                    _ => 0,
                };
                return SolveStatus::Degenerate { column };
            }
        };

        if let Some(column) = x.iter().position(|v| !v.is_finite()) {
            tracing::warn!(column, "non-finite solution, keeping previous outputs");
            return SolveStatus::Degenerate { column };
        }

        distribute(circuit, &assembly.index, &x, &self.config);
        tracing::trace!(size, "frame solved");
        SolveStatus::Solved
    }
}

/// A circuit driven one frame at a time, the way a render loop drives it.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    /// The circuit being simulated
    circuit: Circuit,
    /// Solver and its constants
    solver: Solver,
    /// Whether bulbs heat up with dissipated power
    use_real_bulbs: bool,
    /// Number of frames stepped so far
    frame: u64,
    /// Status of the most recent frame
    last_status: Option<SolveStatus>,
}

impl Simulator {
    /// Create a new simulator with default solver configuration.
    pub fn new(circuit: Circuit) -> Self {
        Self::with_config(circuit, SolverConfig::default())
    }

    /// Create a new simulator with custom solver configuration.
    pub fn with_config(circuit: Circuit, config: SolverConfig) -> Self {
        Self {
            circuit,
            solver: Solver::new(config),
            use_real_bulbs: false,
            frame: 0,
            last_status: None,
        }
    }

    /// Enable or disable power-dependent bulb resistance.
    pub fn set_real_bulbs(&mut self, enabled: bool) {
        self.use_real_bulbs = enabled;
    }

    /// Step the simulation by one frame.
    pub fn step(&mut self) -> SolveStatus {
        let status = self.solver.solve(&mut self.circuit, self.use_real_bulbs);
        self.frame += 1;
        self.last_status = Some(status);
        status
    }

    /// Step the simulation by `frames` frames, returning the last status.
    pub fn run(&mut self, frames: u64) -> Option<SolveStatus> {
        for _ in 0..frames {
            self.step();
        }
        self.last_status
    }

    /// Number of frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Status of the most recent frame, if any.
    pub fn last_status(&self) -> Option<SolveStatus> {
        self.last_status
    }

    /// Get a reference to the circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Get a mutable reference to the circuit, for edits between frames.
    pub fn circuit_mut(&mut self) -> &mut Circuit {
        &mut self.circuit
    }
}

/// Solve one frame with the default configuration.
pub fn solve(circuit: &mut Circuit, use_real_bulbs: bool) -> SolveStatus {
    Solver::default().solve(circuit, use_real_bulbs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Battery, ElementKind, Resistor};

    #[test]
    fn test_clamp_resistance() {
        let config = SolverConfig::default();
        assert_eq!(config.clamp_resistance(0.0), 1e-4);
        assert_eq!(config.clamp_resistance(-5.0), 1e-4);
        assert_eq!(config.clamp_resistance(f64::NAN), 1e-4);
        assert_eq!(config.clamp_resistance(10.0), 10.0);
    }

    #[test]
    fn test_config_builder() {
        let config = SolverConfig::new()
            .with_leakage_conductance(0.0)
            .with_short_circuit_current(5.0);
        assert_eq!(config.leakage_conductance, 0.0);
        assert!(config.is_short_circuit(-5.5));
        assert!(!config.is_short_circuit(5.0));
    }

    #[test]
    fn test_empty_circuit_is_noop() {
        let mut c = Circuit::new();
        assert_eq!(solve(&mut c, false), SolveStatus::EmptyNetwork);
    }

    #[test]
    fn test_simulator_counts_frames() {
        let mut c = Circuit::new();
        let a = c.add_node(0.0, 0.0);
        let b = c.add_node(1.0, 0.0);
        c.add_element(ElementKind::Battery(Battery::new(9.0)), a, b).unwrap();
        c.add_element(ElementKind::Resistor(Resistor::new(9.0)), a, b).unwrap();

        let mut sim = Simulator::new(c);
        assert_eq!(sim.last_status(), None);
        assert_eq!(sim.run(3), Some(SolveStatus::Solved));
        assert_eq!(sim.frame(), 3);
    }
}
