//! MNA (Modified Nodal Analysis) DC solver.
//!
//! This module provides the per-frame numerical engine.
//!
//! ## Modified Nodal Analysis
//!
//! MNA assembles a system of equations Gx = I where:
//! - x contains node voltages and battery branch currents
//! - G is the conductance/coefficient matrix
//! - I is the source vector
//!
//! The matrix structure is:
//! ```text
//! [ G   B ] [ v ]   [ 0 ]
//! [ C   D ] [ j ] = [ e ]
//! ```
//!
//! where:
//! - G holds the resistive branches plus the ground and leakage shunts
//! - B, C connect batteries to their terminal nodes
//! - D holds the (negated) battery internal resistances
//! - v is the vector of node voltages
//! - j is the vector of battery branch currents
//! - e is the vector of battery EMFs
//!
//! ## Frame pipeline
//!
//! 1. Bulb resistances are derived from last frame's power ([`bulb`])
//! 2. The system is assembled ([`mna`])
//! 3. It is solved by Gaussian elimination with partial pivoting ([`gauss`])
//! 4. Voltages and readings are written back ([`distribute`])

pub mod bulb;
pub mod distribute;
pub mod gauss;
pub mod mna;
mod simulator;

pub use mna::{Assembly, MnaSystem, NodeIndex};
pub use simulator::{solve, Simulator, SolveStatus, Solver, SolverConfig};

/// Conductance pinning the reference node to 0 V.
pub const GROUND_CONDUCTANCE: f64 = 1e6;

/// Conductance added to every diagonal entry so floating parts stay solvable.
pub const LEAKAGE_CONDUCTANCE: f64 = 1e-9;

/// Minimum branch resistance to prevent division by zero.
pub const MIN_RESISTANCE: f64 = 1e-4;

/// Battery internal resistance used when none is set.
pub const DEFAULT_INTERNAL_RESISTANCE: f64 = 0.01;

/// Branch current above which the editor shows a short-circuit warning.
pub const SHORT_CIRCUIT_CURRENT: f64 = 100.0;
