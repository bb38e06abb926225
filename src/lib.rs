//! # CircuitLab Core
//!
//! A real-time DC circuit solver for interactive circuit-building tools.
//!
//! This library provides:
//! - A node/element circuit model with stable handles that survive editing
//! - Modified Nodal Analysis (MNA) based DC solving, once per animation frame
//! - Batteries with internal resistance, resistors, wires, switches, meters
//! - Light bulbs whose resistance follows last frame's dissipated power
//! - Short-circuit flagging for visual warnings
//!
//! ## Architecture
//!
//! - [`circuit`] - Circuit arena, editing operations and validation
//! - [`components`] - Element models (batteries, resistors, bulbs, etc.)
//! - [`solver`] - MNA assembly, Gaussian elimination and result write-back
//!
//! ## Usage
//!
//! ```
//! use circuitlab_core::components::{Battery, ElementKind, Resistor};
//! use circuitlab_core::{solve, Circuit, SolveStatus};
//!
//! let mut circuit = Circuit::new();
//! let a = circuit.add_node(0.0, 0.0);
//! let b = circuit.add_node(100.0, 0.0);
//! circuit.add_element(ElementKind::Battery(Battery::new(9.0)), a, b).unwrap();
//! let r = circuit.add_element(ElementKind::Resistor(Resistor::new(9.0)), a, b).unwrap();
//!
//! assert_eq!(solve(&mut circuit, false), SolveStatus::Solved);
//! let current = circuit.element(r).unwrap().readings.current;
//! assert!((current - 9.0 / 9.01).abs() < 1e-6);
//! ```
//!
//! ## Error policy
//!
//! Editing operations return [`Result`]. Solving never fails a frame: an empty
//! circuit is a no-op and a degenerate matrix leaves the previous frame's
//! outputs in place, reported through [`SolveStatus`].

pub mod circuit;
pub mod components;
pub mod error;
pub mod solver;

// Re-export main types for convenience
pub use circuit::Circuit;
pub use error::{CircuitError, Result};
pub use solver::{solve, Simulator, SolveStatus, Solver, SolverConfig};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCircuit;
