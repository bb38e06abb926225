//! Circuit graph representation and validation.
//!
//! This module provides the data owner the solver reads from and writes back
//! to. The [`Circuit`] struct holds the node arena, the components and the
//! wires, and offers the editing operations the circuit builder performs
//! between frames.

mod graph;
mod types;
mod validate;

pub use graph::Circuit;
pub use types::*;
pub use validate::validate_circuit;
