//! Core types for circuit representation.

use std::fmt;

/// A stable handle to a node in the circuit arena.
///
/// Handles are never reused: removing a node leaves a tombstone, so an
/// element that still holds the handle sees it as unresolved rather than
/// silently pointing at a different node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// A stable handle to an element or wire in the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// An electrical junction shared by the terminals attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// Canvas position (owned by the editor, ignored by the solver)
    pub x: f64,
    pub y: f64,
    /// Solved voltage, overwritten on every successful frame
    pub voltage: f64,
    /// Editor drag flag, unrelated to solving
    pub is_fixed: bool,
}

impl Node {
    /// Create a new node at the given canvas position.
    pub fn new(id: NodeId, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            voltage: 0.0,
            is_fixed: false,
        }
    }

    /// Squared distance to a canvas point.
    pub fn distance_sq(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy
    }
}
