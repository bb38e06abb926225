//! Error types for the CircuitLab solver core.
//!
//! This module provides a unified error type [`CircuitError`] that covers
//! the error conditions of circuit editing, validation and the linear solve.
//! The per-frame entry point never surfaces these to the host; see
//! [`crate::solver::SolveStatus`].

use thiserror::Error;

use crate::circuit::{ElementId, NodeId};

/// Result type alias using [`CircuitError`].
pub type Result<T> = std::result::Result<T, CircuitError>;

/// Unified error type for all CircuitLab operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CircuitError {
    // ============ Circuit Editing Errors ============
    /// Node handle does not resolve to a live node
    #[error("Node '{node}' not found in circuit")]
    NodeNotFound { node: NodeId },

    /// Element handle does not resolve to a live element or wire
    #[error("Element '{element}' not found in circuit")]
    ElementNotFound { element: ElementId },

    /// Both terminals of an element reference the same node
    #[error("Element would connect node '{node}' to itself")]
    SelfLoop { node: NodeId },

    /// Invalid parameter value
    #[error("Invalid parameter '{param}' for element '{element}': {message}")]
    InvalidParameter {
        element: ElementId,
        param: &'static str,
        message: String,
    },

    /// Invalid circuit topology
    #[error("Invalid circuit topology: {message}")]
    InvalidTopology { message: String },

    // ============ Solver Errors ============
    /// Matrix is singular and cannot be solved
    #[error("Singular matrix at column {column} - part of the circuit has no reference path")]
    SingularMatrix { column: usize },
}

impl CircuitError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(
        element: ElementId,
        param: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            element,
            param,
            message: message.into(),
        }
    }

    /// Create an invalid topology error
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }
}
