//! Error classification for the geometry kernel and the fusion algorithms.
//!
//! Every failure is synchronous and raised at the point of origin. Callers
//! decide whether a failure aborts the whole computation or only discards
//! one contribution (see [`DegeneratePolicy`](crate::DegeneratePolicy)).

use thiserror::Error;

/// Result alias used throughout the crate.
pub type AlgebraResult<T> = Result<T, AlgebraError>;

/// Kind of operand found where another kind was expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    Scalar,
    Vector,
    Matrix,
}

impl std::fmt::Display for OperandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperandKind::Scalar => write!(f, "scalar"),
            OperandKind::Vector => write!(f, "vector"),
            OperandKind::Matrix => write!(f, "matrix"),
        }
    }
}

/// Errors raised by vector, matrix and fusion operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgebraError {
    /// A scalar was required but another operand kind was supplied.
    #[error("{operation}: expected a scalar operand, found a {found}")]
    ScalarOperand {
        operation: &'static str,
        found: OperandKind,
    },

    /// Operation is only defined up to three dimensions.
    #[error("{operation}: only defined for 2D or 3D operands, got {dimension} components")]
    Dimension {
        operation: &'static str,
        dimension: usize,
    },

    /// Operand sizes are incompatible.
    #[error("{operation}: expected {expected} components, found {found}")]
    DimensionMismatch {
        operation: &'static str,
        expected: usize,
        found: usize,
    },

    /// Zero-length vector where a direction was required.
    #[error("{operation}: cannot normalize a zero-length vector")]
    DegenerateVector { operation: &'static str },

    /// The two lines are parallel or coincident.
    #[error("lines are parallel (alpha^2 = {alpha_squared}), no unique closest approach")]
    DegenerateGeometry { alpha_squared: f64 },

    #[error("{operation}: empty batch")]
    EmptyBatch { operation: &'static str },

    #[error("insufficient observations: {available} available, {required} required")]
    InsufficientObservations { available: usize, required: usize },

    /// Every observation pair was discarded as degenerate.
    #[error("no usable observation pair ({skipped} degenerate pairs discarded)")]
    NoUsablePairs { skipped: usize },

    /// Uncertainty must be finite and non-negative.
    #[error("invalid uncertainty on axis {axis}: {value}")]
    InvalidUncertainty { axis: char, value: f64 },
}

impl AlgebraError {
    /// True for failures caused by the geometry of the input rather than
    /// by a malformed call.
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            AlgebraError::DegenerateGeometry { .. } | AlgebraError::DegenerateVector { .. }
        )
    }
}
