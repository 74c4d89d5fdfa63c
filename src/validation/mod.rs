//! Error classification

pub mod error;

pub use error::{AlgebraError, AlgebraResult, OperandKind};
