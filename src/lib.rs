//! Bearing Triangulation Engine
//!
//! A small 3D linear-algebra kernel and a multi-observation position fusion
//! algorithm: pairwise skew-line triangulation combined into an
//! uncertainty-weighted barycenter.
//!
//! The engine works on plain Cartesian values. Converting geographic
//! positions to Cartesian or NED vectors, and back, is the caller's job;
//! [`Matrix3::ned2ecef`] is the only frame-aware helper.

pub mod core;
pub mod algorithms;
pub mod validation;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{
    Matrix, Matrix3, Observation, Operand, Point, Product, Uncertainty, Vector, Vector2, Vector3,
};
pub use crate::algorithms::{
    barycenter, localize, triangulate, Localization, Localizer, PairIntersection, Triangulator,
};
pub use crate::validation::{AlgebraError, AlgebraResult};
pub use crate::utils::{ConfigError, DegeneratePolicy, LocalizerConfig, TriangulationConfig};
