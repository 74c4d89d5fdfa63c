//! Linear-algebra kernel: vectors, matrices and uncertain points

pub mod constants;
pub mod matrix;
pub mod operand;
pub mod point;
pub mod vector;

pub use constants::*;
pub use matrix::{Matrix, Matrix3};
pub use operand::{Operand, Product};
pub use point::{Observation, Point, Uncertainty};
pub use vector::{Vector, Vector2, Vector3};
