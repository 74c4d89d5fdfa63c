//! Fixed-dimension real vectors.
//!
//! `Vector<N>` is a stack-allocated `[f64; N]` with the usual algebra. The
//! kernel works with N = 2 or 3; the cross product zero-pads 2D operands to
//! 3D on a private copy and rejects anything wider than 3.
//!
//! Every operation has a named, statically typed entry point (`add_vector`,
//! `subtract_vector`, `scale`, ...). The std operator traits delegate to them.

use std::fmt;
use std::ops::{Add, Div, Index, Mul, Neg, Sub};

use nalgebra::SVector;

use crate::validation::error::{AlgebraError, AlgebraResult};

/// Ordered tuple of `N` real numbers with no inherent frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const N: usize> {
    components: [f64; N],
}

/// 2D vector.
pub type Vector2 = Vector<2>;
/// 3D vector.
pub type Vector3 = Vector<3>;

impl<const N: usize> Default for Vector<N> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<const N: usize> Vector<N> {
    pub const fn new(components: [f64; N]) -> Self {
        Self { components }
    }

    pub const fn zeros() -> Self {
        Self { components: [0.0; N] }
    }

    /// Build from a slice of exactly `N` values.
    pub fn from_slice(values: &[f64]) -> AlgebraResult<Self> {
        if values.len() != N {
            return Err(AlgebraError::DimensionMismatch {
                operation: "Vector::from_slice",
                expected: N,
                found: values.len(),
            });
        }
        let mut components = [0.0; N];
        components.copy_from_slice(values);
        Ok(Self { components })
    }

    /// Build from a slice of at most `N` values, zero-padding the tail.
    pub fn padded(values: &[f64]) -> AlgebraResult<Self> {
        if values.len() > N {
            return Err(AlgebraError::DimensionMismatch {
                operation: "Vector::padded",
                expected: N,
                found: values.len(),
            });
        }
        let mut components = [0.0; N];
        components[..values.len()].copy_from_slice(values);
        Ok(Self { components })
    }

    /// Number of components.
    pub const fn dimension(&self) -> usize {
        N
    }

    pub fn as_array(&self) -> &[f64; N] {
        &self.components
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.components
    }

    pub fn into_array(self) -> [f64; N] {
        self.components
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            components: self.components.map(f),
        }
    }

    fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        let mut components = [0.0; N];
        for (i, c) in components.iter_mut().enumerate() {
            *c = f(self.components[i], other.components[i]);
        }
        Self { components }
    }

    pub fn add_vector(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn subtract_vector(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a - b)
    }

    pub fn negate(&self) -> Self {
        self.map(|a| -a)
    }

    pub fn scale(&self, k: f64) -> Self {
        self.map(|a| a * k)
    }

    pub fn divide(&self, k: f64) -> Self {
        self.map(|a| a / k)
    }

    /// Element-wise `floor(a / k)`.
    pub fn floor_divide(&self, k: f64) -> Self {
        self.map(|a| (a / k).floor())
    }

    /// Sum of element-wise products.
    pub fn dot(&self, other: &Self) -> f64 {
        self.components
            .iter()
            .zip(other.components.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Euclidean length.
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector with the same direction.
    pub fn normalize(&self) -> AlgebraResult<Self> {
        let norm = self.norm();
        if norm == 0.0 {
            return Err(AlgebraError::DegenerateVector {
                operation: "Vector::normalize",
            });
        }
        Ok(self.divide(norm))
    }

    /// Copy of `self` zero-padded to three components.
    fn to_3d(&self, operation: &'static str) -> AlgebraResult<Vector3> {
        if N > 3 {
            return Err(AlgebraError::Dimension {
                operation,
                dimension: N,
            });
        }
        Vector3::padded(&self.components)
    }

    /// Cross product of two 2D or 3D vectors.
    ///
    /// Operands shorter than three components are treated as lying in the
    /// `z = 0` plane; neither operand is modified.
    pub fn cross<const M: usize>(&self, other: &Vector<M>) -> AlgebraResult<Vector3> {
        let a = self.to_3d("Vector::cross")?;
        let b = other.to_3d("Vector::cross")?;
        Ok(Vector3::xyz(
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ))
    }

    /// Largest absolute component-wise difference to `other`.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        self.components
            .iter()
            .zip(other.components.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

impl Vector2 {
    pub const fn xy(x: f64, y: f64) -> Self {
        Self::new([x, y])
    }
}

impl Vector3 {
    pub const fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self::new([x, y, z])
    }

    pub fn x(&self) -> f64 {
        self.components[0]
    }

    pub fn y(&self) -> f64 {
        self.components[1]
    }

    pub fn z(&self) -> f64 {
        self.components[2]
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.components[index]
    }
}

impl<const N: usize> From<[f64; N]> for Vector<N> {
    fn from(components: [f64; N]) -> Self {
        Self::new(components)
    }
}

impl<const N: usize> From<SVector<f64, N>> for Vector<N> {
    fn from(v: SVector<f64, N>) -> Self {
        Self::new(v.into())
    }
}

impl<const N: usize> From<Vector<N>> for SVector<f64, N> {
    fn from(v: Vector<N>) -> Self {
        SVector::from(v.components)
    }
}

impl<const N: usize> Add for Vector<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.add_vector(&rhs)
    }
}

impl<const N: usize> Sub for Vector<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.subtract_vector(&rhs)
    }
}

impl<const N: usize> Neg for Vector<N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl<const N: usize> Mul<f64> for Vector<N> {
    type Output = Self;

    fn mul(self, k: f64) -> Self {
        self.scale(k)
    }
}

impl<const N: usize> Mul<Vector<N>> for f64 {
    type Output = Vector<N>;

    fn mul(self, v: Vector<N>) -> Vector<N> {
        v.scale(self)
    }
}

impl<const N: usize> Div<f64> for Vector<N> {
    type Output = Self;

    fn div(self, k: f64) -> Self {
        self.divide(k)
    }
}

impl<const N: usize> fmt::Display for Vector<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, a) in self.components.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:>12.6}", a)?;
        }
        Ok(())
    }
}
