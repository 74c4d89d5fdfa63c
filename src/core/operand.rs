//! Runtime operand dispatch.
//!
//! The kernel's entry points are statically typed. This layer serves callers
//! that only learn the kind of an operand at run time (for example after
//! deserializing it) and routes each kind to the matching typed function.

use crate::core::matrix::Matrix;
use crate::core::vector::Vector;
use crate::validation::error::{AlgebraError, AlgebraResult, OperandKind};

/// An operand whose kind is known only at run time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand<const N: usize> {
    Scalar(f64),
    Vector(Vector<N>),
    Matrix(Matrix<N>),
}

/// Result of a dispatched product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Product<const N: usize> {
    Scalar(f64),
    Vector(Vector<N>),
    Matrix(Matrix<N>),
}

impl<const N: usize> Operand<N> {
    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::Scalar(_) => OperandKind::Scalar,
            Operand::Vector(_) => OperandKind::Vector,
            Operand::Matrix(_) => OperandKind::Matrix,
        }
    }

    fn expect_scalar(&self, operation: &'static str) -> AlgebraResult<f64> {
        match self {
            Operand::Scalar(k) => Ok(*k),
            other => Err(AlgebraError::ScalarOperand {
                operation,
                found: other.kind(),
            }),
        }
    }
}

impl<const N: usize> From<f64> for Operand<N> {
    fn from(k: f64) -> Self {
        Operand::Scalar(k)
    }
}

impl<const N: usize> From<Vector<N>> for Operand<N> {
    fn from(v: Vector<N>) -> Self {
        Operand::Vector(v)
    }
}

impl<const N: usize> From<Matrix<N>> for Operand<N> {
    fn from(m: Matrix<N>) -> Self {
        Operand::Matrix(m)
    }
}

impl<const N: usize> Vector<N> {
    /// Division by an operand that must be a scalar.
    pub fn divide_operand(&self, operand: &Operand<N>) -> AlgebraResult<Vector<N>> {
        let k = operand.expect_scalar("Vector::divide")?;
        Ok(self.divide(k))
    }

    /// Floor division by an operand that must be a scalar.
    pub fn floor_divide_operand(&self, operand: &Operand<N>) -> AlgebraResult<Vector<N>> {
        let k = operand.expect_scalar("Vector::floor_divide")?;
        Ok(self.floor_divide(k))
    }

    /// Scalar operand scales, vector operand gives the dot product.
    pub fn multiply(&self, operand: &Operand<N>) -> AlgebraResult<Product<N>> {
        match operand {
            Operand::Scalar(k) => Ok(Product::Vector(self.scale(*k))),
            Operand::Vector(v) => Ok(Product::Scalar(self.dot(v))),
            Operand::Matrix(_) => Err(AlgebraError::ScalarOperand {
                operation: "Vector::multiply",
                found: OperandKind::Matrix,
            }),
        }
    }
}

impl<const N: usize> Matrix<N> {
    /// Product dispatched on the operand's kind.
    pub fn multiply(&self, operand: &Operand<N>) -> Product<N> {
        match operand {
            Operand::Scalar(k) => Product::Matrix(self.scale(*k)),
            Operand::Vector(v) => Product::Vector(self.multiply_matrix_vector(v)),
            Operand::Matrix(m) => Product::Matrix(self.multiply_matrix_matrix(m)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::matrix::Matrix3;
    use crate::core::vector::Vector3;

    #[test]
    fn test_divide_requires_scalar() {
        let v = Vector3::xyz(2.0, 4.0, 6.0);
        assert_eq!(
            v.divide_operand(&Operand::Scalar(2.0)).unwrap(),
            Vector3::xyz(1.0, 2.0, 3.0)
        );

        let err = v.divide_operand(&Operand::Vector(v)).unwrap_err();
        assert_eq!(
            err,
            AlgebraError::ScalarOperand {
                operation: "Vector::divide",
                found: OperandKind::Vector,
            }
        );

        let err = v.floor_divide_operand(&Matrix3::identity().into()).unwrap_err();
        assert!(matches!(
            err,
            AlgebraError::ScalarOperand { found: OperandKind::Matrix, .. }
        ));
    }

    #[test]
    fn test_vector_multiply_dispatch() {
        let v = Vector3::xyz(1.0, 2.0, 3.0);
        assert_eq!(
            v.multiply(&Operand::Scalar(3.0)).unwrap(),
            Product::Vector(Vector3::xyz(3.0, 6.0, 9.0))
        );
        assert_eq!(v.multiply(&v.into()).unwrap(), Product::Scalar(14.0));
        assert!(v.multiply(&Matrix3::identity().into()).is_err());
    }

    #[test]
    fn test_matrix_multiply_dispatch() {
        let m = Matrix3::ned2ecef(5.0, 45.0);
        let v = Vector3::xyz(1.0, 0.0, 0.0);

        assert_eq!(m.multiply(&v.into()), Product::Vector(m[0]));
        assert_eq!(
            m.multiply(&m.transpose().into()),
            Product::Matrix(m.multiply_matrix_matrix(&m.transpose()))
        );
        match m.multiply(&Operand::Scalar(2.0)) {
            Product::Matrix(scaled) => assert_eq!(scaled[1], m[1].scale(2.0)),
            other => panic!("unexpected product {:?}", other),
        }
    }
}
