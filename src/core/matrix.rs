//! Square matrices over [`Vector`].
//!
//! A `Matrix<N>` is stored as `N` column vectors: the vectors a matrix is
//! built from are its columns, and `m[i]` is column `i`. The product with a
//! vector `x` is therefore `sum_j x[j] * m[j]`.

use std::array;
use std::fmt;
use std::ops::Index;

use nalgebra::SMatrix;

use crate::core::vector::{Vector, Vector3};
use crate::validation::error::{AlgebraError, AlgebraResult};

/// Square `N x N` matrix stored column by column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<const N: usize> {
    columns: [Vector<N>; N],
}

/// 3x3 matrix.
pub type Matrix3 = Matrix<3>;

impl<const N: usize> Matrix<N> {
    pub const fn from_columns(columns: [Vector<N>; N]) -> Self {
        Self { columns }
    }

    pub fn from_rows(rows: [Vector<N>; N]) -> Self {
        Self::from_columns(rows).transpose()
    }

    /// Build from runtime-sized column slices.
    ///
    /// Exactly `N` slices are required; slices shorter than `N` are
    /// zero-padded.
    pub fn from_slices(columns: &[&[f64]]) -> AlgebraResult<Self> {
        if columns.len() != N {
            return Err(AlgebraError::DimensionMismatch {
                operation: "Matrix::from_slices",
                expected: N,
                found: columns.len(),
            });
        }
        let mut built = [Vector::zeros(); N];
        for (slot, values) in built.iter_mut().zip(columns.iter()) {
            *slot = Vector::padded(values).map_err(|_| AlgebraError::DimensionMismatch {
                operation: "Matrix::from_slices",
                expected: N,
                found: values.len(),
            })?;
        }
        Ok(Self::from_columns(built))
    }

    pub fn zeros() -> Self {
        Self::from_columns([Vector::zeros(); N])
    }

    pub fn identity() -> Self {
        Self::from_columns(array::from_fn(|c| {
            Vector::new(array::from_fn(|r| if r == c { 1.0 } else { 0.0 }))
        }))
    }

    pub fn column(&self, index: usize) -> Vector<N> {
        self.columns[index]
    }

    pub fn row(&self, index: usize) -> Vector<N> {
        Vector::new(array::from_fn(|c| self.columns[c][index]))
    }

    pub fn columns(&self) -> &[Vector<N>; N] {
        &self.columns
    }

    /// Element at (`row`, `column`).
    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.columns[column][row]
    }

    pub fn multiply_matrix_vector(&self, x: &Vector<N>) -> Vector<N> {
        self.columns
            .iter()
            .enumerate()
            .fold(Vector::zeros(), |acc, (j, column)| {
                acc.add_vector(&column.scale(x[j]))
            })
    }

    /// Matrix-vector product with a runtime-sized operand.
    pub fn multiply_slice(&self, x: &[f64]) -> AlgebraResult<Vector<N>> {
        let x = Vector::from_slice(x).map_err(|_| AlgebraError::DimensionMismatch {
            operation: "Matrix::multiply_slice",
            expected: N,
            found: x.len(),
        })?;
        Ok(self.multiply_matrix_vector(&x))
    }

    pub fn multiply_matrix_matrix(&self, other: &Self) -> Self {
        Self::from_columns(other.columns.map(|column| self.multiply_matrix_vector(&column)))
    }

    /// Every stored vector scaled by `k`.
    pub fn scale(&self, k: f64) -> Self {
        Self::from_columns(self.columns.map(|column| column.scale(k)))
    }

    pub fn transpose(&self) -> Self {
        Self::from_columns(array::from_fn(|i| self.row(i)))
    }

    /// True when the columns are mutually orthogonal unit vectors.
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let gram = self.transpose().multiply_matrix_matrix(self);
        gram.max_abs_diff(&Self::identity()) <= tolerance
    }

    /// Largest absolute element-wise difference to `other`.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        self.columns
            .iter()
            .zip(other.columns.iter())
            .map(|(a, b)| a.max_abs_diff(b))
            .fold(0.0, f64::max)
    }
}

impl Matrix3 {
    /// Direction-cosine matrix taking North-East-Down components at
    /// (`longitude_deg`, `latitude_deg`) to Earth-Centered-Earth-Fixed axes.
    ///
    /// Columns are the local north, east and down unit vectors expressed in
    /// ECEF.
    pub fn ned2ecef(longitude_deg: f64, latitude_deg: f64) -> Self {
        let (sl, cl) = longitude_deg.to_radians().sin_cos();
        let (sp, cp) = latitude_deg.to_radians().sin_cos();
        Self::from_columns([
            Vector3::xyz(-sp * cl, -sp * sl, cp),
            Vector3::xyz(-sl, cl, 0.0),
            Vector3::xyz(-cp * cl, -cp * sl, -sp),
        ])
    }

    /// Inverse of [`ned2ecef`](Self::ned2ecef).
    pub fn ecef2ned(longitude_deg: f64, latitude_deg: f64) -> Self {
        Self::ned2ecef(longitude_deg, latitude_deg).transpose()
    }
}

impl<const N: usize> Default for Matrix<N> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<const N: usize> Index<usize> for Matrix<N> {
    type Output = Vector<N>;

    fn index(&self, index: usize) -> &Vector<N> {
        &self.columns[index]
    }
}

impl<const N: usize> From<Matrix<N>> for SMatrix<f64, N, N> {
    fn from(m: Matrix<N>) -> Self {
        SMatrix::from_fn(|r, c| m.get(r, c))
    }
}

impl<const N: usize> From<SMatrix<f64, N, N>> for Matrix<N> {
    fn from(m: SMatrix<f64, N, N>) -> Self {
        Self::from_columns(array::from_fn(|c| {
            Vector::new(array::from_fn(|r| m[(r, c)]))
        }))
    }
}

impl<const N: usize> fmt::Display for Matrix<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..N {
            if r > 0 {
                writeln!(f)?;
            }
            for c in 0..N {
                if c > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>12.6}", self.get(r, c))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn sample() -> Matrix3 {
        Matrix3::from_rows([
            Vector3::xyz(1.0, 2.0, 3.0),
            Vector3::xyz(0.0, -1.0, 4.0),
            Vector3::xyz(5.0, 6.0, 0.5),
        ])
    }

    #[test]
    fn test_construction_and_access() {
        let m = sample();
        assert_eq!(m.row(0), Vector3::xyz(1.0, 2.0, 3.0));
        assert_eq!(m.column(0), Vector3::xyz(1.0, 0.0, 5.0));
        assert_eq!(m[2], m.column(2));
        assert_eq!(m.get(1, 2), 4.0);
        assert_eq!(Matrix3::default(), Matrix3::identity());
    }

    #[test]
    fn test_from_slices_pads_short_vectors() {
        let m = Matrix3::from_slices(&[&[1.0, 2.0], &[3.0, 4.0, 5.0], &[6.0]]).unwrap();
        assert_eq!(m[0], Vector3::xyz(1.0, 2.0, 0.0));
        assert_eq!(m[1], Vector3::xyz(3.0, 4.0, 5.0));
        assert_eq!(m[2], Vector3::xyz(6.0, 0.0, 0.0));
    }

    #[test]
    fn test_from_slices_rejects_bad_sizes() {
        assert!(matches!(
            Matrix3::from_slices(&[&[1.0], &[2.0]]),
            Err(AlgebraError::DimensionMismatch { expected: 3, found: 2, .. })
        ));
        assert!(matches!(
            Matrix::<2>::from_slices(&[&[1.0, 2.0, 3.0], &[4.0]]),
            Err(AlgebraError::DimensionMismatch { expected: 2, found: 3, .. })
        ));
    }

    #[test]
    fn test_matrix_vector_product() {
        let m = sample();
        let x = Vector3::xyz(1.0, -1.0, 2.0);
        assert_eq!(m.multiply_matrix_vector(&x), Vector3::xyz(5.0, 9.0, 0.0));
        assert_eq!(Matrix3::identity().multiply_matrix_vector(&x), x);

        assert_eq!(m.multiply_slice(&[1.0, -1.0, 2.0]).unwrap(), Vector3::xyz(5.0, 9.0, 0.0));
        assert!(matches!(
            m.multiply_slice(&[1.0, 2.0]),
            Err(AlgebraError::DimensionMismatch { expected: 3, found: 2, .. })
        ));
    }

    #[test]
    fn test_matrix_matrix_product_matches_nalgebra() {
        let a = sample();
        let b = Matrix3::ned2ecef(12.0, -33.0);

        let expected: Matrix3 = (nalgebra::Matrix3::from(a) * nalgebra::Matrix3::from(b)).into();
        assert!(a.multiply_matrix_matrix(&b).max_abs_diff(&expected) < EPS);

        let expected_t: Matrix3 = nalgebra::Matrix3::from(a).transpose().into();
        assert_eq!(a.transpose(), expected_t);
    }

    #[test]
    fn test_scale() {
        let m = sample().scale(2.0);
        assert_eq!(m.row(2), Vector3::xyz(10.0, 12.0, 1.0));
    }

    #[test]
    fn test_ned2ecef_is_orthonormal() {
        for lon in [-180.0, -75.5, 0.0, 5.0, 42.0, 179.9] {
            for lat in [-90.0, -45.0, 0.0, 45.0, 89.0, 90.0] {
                let m = Matrix3::ned2ecef(lon, lat);
                assert!(m.is_orthonormal(1e-12), "lon={} lat={}", lon, lat);

                for i in 0..3 {
                    assert!((m[i].norm() - 1.0).abs() < EPS);
                    for j in (i + 1)..3 {
                        assert!(m[i].dot(&m[j]).abs() < EPS);
                    }
                }

                let product = m.multiply_matrix_matrix(&m.transpose());
                assert!(product.max_abs_diff(&Matrix3::identity()) < EPS);
            }
        }
    }

    #[test]
    fn test_ned2ecef_axes() {
        let m = Matrix3::ned2ecef(0.0, 0.0);
        assert!(m[0].max_abs_diff(&Vector3::xyz(0.0, 0.0, 1.0)) < EPS);
        assert!(m[1].max_abs_diff(&Vector3::xyz(0.0, 1.0, 0.0)) < EPS);
        assert!(m[2].max_abs_diff(&Vector3::xyz(-1.0, 0.0, 0.0)) < EPS);

        // North at the equator on the prime meridian points to +Z in ECEF
        let north = m.multiply_matrix_vector(&Vector3::xyz(1.0, 0.0, 0.0));
        assert!(north.max_abs_diff(&Vector3::xyz(0.0, 0.0, 1.0)) < EPS);

        // Down at the north pole points to -Z
        let pole = Matrix3::ned2ecef(30.0, 90.0);
        let down = pole.multiply_matrix_vector(&Vector3::xyz(0.0, 0.0, 1.0));
        assert!(down.max_abs_diff(&Vector3::xyz(0.0, 0.0, -1.0)) < EPS);
    }

    #[test]
    fn test_ecef2ned_inverts_ned2ecef() {
        let v = Vector3::xyz(3.0, -2.0, 7.5);
        let ecef = Matrix3::ned2ecef(5.0, 45.0).multiply_matrix_vector(&v);
        let back = Matrix3::ecef2ned(5.0, 45.0).multiply_matrix_vector(&ecef);
        assert!(back.max_abs_diff(&v) < 1e-12);
    }

    #[test]
    fn test_display_prints_rows() {
        let text = sample().to_string();
        let first: Vec<&str> = text.lines().next().unwrap().split_whitespace().collect();
        assert_eq!(first, vec!["1.000000", "2.000000", "3.000000"]);
    }
}
