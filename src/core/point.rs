//! Position estimates with per-axis uncertainty.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::vector::Vector3;
use crate::validation::error::{AlgebraError, AlgebraResult};

/// Per-axis error radius attached to a position estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Uncertainty {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl Uncertainty {
    /// Validated constructor: each value must be finite and non-negative.
    pub fn new(dx: f64, dy: f64, dz: f64) -> AlgebraResult<Self> {
        for (axis, value) in [('x', dx), ('y', dy), ('z', dz)] {
            if !value.is_finite() || value < 0.0 {
                return Err(AlgebraError::InvalidUncertainty { axis, value });
            }
        }
        Ok(Self { dx, dy, dz })
    }

    /// Same error radius on every axis.
    pub fn isotropic(d: f64) -> AlgebraResult<Self> {
        Self::new(d, d, d)
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.dx, self.dy, self.dz]
    }

    pub(crate) fn from_array(values: [f64; 3]) -> Self {
        Self {
            dx: values[0],
            dy: values[1],
            dz: values[2],
        }
    }

    /// Axis-wise mean of two uncertainties.
    pub fn average(&self, other: &Self) -> Self {
        Self {
            dx: (self.dx + other.dx) / 2.0,
            dy: (self.dy + other.dy) / 2.0,
            dz: (self.dz + other.dz) / 2.0,
        }
    }
}

/// A 3D position estimate with anisotropic error bounds.
///
/// Combining two points averages their uncertainties axis by axis.
/// Translating a point by a plain displacement keeps its uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "PointRecord", into = "PointRecord")]
pub struct Point {
    pub position: Vector3,
    pub uncertainty: Uncertainty,
}

impl Point {
    /// Point with zero uncertainty.
    pub fn new(position: Vector3) -> Self {
        Self {
            position,
            uncertainty: Uncertainty::default(),
        }
    }

    pub fn with_uncertainty(position: Vector3, uncertainty: Uncertainty) -> Self {
        Self {
            position,
            uncertainty,
        }
    }

    /// Convenience constructor validating the uncertainty values.
    pub fn from_components(
        x: f64,
        y: f64,
        z: f64,
        dx: f64,
        dy: f64,
        dz: f64,
    ) -> AlgebraResult<Self> {
        Ok(Self::with_uncertainty(
            Vector3::xyz(x, y, z),
            Uncertainty::new(dx, dy, dz)?,
        ))
    }

    pub fn add_point(&self, other: &Point) -> Point {
        Point {
            position: self.position.add_vector(&other.position),
            uncertainty: self.uncertainty.average(&other.uncertainty),
        }
    }

    pub fn subtract_point(&self, other: &Point) -> Point {
        Point {
            position: self.position.subtract_vector(&other.position),
            uncertainty: self.uncertainty.average(&other.uncertainty),
        }
    }

    /// Move the point by a displacement.
    pub fn translate(&self, displacement: &Vector3) -> Point {
        Point {
            position: self.position.add_vector(displacement),
            uncertainty: self.uncertainty,
        }
    }

    pub fn translate_back(&self, displacement: &Vector3) -> Point {
        Point {
            position: self.position.subtract_vector(displacement),
            uncertainty: self.uncertainty,
        }
    }

    /// Euclidean distance between the two positions.
    pub fn distance_to(&self, other: &Point) -> f64 {
        self.position.subtract_vector(&other.position).norm()
    }
}

impl From<Vector3> for Point {
    fn from(position: Vector3) -> Self {
        Point::new(position)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.position)?;
        write!(
            f,
            "<dx={} dy={} dz={}>",
            self.uncertainty.dx, self.uncertainty.dy, self.uncertainty.dz
        )
    }
}

/// Flat serialized form of a [`Point`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct PointRecord {
    x: f64,
    y: f64,
    z: f64,
    #[serde(default)]
    dx: f64,
    #[serde(default)]
    dy: f64,
    #[serde(default)]
    dz: f64,
}

impl From<PointRecord> for Point {
    fn from(r: PointRecord) -> Self {
        Point::with_uncertainty(
            Vector3::xyz(r.x, r.y, r.z),
            Uncertainty {
                dx: r.dx,
                dy: r.dy,
                dz: r.dz,
            },
        )
    }
}

impl From<Point> for PointRecord {
    fn from(p: Point) -> Self {
        PointRecord {
            x: p.position.x(),
            y: p.position.y(),
            z: p.position.z(),
            dx: p.uncertainty.dx,
            dy: p.uncertainty.dy,
            dz: p.uncertainty.dz,
        }
    }
}

/// A bearing: a ray through `origin` along `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ObservationRecord", into = "ObservationRecord")]
pub struct Observation {
    pub origin: Point,
    pub direction: Vector3,
}

impl Observation {
    pub fn new(origin: Point, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// Checks that the uncertainty is valid and the direction is usable.
    pub fn validate(&self) -> AlgebraResult<()> {
        let u = self.origin.uncertainty;
        Uncertainty::new(u.dx, u.dy, u.dz)?;
        self.direction.normalize()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ObservationRecord {
    origin: Point,
    direction: [f64; 3],
}

impl From<ObservationRecord> for Observation {
    fn from(r: ObservationRecord) -> Self {
        Observation::new(r.origin, Vector3::new(r.direction))
    }
}

impl From<Observation> for ObservationRecord {
    fn from(o: Observation) -> Self {
        ObservationRecord {
            origin: o.origin,
            direction: o.direction.into_array(),
        }
    }
}
