//! Closest-approach intersection of two bearing lines.
//!
//! Given observations `(A, u)` and `(B, v)`, the points `A + a*u` and
//! `B + b*v` closest to each other satisfy, with unit `u`, `v`,
//! `C = A - B` and `alpha = u.v`:
//!
//! ```text
//! a = (alpha * C.v - C.u) / (1 - alpha^2)
//! b = (C.v - alpha * C.u) / (1 - alpha^2)
//! ```
//!
//! The two closest points are then fused with [`barycenter`], so the line
//! whose origin is less uncertain pulls the estimate towards itself.

use log::debug;

use crate::algorithms::barycenter::barycenter;
use crate::core::{Observation, Point};
use crate::utils::config::{ConfigError, TriangulationConfig};
use crate::validation::error::{AlgebraError, AlgebraResult};

/// Closest points of two lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestApproach {
    /// Point on the first line
    pub on_first: Point,
    /// Point on the second line
    pub on_second: Point,
    /// Cosine of the angle between the two directions
    pub alpha: f64,
}

impl ClosestApproach {
    /// Distance between the two lines at closest approach.
    pub fn separation(&self) -> f64 {
        self.on_first.distance_to(&self.on_second)
    }
}

/// Pairwise line intersection engine
#[derive(Debug, Clone, Copy, Default)]
pub struct Triangulator {
    config: TriangulationConfig,
}

impl Triangulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a validated configuration.
    pub fn with_config(config: TriangulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Custom threshold on `|1 - alpha^2|` below which lines count as parallel
    pub fn with_parallel_tolerance(parallel_tolerance: f64) -> Result<Self, ConfigError> {
        Self::with_config(TriangulationConfig { parallel_tolerance })
    }

    pub fn config(&self) -> &TriangulationConfig {
        &self.config
    }

    /// Closest points on the two observation lines.
    pub fn closest_approach(
        &self,
        first: &Observation,
        second: &Observation,
    ) -> AlgebraResult<ClosestApproach> {
        let u = first.direction.normalize()?;
        let v = second.direction.normalize()?;

        let c = first.origin.position.subtract_vector(&second.origin.position);
        let cu = c.dot(&u);
        let cv = c.dot(&v);
        let alpha = u.dot(&v);
        let alpha2 = alpha * alpha;

        if (1.0 - alpha2).abs() <= self.config.parallel_tolerance {
            return Err(AlgebraError::DegenerateGeometry {
                alpha_squared: alpha2,
            });
        }

        let a = (alpha * cv - cu) / (1.0 - alpha2);
        let b = (cv - alpha * cu) / (1.0 - alpha2);

        Ok(ClosestApproach {
            on_first: first.origin.translate(&u.scale(a)),
            on_second: second.origin.translate(&v.scale(b)),
            alpha,
        })
    }

    /// Fused intersection of the two observation lines.
    ///
    /// The result carries the mean of the two origins' uncertainties.
    pub fn triangulate(&self, first: &Observation, second: &Observation) -> AlgebraResult<Point> {
        let approach = self.closest_approach(first, second)?;
        let fused = barycenter(&[approach.on_first, approach.on_second])?;

        debug!(
            "triangulated ({:.3}, {:.3}, {:.3}), separation {:.3}, alpha {:.6}",
            fused.position.x(),
            fused.position.y(),
            fused.position.z(),
            approach.separation(),
            approach.alpha
        );

        Ok(Point::with_uncertainty(
            fused.position,
            first.origin.uncertainty.average(&second.origin.uncertainty),
        ))
    }
}

/// Triangulate two observations with the default parallel tolerance.
pub fn triangulate(first: &Observation, second: &Observation) -> AlgebraResult<Point> {
    Triangulator::default().triangulate(first, second)
}
