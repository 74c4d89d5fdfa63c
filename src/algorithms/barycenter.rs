//! Uncertainty-weighted barycenter of a batch of points.
//!
//! Each axis is fused independently. On an axis with uncertainties `d_i`:
//!
//! ```text
//! maxd  = max(d), or 1.0 when every d_i is zero
//! d'_i  = d_i / maxd
//! w_i   = min(d') + 1.0 - d'_i
//! x     = sum(x_i * w_i) / sum(w_i)
//! dx    = mean(d)
//! ```
//!
//! The least uncertain sample gets weight 1 and the most uncertain gets
//! `min(d')`. Weights depend on the whole batch, so the fusion cannot be
//! folded incrementally.

use log::trace;

use crate::core::{Point, Uncertainty};
use crate::validation::error::{AlgebraError, AlgebraResult};

/// Per-sample weights for one axis.
///
/// `uncertainties` must be non-empty and non-negative.
pub fn axis_weights(uncertainties: &[f64]) -> Vec<f64> {
    let max = uncertainties.iter().copied().fold(0.0, f64::max);
    let max = if max == 0.0 { 1.0 } else { max };
    let min = uncertainties.iter().copied().fold(f64::INFINITY, f64::min) / max;

    uncertainties.iter().map(|d| min + 1.0 - d / max).collect()
}

/// Fuse `points` into one estimate.
pub fn barycenter(points: &[Point]) -> AlgebraResult<Point> {
    if points.is_empty() {
        return Err(AlgebraError::EmptyBatch {
            operation: "barycenter",
        });
    }
    for p in points {
        let u = p.uncertainty;
        Uncertainty::new(u.dx, u.dy, u.dz)?;
    }

    let n = points.len() as f64;
    let mut position = [0.0; 3];
    let mut uncertainty = [0.0; 3];

    for axis in 0..3 {
        let d: Vec<f64> = points
            .iter()
            .map(|p| p.uncertainty.as_array()[axis])
            .collect();
        let weights = axis_weights(&d);
        trace!("barycenter axis {} weights {:?}", axis, weights);

        let total: f64 = weights.iter().sum();
        let weighted: f64 = points
            .iter()
            .zip(weights.iter())
            .map(|(p, w)| p.position[axis] * w)
            .sum();

        position[axis] = weighted / total;
        uncertainty[axis] = d.iter().sum::<f64>() / n;
    }

    Ok(Point::with_uncertainty(
        position.into(),
        Uncertainty::from_array(uncertainty),
    ))
}
