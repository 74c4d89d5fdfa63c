//! Position fusion over N bearing observations.
//!
//! Every unordered pair of observations is triangulated and the pairwise
//! intersections are fused with [`barycenter`]. The pairwise step may run on
//! the rayon pool; fusion waits for the complete set because its weights
//! depend on the whole batch.

use log::{debug, warn};
use rayon::prelude::*;

use crate::algorithms::barycenter::barycenter;
use crate::algorithms::triangulation::Triangulator;
use crate::core::{Observation, Point, MIN_OBSERVATIONS};
use crate::utils::config::{ConfigError, DegeneratePolicy, LocalizerConfig};
use crate::validation::error::{AlgebraError, AlgebraResult};

/// Triangulated intersection of observations `first` and `second`
/// (indices into the input batch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairIntersection {
    pub first: usize,
    pub second: usize,
    pub point: Point,
}

/// Localization result with per-pair details.
#[derive(Debug, Clone, PartialEq)]
pub struct Localization {
    /// Fused position estimate
    pub position: Point,
    /// Pairwise intersections that entered the fusion, in index order
    pub intersections: Vec<PairIntersection>,
    /// Pairs discarded as degenerate
    pub skipped: Vec<(usize, usize)>,
}

/// Multi-observation localization engine
#[derive(Debug, Clone, Default)]
pub struct Localizer {
    config: LocalizerConfig,
    triangulator: Triangulator,
}

impl Localizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a validated configuration.
    pub fn with_config(config: LocalizerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            triangulator: Triangulator::with_config(config.triangulation)?,
            config,
        })
    }

    pub fn config(&self) -> &LocalizerConfig {
        &self.config
    }

    /// Fused position of all observations.
    pub fn localize(&self, observations: &[Observation]) -> AlgebraResult<Point> {
        self.localize_detailed(observations)
            .map(|localization| localization.position)
    }

    /// Fused position together with the pairwise intersections it came from.
    pub fn localize_detailed(&self, observations: &[Observation]) -> AlgebraResult<Localization> {
        if observations.len() < MIN_OBSERVATIONS {
            return Err(AlgebraError::InsufficientObservations {
                available: observations.len(),
                required: MIN_OBSERVATIONS,
            });
        }

        let n = observations.len();
        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .collect();

        let triangulate = |&(i, j): &(usize, usize)| {
            let result = self
                .triangulator
                .triangulate(&observations[i], &observations[j]);
            ((i, j), result)
        };
        let results: Vec<((usize, usize), AlgebraResult<Point>)> = if self.config.parallel {
            pairs.par_iter().map(triangulate).collect()
        } else {
            pairs.iter().map(triangulate).collect()
        };

        let mut intersections = Vec::with_capacity(results.len());
        let mut skipped = Vec::new();

        for ((first, second), result) in results {
            match result {
                Ok(point) => intersections.push(PairIntersection {
                    first,
                    second,
                    point,
                }),
                Err(err)
                    if err.is_degenerate()
                        && self.config.degenerate_policy == DegeneratePolicy::SkipDegenerate =>
                {
                    warn!("skipping observation pair ({}, {}): {}", first, second, err);
                    skipped.push((first, second));
                }
                Err(err) => {
                    debug!("observation pair ({}, {}) failed: {}", first, second, err);
                    return Err(err);
                }
            }
        }

        if intersections.is_empty() {
            return Err(AlgebraError::NoUsablePairs {
                skipped: skipped.len(),
            });
        }

        let points: Vec<Point> = intersections.iter().map(|pair| pair.point).collect();
        let position = barycenter(&points)?;

        debug!(
            "localized {} observations from {} pairs ({} skipped): ({:.3}, {:.3}, {:.3})",
            n,
            intersections.len(),
            skipped.len(),
            position.position.x(),
            position.position.y(),
            position.position.z()
        );

        Ok(Localization {
            position,
            intersections,
            skipped,
        })
    }
}

/// Localize with the default fail-fast configuration.
pub fn localize(observations: &[Observation]) -> AlgebraResult<Point> {
    Localizer::default().localize(observations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::triangulation::triangulate;
    use crate::core::{Uncertainty, Vector3};

    const EPS: f64 = 1e-9;

    fn observation(origin: [f64; 3], d: f64, direction: [f64; 3]) -> Observation {
        Observation::new(
            Point::with_uncertainty(origin.into(), Uncertainty::isotropic(d).unwrap()),
            direction.into(),
        )
    }

    /// Three rays through (1, 2, 3), plus one parallel to the first
    fn rays_through_target() -> Vec<Observation> {
        vec![
            observation([0.0, 2.0, 3.0], 1.0, [1.0, 0.0, 0.0]),
            observation([1.0, 0.0, 3.0], 2.0, [0.0, 1.0, 0.0]),
            observation([1.0, 2.0, 10.0], 0.5, [0.0, 0.0, -1.0]),
            observation([5.0, 7.0, 3.0], 1.0, [-2.0, 0.0, 0.0]),
        ]
    }

    #[test]
    fn test_two_observations_match_triangulate() {
        let obs = rays_through_target();
        let fused = localize(&obs[..2]).unwrap();
        let pair = triangulate(&obs[0], &obs[1]).unwrap();
        assert_eq!(fused, pair);
    }

    #[test]
    fn test_exact_rays_recover_target() {
        let obs = rays_through_target();
        let result = Localizer::new().localize_detailed(&obs[..3]).unwrap();

        assert!(result.position.position.max_abs_diff(&Vector3::xyz(1.0, 2.0, 3.0)) < EPS);
        assert_eq!(result.intersections.len(), 3);
        assert!(result.skipped.is_empty());

        let order: Vec<(usize, usize)> = result
            .intersections
            .iter()
            .map(|pair| (pair.first, pair.second))
            .collect();
        assert_eq!(order, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_fail_fast_on_parallel_pair() {
        let obs = rays_through_target();
        let err = localize(&obs).unwrap_err();
        assert!(matches!(err, AlgebraError::DegenerateGeometry { .. }));
    }

    #[test]
    fn test_skip_degenerate_pairs() {
        let obs = rays_through_target();
        let localizer = Localizer::with_config(LocalizerConfig::skip_degenerate()).unwrap();
        let result = localizer.localize_detailed(&obs).unwrap();

        assert_eq!(result.skipped, vec![(0, 3)]);
        assert_eq!(result.intersections.len(), 5);
        // The fourth ray crosses x = 1 at y = 7, so only y is pulled away
        // from the target.
        let p = result.position.position;
        assert!((p.x() - 1.0).abs() < EPS);
        assert!((p.z() - 3.0).abs() < EPS);
        assert!(p.y() > 2.0 && p.y() < 7.0);
    }

    #[test]
    fn test_skip_with_no_usable_pair() {
        let obs = rays_through_target();
        let localizer = Localizer::with_config(LocalizerConfig::skip_degenerate()).unwrap();
        let err = localizer.localize(&[obs[0], obs[3]]).unwrap_err();
        assert_eq!(err, AlgebraError::NoUsablePairs { skipped: 1 });
    }

    #[test]
    fn test_insufficient_observations() {
        let obs = rays_through_target();
        assert_eq!(
            localize(&obs[..1]).unwrap_err(),
            AlgebraError::InsufficientObservations {
                available: 1,
                required: 2
            }
        );
        assert!(localize(&[]).is_err());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let obs = rays_through_target();
        let sequential = Localizer::with_config(LocalizerConfig::skip_degenerate())
            .unwrap()
            .localize_detailed(&obs)
            .unwrap();
        let parallel =
            Localizer::with_config(LocalizerConfig::skip_degenerate().with_parallel(true))
                .unwrap()
                .localize_detailed(&obs)
                .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_invalid_tolerance_rejected_before_localizing() {
        let mut config = LocalizerConfig::default();
        config.triangulation.parallel_tolerance = -1.0;
        assert!(matches!(
            Localizer::with_config(config),
            Err(ConfigError::InvalidParameter { .. })
        ));

        config.triangulation.parallel_tolerance = f64::NAN;
        assert!(Localizer::with_config(config).is_err());
    }
}
