//! Numerical constants shared by the fusion algorithms

/// Lines whose unit directions satisfy `|1 - alpha^2| <= tolerance` are
/// treated as parallel
pub const DEFAULT_PARALLEL_TOLERANCE: f64 = 1e-12;

/// Minimum number of observations needed to localize
pub const MIN_OBSERVATIONS: usize = 2;
