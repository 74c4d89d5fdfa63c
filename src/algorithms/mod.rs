//! Position fusion algorithms

pub mod barycenter;
pub mod localization;
pub mod triangulation;

pub use barycenter::{axis_weights, barycenter};
pub use localization::{localize, Localization, Localizer, PairIntersection};
pub use triangulation::{triangulate, ClosestApproach, Triangulator};
