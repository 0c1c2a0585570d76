//! Coordinate validation and point construction.

mod builder;
mod validate;

pub use builder::{build_points, make_point, PointSet};
pub use validate::{validate, Invalid};
