//! Core data models for the classification pipeline.

pub mod coordinate;
pub mod status;

pub use coordinate::{GeoPoint, ProjectedPoint, RawCoordinate};
pub use status::ShoreStatus;
