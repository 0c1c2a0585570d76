//! Shorecheck - shoreline classification of geographic coordinates
//!
//! Classifies points as Offshore, Onshore or Inland by testing containment
//! against a land polygon layer and measuring the distance to its coastline
//! in Web Mercator meters.

pub mod classify;
pub mod error;
pub mod land;
pub mod models;
pub mod points;
pub mod projection;
pub mod table;

pub use classify::{Classification, Classifier, ClassifierConfig, Pipeline};
pub use error::{GeometryError, ShoreError};
pub use models::{GeoPoint, ProjectedPoint, RawCoordinate, ShoreStatus};
