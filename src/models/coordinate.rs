//! Coordinate types flowing through the classification pipeline.

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::projection::Crs;

/// Raw (lat, lon) pair as read from one input row.
///
/// A `NaN` is treated the same as an absent value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCoordinate {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl RawCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    pub fn missing() -> Self {
        Self::default()
    }

    /// Latitude, with `NaN` folded into `None`
    pub fn lat(&self) -> Option<f64> {
        self.latitude.filter(|v| !v.is_nan())
    }

    /// Longitude, with `NaN` folded into `None`
    pub fn lon(&self) -> Option<f64> {
        self.longitude.filter(|v| !v.is_nan())
    }
}

/// Validated point tagged with the frame its coordinates are in.
///
/// Points built from input rows are geographic (x = longitude, y = latitude).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Zero-based index of the source row
    pub row: usize,
    pub point: Point<f64>,
    pub crs: Crs,
}

impl GeoPoint {
    /// Geographic point in EPSG:4326
    pub fn wgs84(row: usize, point: Point<f64>) -> Self {
        Self {
            row,
            point,
            crs: Crs::Wgs84,
        }
    }

    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    pub fn lon(&self) -> f64 {
        self.point.x()
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "POINT ({} {})", self.lon(), self.lat())
    }
}

/// A [`GeoPoint`] transformed into a metric planar frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub row: usize,
    pub point: Point<f64>,
    pub crs: Crs,
    /// Geographic point this was projected from, kept for log messages
    pub origin: GeoPoint,
}

impl ProjectedPoint {
    pub fn x(&self) -> f64 {
        self.point.x()
    }

    pub fn y(&self) -> f64 {
        self.point.y()
    }
}
