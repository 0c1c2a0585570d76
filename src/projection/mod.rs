//! Reprojection from the geographic frame into a metric planar frame.
//!
//! Points and land polygons go through the same [`Reprojector`] so that
//! distances between them come out in meters.

mod crs;

pub use crs::Crs;

use std::f64::consts::PI;

use geo::{Coord, MapCoords, Point, Polygon};

use crate::error::{GeometryError, Result, ShoreError};
use crate::models::{GeoPoint, ProjectedPoint};

/// Sphere radius used by Web Mercator (WGS84 semi-major axis)
pub const WEB_MERCATOR_RADIUS: f64 = 6_378_137.0;

/// Latitude at which Web Mercator reaches its square extent
pub const WEB_MERCATOR_MAX_LAT: f64 = 85.051_128_779;

/// lon/lat (degrees) to Web Mercator (meters). Latitude is clamped.
///
/// Land reaching the poles keeps its polar edge, which after clamping sits on
/// the ±85.0511° line and counts as coastline. Points beyond that latitude
/// fold onto the same line.
pub fn lon_lat_to_mercator(lon: f64, lat: f64) -> (f64, f64) {
    let lat = lat.clamp(-WEB_MERCATOR_MAX_LAT, WEB_MERCATOR_MAX_LAT);
    let x = WEB_MERCATOR_RADIUS * lon.to_radians();
    let y = WEB_MERCATOR_RADIUS * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln();
    (x, y)
}

/// Transforms geometries between two frames.
#[derive(Debug, Clone, Copy)]
pub struct Reprojector {
    source: Crs,
    target: Crs,
}

impl Reprojector {
    pub fn new(source: Crs, target: Crs) -> Result<Self> {
        match (source, target) {
            (a, b) if a == b => Ok(Self { source, target }),
            (Crs::Wgs84, Crs::WebMercator) => Ok(Self { source, target }),
            _ => Err(ShoreError::UnsupportedTransform {
                from: source.to_string(),
                to: target.to_string(),
            }),
        }
    }

    /// Reprojector into the metric frame used for classification
    pub fn to_metric(source: Crs) -> Result<Self> {
        Self::new(source, Crs::WebMercator)
    }

    pub fn source(&self) -> Crs {
        self.source
    }

    pub fn target(&self) -> Crs {
        self.target
    }

    pub fn transform(&self, coord: Coord<f64>) -> Coord<f64> {
        if self.source == self.target {
            return coord;
        }
        let (x, y) = lon_lat_to_mercator(coord.x, coord.y);
        Coord { x, y }
    }

    /// Project a single validated point.
    pub fn project_point(
        &self,
        point: &GeoPoint,
    ) -> std::result::Result<ProjectedPoint, GeometryError> {
        if point.crs() != self.source {
            return Err(GeometryError::FrameMismatch {
                found: point.crs().to_string(),
                expected: self.source.to_string(),
            });
        }

        let coord = self.transform(point.point.0);
        if !coord.x.is_finite() || !coord.y.is_finite() {
            return Err(GeometryError::NonFinite {
                x: coord.x,
                y: coord.y,
            });
        }

        Ok(ProjectedPoint {
            row: point.row,
            point: Point(coord),
            crs: self.target,
            origin: *point,
        })
    }

    /// Project every polygon of a land layer.
    pub fn project_polygons(&self, polygons: &[Polygon<f64>]) -> Vec<Polygon<f64>> {
        polygons
            .iter()
            .map(|polygon| polygon.map_coords(|c| self.transform(c)))
            .collect()
    }
}
